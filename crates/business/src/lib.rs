//! # Ironbank Business
//!
//! The service layer: identity resolution, ownership guard, account
//! store, ledger engine, transaction history, and user lifecycle.
//!
//! Every operation takes the acting principal as an email string that
//! the (external) authentication layer has already verified. Services
//! resolve it to a user, authorize through the guard, and perform the
//! mutation or read - all balance movement funnels through
//! [`LedgerService`].

pub mod accounts;
pub mod error;
pub mod guard;
pub mod identity;
pub mod ledger;
pub mod password;
pub mod services;
pub mod transactions;
pub mod users;

pub use accounts::{AccountService, NewAccount, UpdateAccount};
pub use error::{BusinessError, BusinessResult};
pub use ledger::{LedgerService, TransferReceipt};
pub use password::PasswordService;
pub use services::ServiceContext;
pub use transactions::TransactionService;
pub use users::{NewUser, UpdateUser, UserService};

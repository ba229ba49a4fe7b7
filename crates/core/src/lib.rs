//! # Ironbank Core
//!
//! Domain types for the Ironbank ledger: users, bank accounts, transfer
//! records, monetary helpers, and the domain error taxonomy.
//!
//! This crate is pure domain logic - no IO, no storage. Balance movement
//! lives on [`BankAccount`] so the ledger invariants (non-negative
//! balance, positive amounts) have one enforcement point.

pub mod account;
pub mod error;
pub mod money;
pub mod transaction;
pub mod user;

pub use account::BankAccount;
pub use error::{CoreError, CoreResult, ErrorKind};
pub use money::{require_amount, require_opening_balance, MONEY_SCALE};
pub use transaction::Transaction;
pub use user::{Address, User};

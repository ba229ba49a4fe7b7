//! Integration tests for Ironbank
//!
//! End-to-end flows across the services: registration, account opening,
//! deposits, transfers, and history - the way the CLI (or an HTTP layer)
//! drives them.

use ironbank_business::{
    AccountService, LedgerService, NewAccount, NewUser, ServiceContext, TransactionService,
    UserService,
};
use ironbank_core::{Address, ErrorKind};
use ironbank_persistence::Database;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

async fn setup() -> (Database, ServiceContext) {
    let db = Database::in_memory().await.unwrap();
    let ctx = ServiceContext::from_pool(db.pool().clone());
    (db, ctx)
}

async fn register(ctx: &ServiceContext, name: &str, email: &str) {
    UserService::new(ctx)
        .create(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            phone_number: "+441234567890".to_string(),
            address: Address::line1("1 High Street"),
            password: "correct horse battery staple".to_string(),
        })
        .await
        .unwrap();
}

async fn open_account(ctx: &ServiceContext, email: &str, balance: Decimal) -> String {
    AccountService::new(ctx)
        .create(
            email,
            NewAccount {
                bank_name: "Ironbank".to_string(),
                account_type: "personal".to_string(),
                sort_code: "10-20-30".to_string(),
                account_number: "12345678".to_string(),
                opening_balance: balance,
            },
        )
        .await
        .unwrap()
        .id
}

/// Register two users, move money between them, and check every view.
#[tokio::test]
async fn test_full_workflow() {
    let (_db, ctx) = setup().await;

    register(&ctx, "Alice", "alice@example.com").await;
    register(&ctx, "Bob", "bob@example.com").await;

    let alice_acc = open_account(&ctx, "alice@example.com", dec!(0.00)).await;
    let bob_acc = open_account(&ctx, "bob@example.com", dec!(50.00)).await;

    let ledger = LedgerService::new(&ctx);

    // Fund Alice, then pay Bob.
    ledger
        .deposit("alice@example.com", &alice_acc, dec!(300.00))
        .await
        .unwrap();
    let receipt = ledger
        .transfer("alice@example.com", &alice_acc, &bob_acc, dec!(150.00))
        .await
        .unwrap();
    assert_eq!(receipt.from.balance, dec!(150.00));
    assert_eq!(receipt.to.balance, dec!(200.00));

    // Bob spends some of it back.
    ledger
        .transfer("bob@example.com", &bob_acc, &alice_acc, dec!(25.00))
        .await
        .unwrap();
    ledger
        .withdraw("bob@example.com", &bob_acc, dec!(75.00))
        .await
        .unwrap();

    let accounts = AccountService::new(&ctx);
    let alice_view = accounts.get("alice@example.com", &alice_acc).await.unwrap();
    let bob_view = accounts.get("bob@example.com", &bob_acc).await.unwrap();
    assert_eq!(alice_view.balance, dec!(175.00));
    assert_eq!(bob_view.balance, dec!(100.00));

    // Both parties see the shared transfers, newest first.
    let history = TransactionService::new(&ctx);
    let alice_history = history.list("alice@example.com").await.unwrap();
    let bob_history = history.list("bob@example.com").await.unwrap();
    assert_eq!(alice_history.len(), 2);
    assert_eq!(bob_history.len(), 2);
    assert!(alice_history
        .windows(2)
        .all(|w| w[0].created_at >= w[1].created_at));

    // Each transfer is readable by either party through get().
    for txn in &alice_history {
        history.get("bob@example.com", &txn.id).await.unwrap();
    }
}

/// Every error kind surfaces from the right operation.
#[tokio::test]
async fn test_error_taxonomy_end_to_end() {
    let (_db, ctx) = setup().await;

    register(&ctx, "Alice", "alice@example.com").await;
    let acc = open_account(&ctx, "alice@example.com", dec!(100.00)).await;

    // Validation: overdraft.
    let err = LedgerService::new(&ctx)
        .withdraw("alice@example.com", &acc, dec!(150.00))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    // NotFound: unknown principal.
    let err = AccountService::new(&ctx)
        .list("ghost@example.com")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // Conflict: duplicate registration.
    let err = UserService::new(&ctx)
        .create(NewUser {
            name: "Alice Again".to_string(),
            email: "alice@example.com".to_string(),
            phone_number: "+441234567890".to_string(),
            address: Address::line1("1 High Street"),
            password: "another password".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    // Forbidden: a stranger touching the account.
    register(&ctx, "Bob", "bob@example.com").await;
    let err = LedgerService::new(&ctx)
        .deposit("bob@example.com", &acc, dec!(10.00))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
}

/// Balances stay non-negative through an arbitrary operation mix.
#[tokio::test]
async fn test_balances_never_go_negative() {
    let (_db, ctx) = setup().await;

    register(&ctx, "Alice", "alice@example.com").await;
    register(&ctx, "Bob", "bob@example.com").await;
    let a = open_account(&ctx, "alice@example.com", dec!(20.00)).await;
    let b = open_account(&ctx, "bob@example.com", dec!(0.00)).await;

    let ledger = LedgerService::new(&ctx);

    // A mix of accepted and rejected operations.
    let _ = ledger.withdraw("alice@example.com", &a, dec!(30.00)).await; // rejected
    let _ = ledger.deposit("alice@example.com", &a, dec!(5.00)).await;
    let _ = ledger.transfer("alice@example.com", &a, &b, dec!(25.00)).await;
    let _ = ledger.transfer("alice@example.com", &a, &b, dec!(10.00)).await; // rejected
    let _ = ledger.withdraw("bob@example.com", &b, dec!(25.00)).await;
    let _ = ledger.withdraw("bob@example.com", &b, dec!(0.01)).await; // rejected

    let accounts = AccountService::new(&ctx);
    let a_bal = accounts.get("alice@example.com", &a).await.unwrap().balance;
    let b_bal = accounts.get("bob@example.com", &b).await.unwrap().balance;
    assert!(a_bal >= Decimal::ZERO);
    assert!(b_bal >= Decimal::ZERO);
    assert_eq!(a_bal, dec!(0.00));
    assert_eq!(b_bal, dec!(0.00));
}

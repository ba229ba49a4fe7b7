//! Ledger commands - deposit, withdraw, transfer

use anyhow::Result;
use rust_decimal::Decimal;

use ironbank_business::{LedgerService, ServiceContext};

use crate::db;
use crate::Cli;

/// Deposit into an owned account
pub async fn deposit(cli: &Cli, account_id: &str, amount: Decimal) -> Result<()> {
    let principal = cli.require_principal()?;
    let pool = db::connect(&cli.db).await?;
    let ctx = ServiceContext::from_pool(pool.clone());

    let account = LedgerService::new(&ctx)
        .deposit(principal, account_id, amount)
        .await?;

    println!("✅ Deposited {} into {}", amount, account.id);
    println!("   New balance: {}", account.balance);

    pool.close().await;
    Ok(())
}

/// Withdraw from an owned account
pub async fn withdraw(cli: &Cli, account_id: &str, amount: Decimal) -> Result<()> {
    let principal = cli.require_principal()?;
    let pool = db::connect(&cli.db).await?;
    let ctx = ServiceContext::from_pool(pool.clone());

    let account = LedgerService::new(&ctx)
        .withdraw(principal, account_id, amount)
        .await?;

    println!("✅ Withdrew {} from {}", amount, account.id);
    println!("   New balance: {}", account.balance);

    pool.close().await;
    Ok(())
}

/// Transfer between accounts (source must be owned by the principal)
pub async fn transfer(cli: &Cli, from: &str, to: &str, amount: Decimal) -> Result<()> {
    let principal = cli.require_principal()?;
    let pool = db::connect(&cli.db).await?;
    let ctx = ServiceContext::from_pool(pool.clone());

    let receipt = LedgerService::new(&ctx)
        .transfer(principal, from, to, amount)
        .await?;

    println!("✅ Transfer complete:");
    println!("   Transaction: {}", receipt.transaction.id);
    println!("   {} -> {}", receipt.from.id, receipt.to.id);
    println!("   Amount:      {}", receipt.transaction.amount);
    println!("   Source balance: {}", receipt.from.balance);

    pool.close().await;
    Ok(())
}

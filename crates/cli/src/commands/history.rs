//! Transaction history commands

use anyhow::Result;

use ironbank_business::{ServiceContext, TransactionService};
use ironbank_core::Transaction;

use crate::db;
use crate::{Cli, HistoryAction};

/// Handle history subcommands
pub async fn handle(cli: &Cli, action: &HistoryAction) -> Result<()> {
    let principal = cli.require_principal()?;
    let pool = db::connect(&cli.db).await?;
    let ctx = ServiceContext::from_pool(pool.clone());
    let service = TransactionService::new(&ctx);

    match action {
        HistoryAction::List => {
            let transactions = service.list(principal).await?;
            print_history(&transactions);
        }

        HistoryAction::Show { transaction_id } => {
            let txn = service.get(principal, transaction_id).await?;
            print_transaction(&txn);
        }

        HistoryAction::Account { account_id } => {
            let transactions = service.list_for_account(principal, account_id).await?;
            print_history(&transactions);
        }
    }

    pool.close().await;
    Ok(())
}

fn print_history(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("No transactions.");
        return;
    }
    for txn in transactions {
        print_transaction(txn);
    }
}

fn print_transaction(txn: &Transaction) {
    println!(
        "{}  {} -> {}  {}  ({})",
        txn.created_at, txn.from_account_id, txn.to_account_id, txn.amount, txn.id
    );
}

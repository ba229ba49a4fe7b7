//! Bank account management commands

use anyhow::Result;

use ironbank_business::{AccountService, NewAccount, ServiceContext, UpdateAccount};
use ironbank_core::BankAccount;

use crate::db;
use crate::{AccountAction, Cli};

/// Handle account subcommands
pub async fn handle(cli: &Cli, action: &AccountAction) -> Result<()> {
    let principal = cli.require_principal()?;
    let pool = db::connect(&cli.db).await?;
    let ctx = ServiceContext::from_pool(pool.clone());
    let service = AccountService::new(&ctx);

    match action {
        AccountAction::Open {
            bank,
            account_type,
            sort_code,
            number,
            balance,
        } => {
            let account = service
                .create(
                    principal,
                    NewAccount {
                        bank_name: bank.clone(),
                        account_type: account_type.clone(),
                        sort_code: sort_code.clone(),
                        account_number: number.clone(),
                        opening_balance: *balance,
                    },
                )
                .await?;

            println!("✅ Opened account:");
            print_account(&account);
        }

        AccountAction::List => {
            let accounts = service.list(principal).await?;
            if accounts.is_empty() {
                println!("No accounts.");
            }
            for account in accounts {
                print_account(&account);
            }
        }

        AccountAction::Show { account_id, json } => {
            let account = service.get(principal, account_id).await?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&account)?);
            } else {
                print_account(&account);
            }
        }

        AccountAction::Update {
            account_id,
            bank,
            account_type,
            sort_code,
            number,
        } => {
            let account = service
                .update(
                    principal,
                    account_id,
                    UpdateAccount {
                        bank_name: bank.clone(),
                        account_type: account_type.clone(),
                        sort_code: sort_code.clone(),
                        account_number: number.clone(),
                    },
                )
                .await?;

            println!("✅ Updated account {}", account.id);
        }

        AccountAction::Close { account_id } => {
            service.delete(principal, account_id).await?;
            println!("✅ Closed account {}", account_id);
        }
    }

    pool.close().await;
    Ok(())
}

fn print_account(account: &BankAccount) {
    println!("Account {}", account.id);
    println!("   Bank:    {} ({})", account.bank_name, account.account_type);
    println!("   Sort:    {}  Number: {}", account.sort_code, account.account_number);
    println!("   Balance: {}", account.balance);
    println!("   Updated: {}", account.updated_at);
}

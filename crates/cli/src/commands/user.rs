//! User management commands

use anyhow::Result;

use ironbank_business::{NewUser, ServiceContext, UpdateUser, UserService};
use ironbank_core::Address;

use crate::db;
use crate::{Cli, UserAction};

/// Handle user subcommands
pub async fn handle(cli: &Cli, action: &UserAction) -> Result<()> {
    let pool = db::connect(&cli.db).await?;
    let ctx = ServiceContext::from_pool(pool.clone());
    let service = UserService::new(&ctx);

    match action {
        UserAction::Register {
            name,
            email,
            phone,
            line1,
            line2,
            line3,
            town,
            county,
            postcode,
            password,
        } => {
            let user = service
                .create(NewUser {
                    name: name.clone(),
                    email: email.clone(),
                    phone_number: phone.clone(),
                    address: Address {
                        line1: line1.clone(),
                        line2: line2.clone(),
                        line3: line3.clone(),
                        town: town.clone(),
                        county: county.clone(),
                        postcode: postcode.clone(),
                    },
                    password: password.clone(),
                })
                .await?;

            println!("✅ Registered user:");
            println!("   ID:    {}", user.id);
            println!("   Name:  {}", user.name);
            println!("   Email: {}", user.email);
        }

        UserAction::Show { user_id } => {
            let principal = cli.require_principal()?;
            let user = service.get_authenticated(principal, user_id).await?;

            println!("User {}", user.id);
            println!("   Name:    {}", user.name);
            println!("   Email:   {}", user.email);
            println!("   Phone:   {}", user.phone_number);
            println!("   Address: {}", user.address.line1);
            println!("   Created: {}", user.created_at);
            println!("   Updated: {}", user.updated_at);
        }

        UserAction::Update {
            user_id,
            name,
            email,
            phone,
            line1,
            line2,
            line3,
            town,
            county,
            postcode,
        } => {
            let principal = cli.require_principal()?;
            let user = service
                .update(
                    principal,
                    user_id,
                    UpdateUser {
                        name: name.clone(),
                        email: email.clone(),
                        phone_number: phone.clone(),
                        address: Address {
                            line1: line1.clone(),
                            line2: line2.clone(),
                            line3: line3.clone(),
                            town: town.clone(),
                            county: county.clone(),
                            postcode: postcode.clone(),
                        },
                    },
                )
                .await?;

            println!("✅ Updated user {}", user.id);
        }

        UserAction::Delete { user_id } => {
            let principal = cli.require_principal()?;
            service.delete(principal, user_id).await?;
            println!("✅ Deleted user {}", user_id);
        }
    }

    pool.close().await;
    Ok(())
}

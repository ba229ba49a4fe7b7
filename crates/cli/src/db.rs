//! Database initialization and status

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::path::Path;

use ironbank_persistence::{create_pool, init_database};

/// Initialize the database with schema
pub async fn init(db_path: &Path, force: bool) -> Result<()> {
    if force && db_path.exists() {
        std::fs::remove_file(db_path).context("Failed to remove existing database")?;
        println!("🗑️  Removed existing database");
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
    let pool = init_database(&db_url)
        .await
        .context("Failed to initialize database")?;

    pool.close().await;
    Ok(())
}

/// Show database status
pub async fn show_status(db_path: &Path) -> Result<()> {
    if !db_path.exists() {
        println!("❌ Database not found at {:?}", db_path);
        println!("   Run 'ironbank init' to create the database");
        return Ok(());
    }

    let pool = connect(db_path).await?;

    println!("📊 Database Status");
    println!("   Path: {:?}", db_path);
    println!();

    let user_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap_or((0,));

    let account_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
        .fetch_one(&pool)
        .await
        .unwrap_or((0,));

    let tx_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM transactions")
        .fetch_one(&pool)
        .await
        .unwrap_or((0,));

    println!("   Users:        {}", user_count.0);
    println!("   Accounts:     {}", account_count.0);
    println!("   Transactions: {}", tx_count.0);

    pool.close().await;
    Ok(())
}

/// Connect to the database pool
pub async fn connect(db_path: &Path) -> Result<SqlitePool> {
    let db_url = format!("sqlite:{}", db_path.display());
    create_pool(&db_url)
        .await
        .context("Failed to connect to database. Run 'ironbank init' first.")
}

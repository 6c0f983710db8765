//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Show ledger status

use std::path::Path;

use anyhow::{Context, Result};
use fintrack_core::db::Database;

/// Open the database, running migrations if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let _db = open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record a transaction: fintrack add --kind expense --category food --amount 12.50");
    println!("  2. Set a budget:         fintrack budget set --category food --amount 300 --month 1 --year 2026");
    println!("  3. Start web UI:         fintrack serve");

    Ok(())
}

pub fn cmd_status(db: &Database, owner: &str) -> Result<()> {
    let transaction_count = db.count_transactions(owner)?;
    let goal_count = db.list_budget_goals(owner, None)?.len();

    println!();
    println!("📊 Ledger Status");
    println!("   ─────────────────────────────────────────────");
    println!("   Database:     {}", db.path());
    println!("   Owner:        {}", owner);
    println!("   Transactions: {}", transaction_count);
    println!("   Budget goals: {}", goal_count);

    if transaction_count == 0 {
        println!();
        println!("   Record your first transaction with:");
        println!("     fintrack add --kind expense --category food --amount 12.50");
    }

    Ok(())
}

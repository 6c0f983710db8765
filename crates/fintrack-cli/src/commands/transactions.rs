//! Transaction command implementations

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use fintrack_core::db::Database;
use fintrack_core::models::{NewTransaction, TransactionKind};

use super::truncate;

pub fn cmd_add(
    db: &Database,
    owner: &str,
    kind: &str,
    category: &str,
    amount: f64,
    description: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    let kind: TransactionKind = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let occurred_on = match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --date format (use YYYY-MM-DD)")?,
        None => Local::now().date_naive(),
    };

    let id = db.insert_transaction(
        owner,
        &NewTransaction {
            kind,
            category: category.to_string(),
            amount,
            description: description.map(|s| s.to_string()),
            occurred_on,
        },
    )?;

    let sign = match kind {
        TransactionKind::Income => "+",
        TransactionKind::Expense => "-",
    };
    println!(
        "✅ Recorded transaction {}: {} {}${:.2} on {}",
        id, category, sign, amount, occurred_on
    );

    Ok(())
}

pub fn cmd_list(db: &Database, owner: &str, limit: i64) -> Result<()> {
    let transactions = db.list_transactions(owner, limit)?;

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  fintrack add --kind expense --category food --amount 12.50");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        let amount_str = match tx.kind {
            TransactionKind::Expense => format!("\x1b[31m${:.2}\x1b[0m", tx.amount), // Red for expenses
            TransactionKind::Income => format!("\x1b[32m+${:.2}\x1b[0m", tx.amount), // Green for income
        };

        println!(
            "   [{}] {} │ {:>10} │ {:<16} │ {}",
            tx.id,
            tx.occurred_on,
            amount_str,
            truncate(&tx.category, 16),
            truncate(tx.description.as_deref().unwrap_or(""), 32)
        );
    }

    Ok(())
}

pub fn cmd_delete(db: &Database, owner: &str, id: i64) -> Result<()> {
    // Show what is about to disappear
    let tx = db
        .get_transaction(owner, id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    db.delete_transaction(owner, id)?;

    println!("✅ Deleted transaction {}:", id);
    println!(
        "   {} │ ${:.2} │ {}",
        tx.occurred_on,
        tx.amount,
        truncate(&tx.category, 40)
    );

    Ok(())
}

//! Budget goal command implementations

use anyhow::Result;
use fintrack_core::db::Database;
use fintrack_core::models::NewBudgetGoal;

pub fn cmd_budget_set(
    db: &Database,
    owner: &str,
    category: &str,
    amount: f64,
    month: u32,
    year: i32,
) -> Result<()> {
    db.upsert_budget_goal(
        owner,
        &NewBudgetGoal {
            category: category.to_string(),
            amount,
            month,
            year,
        },
    )?;

    println!(
        "✅ Budget goal set: {} capped at ${:.2} for {:02}/{}",
        category, amount, month, year
    );

    Ok(())
}

pub fn cmd_budget_list(
    db: &Database,
    owner: &str,
    month: Option<u32>,
    year: Option<i32>,
) -> Result<()> {
    // Both halves of the period are needed to filter
    let period = match (month, year) {
        (Some(m), Some(y)) => Some((m, y)),
        (None, None) => None,
        _ => {
            anyhow::bail!("--month and --year must be given together");
        }
    };

    let goals = db.list_budget_goals(owner, period)?;

    if goals.is_empty() {
        println!("No budget goals found. Set one with:");
        println!("  fintrack budget set --category food --amount 300 --month 1 --year 2026");
        return Ok(());
    }

    println!();
    println!("🎯 Budget Goals");
    println!("   ─────────────────────────────────────────────");

    for goal in goals {
        println!(
            "   {:02}/{} │ {:<16} │ ${:.2}",
            goal.month, goal.year, goal.category, goal.amount
        );
    }

    Ok(())
}

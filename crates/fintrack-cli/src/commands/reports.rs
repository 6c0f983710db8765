//! Report command implementations (summary, trends, budget performance)

use anyhow::Result;
use chrono::{Datelike, Local};
use fintrack_core::db::Database;
use fintrack_core::models::BudgetStatus;
use fintrack_core::{budget_performance, financial_summary};

use super::truncate;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn cmd_summary(db: &Database, owner: &str, limit: i64) -> Result<()> {
    let transactions = db.list_transactions(owner, limit)?;
    let summary = financial_summary(&transactions);

    println!();
    println!("💰 Financial Summary ({} transactions)", transactions.len());
    println!("   ─────────────────────────────────────────────");
    println!("   Income:       \x1b[32m${:.2}\x1b[0m", summary.total_income);
    println!("   Expenses:     \x1b[31m${:.2}\x1b[0m", summary.total_expenses);
    println!("   Net balance:  ${:.2}", summary.net_balance);
    println!("   Savings rate: {:.1}%", summary.savings_rate);

    if !summary.expenses_by_category.is_empty() {
        println!();
        println!("   Expenses by category:");
        for (category, amount) in &summary.expenses_by_category {
            println!("     {:<20} ${:.2}", truncate(category, 20), amount);
        }
    }

    Ok(())
}

pub fn cmd_trends(db: &Database, owner: &str) -> Result<()> {
    let today = Local::now().date_naive();
    let trends = db.spending_trends(owner, today)?;

    println!();
    println!("📈 Monthly Trend (last 6 months)");
    println!("   ─────────────────────────────────────────────");
    if trends.monthly_trends.is_empty() {
        println!("   No activity in the window.");
    }
    for bucket in &trends.monthly_trends {
        println!(
            "   {} │ income \x1b[32m${:>10.2}\x1b[0m │ expenses \x1b[31m${:>10.2}\x1b[0m",
            bucket.month, bucket.income, bucket.expenses
        );
    }

    println!();
    println!("🏷️  Category Spend (last 30 days)");
    println!("   ─────────────────────────────────────────────");
    if trends.category_trends.is_empty() {
        println!("   No expenses in the window.");
    }
    for bucket in &trends.category_trends {
        println!(
            "   {:<16} │ total ${:>9.2} │ {:>3} txns │ avg ${:>8.2}",
            truncate(&bucket.category, 16),
            bucket.total_amount,
            bucket.transaction_count,
            bucket.avg_amount
        );
    }

    println!();
    println!("📅 Spend by Weekday (last 30 days)");
    println!("   ─────────────────────────────────────────────");
    if trends.daily_patterns.is_empty() {
        println!("   No expenses in the window.");
    }
    for bucket in &trends.daily_patterns {
        let name = WEEKDAYS
            .get(bucket.day_of_week as usize)
            .copied()
            .unwrap_or("?");
        println!("   {} │ avg ${:.2}", name, bucket.avg_spending);
    }

    Ok(())
}

pub fn cmd_performance(
    db: &Database,
    owner: &str,
    month: Option<u32>,
    year: Option<i32>,
) -> Result<()> {
    let today = Local::now().date_naive();
    let month = month.unwrap_or(today.month());
    let year = year.unwrap_or(today.year());

    let perf = budget_performance(db, owner, month, year)?;

    println!();
    println!("🎯 Budget Performance for {:02}/{}", month, year);
    println!("   ─────────────────────────────────────────────────────────────");

    if perf.budget_performance.is_empty() {
        println!("   No budget goals set for this period.");
    }

    for row in &perf.budget_performance {
        let marker = match row.status {
            BudgetStatus::WithinBudget => "\x1b[32m✓\x1b[0m",
            BudgetStatus::OverBudget => "\x1b[31m✗\x1b[0m",
        };
        println!(
            "   {} {:<16} │ ${:>8.2} of ${:>8.2} │ {:>5.1}% used",
            marker,
            truncate(&row.category, 16),
            row.actual,
            row.budget,
            row.percentage_used
        );
    }

    println!();
    println!(
        "   Total: ${:.2} spent of ${:.2} budgeted ({})",
        perf.total_spent,
        perf.total_budget,
        perf.overall_status.as_str()
    );

    Ok(())
}

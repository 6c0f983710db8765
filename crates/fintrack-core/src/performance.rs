//! Budget performance engine
//!
//! Compares a period's budget goals against actual spending per category and
//! derives over/within status flags.

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{BudgetPerformance, BudgetStatus, CategoryPerformance};

/// Compute budget-vs-actual performance for one (month, year) period
///
/// Per-category rows exist only for categories that have a goal; a goal with
/// no spending shows an actual of 0. `total_spent` intentionally sums the
/// period's whole expense map, so spending in categories without a goal still
/// counts against the overall status.
pub fn budget_performance(
    db: &Database,
    owner: &str,
    month: u32,
    year: i32,
) -> Result<BudgetPerformance> {
    if !(1..=12).contains(&month) {
        return Err(Error::InvalidData(format!(
            "Month must be between 1 and 12, got {}",
            month
        )));
    }

    let goals = db.list_budget_goals(owner, Some((month, year)))?;
    let actual_spending = db.expense_totals_for_month(owner, month, year)?;

    let actual_for = |category: &str| -> f64 {
        actual_spending
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, amount)| *amount)
            .unwrap_or(0.0)
    };

    let mut rows = Vec::with_capacity(goals.len());
    let mut total_budget = 0.0;

    for goal in &goals {
        let actual = actual_for(&goal.category);
        let percentage_used = if goal.amount > 0.0 {
            actual / goal.amount * 100.0
        } else {
            // A zero cap reads as 0% used by convention, not a division error
            0.0
        };
        let status = if actual > goal.amount {
            BudgetStatus::OverBudget
        } else {
            BudgetStatus::WithinBudget
        };

        total_budget += goal.amount;
        rows.push(CategoryPerformance {
            category: goal.category.clone(),
            budget: goal.amount,
            actual,
            difference: goal.amount - actual,
            percentage_used,
            status,
        });
    }

    let total_spent: f64 = actual_spending.iter().map(|(_, amount)| amount).sum();
    let overall_status = if total_spent > total_budget {
        BudgetStatus::OverBudget
    } else {
        BudgetStatus::WithinBudget
    };

    Ok(BudgetPerformance {
        budget_performance: rows,
        total_budget,
        total_spent,
        overall_status,
    })
}

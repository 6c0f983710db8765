//! Financial summary engine
//!
//! Pure aggregation over an already-scoped transaction set; the caller
//! decides which owner/window the set covers.

use std::collections::BTreeMap;

use crate::models::{FinancialSummary, Transaction, TransactionKind};

/// Compute aggregate income/expense figures in a single pass
///
/// `net_balance` is exactly income minus expenses, and the per-category
/// expense map sums back to `total_expenses`. An empty input yields an
/// all-zero summary rather than an error, and a set with no income yields a
/// savings rate of 0 rather than a division error.
pub fn financial_summary(transactions: &[Transaction]) -> FinancialSummary {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut expenses_by_category: BTreeMap<String, f64> = BTreeMap::new();

    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => total_income += tx.amount,
            TransactionKind::Expense => {
                total_expenses += tx.amount;
                *expenses_by_category.entry(tx.category.clone()).or_insert(0.0) += tx.amount;
            }
        }
    }

    let net_balance = total_income - total_expenses;
    let savings_rate = if total_income > 0.0 {
        net_balance / total_income * 100.0
    } else {
        0.0
    };

    FinancialSummary {
        total_income,
        total_expenses,
        net_balance,
        expenses_by_category,
        savings_rate,
    }
}

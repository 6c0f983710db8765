//! Fintrack Core Library
//!
//! Shared functionality for the Fintrack personal finance tracker:
//! - Ledger store for transactions and budget goals (SQLite)
//! - Summary engine (income/expense/net/savings-rate aggregates)
//! - Trend engine (monthly, per-category, and day-of-week analytics)
//! - Budget performance engine (budget vs. actual per category)
//! - Pluggable advice generator backends (Gemini, mock)

pub mod ai;
pub mod db;
pub mod error;
pub mod models;
pub mod performance;
pub mod summary;

/// Test utilities including mock advice server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{AdviceBackend, AdviceClient, GeminiBackend, MockBackend};
pub use db::Database;
pub use error::{Error, Result};
pub use models::{
    AdviceRequest, BudgetGoal, BudgetPerformance, BudgetStatus, CategoryPerformance,
    CategoryTrend, DailyPattern, FinancialSummary, MonthlyTrend, NewBudgetGoal, NewTransaction,
    SpendingTrends, Transaction, TransactionKind,
};
pub use performance::budget_performance;
pub use summary::financial_summary;

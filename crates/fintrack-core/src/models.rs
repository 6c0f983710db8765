//! Domain models for Fintrack

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Whether a transaction adds to or subtracts from the balance
///
/// The sign of a transaction is carried here, never by the amount:
/// amounts are always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction kind: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ledger transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// Opaque identifier scoping all ledger data
    pub owner: String,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    pub description: Option<String>,
    /// Calendar date the transaction happened (no time of day)
    pub occurred_on: NaiveDate,
    /// Server-assigned creation timestamp, immutable after insert
    pub recorded_at: DateTime<Utc>,
}

/// Input for inserting a transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub occurred_on: NaiveDate,
}

impl NewTransaction {
    /// Validate invariants before any store mutation
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.category.trim().is_empty() {
            return Err(crate::error::Error::InvalidData(
                "Category must not be empty".to_string(),
            ));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(crate::error::Error::InvalidData(format!(
                "Amount must be a non-negative number, got {}",
                self.amount
            )));
        }
        Ok(())
    }
}

/// A spending cap for one category in one (month, year) period
///
/// At most one goal exists per (owner, category, month, year); writes with a
/// colliding key replace the prior value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetGoal {
    pub id: i64,
    pub owner: String,
    pub category: String,
    pub amount: f64,
    pub month: u32,
    pub year: i32,
}

/// Input for setting a budget goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBudgetGoal {
    pub category: String,
    pub amount: f64,
    pub month: u32,
    pub year: i32,
}

impl NewBudgetGoal {
    /// Validate invariants before any store mutation
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.category.trim().is_empty() {
            return Err(crate::error::Error::InvalidData(
                "Category must not be empty".to_string(),
            ));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(crate::error::Error::InvalidData(format!(
                "Amount must be a non-negative number, got {}",
                self.amount
            )));
        }
        if !(1..=12).contains(&self.month) {
            return Err(crate::error::Error::InvalidData(format!(
                "Month must be between 1 and 12, got {}",
                self.month
            )));
        }
        if !(1000..=9999).contains(&self.year) {
            return Err(crate::error::Error::InvalidData(format!(
                "Year must be a 4-digit year, got {}",
                self.year
            )));
        }
        Ok(())
    }
}

/// Aggregate income/expense figures for a transaction set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
    /// Every expense category present exactly once
    pub expenses_by_category: BTreeMap<String, f64>,
    /// Percentage of income kept; 0 when there is no income
    pub savings_rate: f64,
}

/// Income and expense totals for one calendar month (YYYY-MM)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
}

/// Expense totals for one category over the lookback window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTrend {
    pub category: String,
    pub total_amount: f64,
    pub transaction_count: i64,
    pub avg_amount: f64,
}

/// Average expense amount for one weekday (0=Sunday..6=Saturday)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPattern {
    pub day_of_week: u32,
    pub avg_spending: f64,
}

/// All three trend aggregations over their rolling windows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingTrends {
    pub monthly_trends: Vec<MonthlyTrend>,
    pub category_trends: Vec<CategoryTrend>,
    pub daily_patterns: Vec<DailyPattern>,
}

/// Whether spending stayed inside the cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    WithinBudget,
    OverBudget,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WithinBudget => "within_budget",
            Self::OverBudget => "over_budget",
        }
    }
}

/// Budget vs. actual for one goal category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPerformance {
    pub category: String,
    pub budget: f64,
    pub actual: f64,
    /// budget minus actual; negative when over budget
    pub difference: f64,
    /// actual/budget as a percentage; 0 when the budget is 0
    pub percentage_used: f64,
    pub status: BudgetStatus,
}

/// Budget performance for one (month, year) period
///
/// `total_spent` covers the period's full expense map, including categories
/// with no goal; the per-category rows iterate goal categories only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetPerformance {
    pub budget_performance: Vec<CategoryPerformance>,
    pub total_budget: f64,
    pub total_spent: f64,
    pub overall_status: BudgetStatus,
}

/// Input for the advice orchestrator
///
/// Transactions are caller-supplied records of arbitrary key/value shape and
/// are embedded in the prompt verbatim; they need not come from the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub transactions: Vec<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub budget_goals: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub user_context: Option<String>,
}

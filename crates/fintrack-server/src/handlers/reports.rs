//! Summary and analytics handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;

use super::owner_or_default;
use super::transactions::{OwnerQuery, TransactionQuery};
use crate::{AppError, AppState, MAX_PAGE_LIMIT};
use fintrack_core::models::{BudgetPerformance, FinancialSummary, SpendingTrends};
use fintrack_core::{budget_performance, financial_summary};

/// GET /api/summary - Aggregate figures over the owner's recent transactions
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionQuery>,
) -> Result<Json<FinancialSummary>, AppError> {
    let owner = owner_or_default(&params.owner);
    let limit = params.limit.max(1).min(MAX_PAGE_LIMIT);

    let transactions = state
        .db
        .list_transactions(owner, limit)
        .map_err(AppError::from_core)?;

    Ok(Json(financial_summary(&transactions)))
}

/// GET /api/analytics/spending-trends - Rolling-window trend aggregations
pub async fn get_spending_trends(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<SpendingTrends>, AppError> {
    let owner = owner_or_default(&params.owner);
    let today = Utc::now().date_naive();

    let trends = state
        .db
        .spending_trends(owner, today)
        .map_err(AppError::from_core)?;

    Ok(Json(trends))
}

/// Query parameters for budget performance
#[derive(Debug, Deserialize)]
pub struct BudgetPerformanceQuery {
    /// Period month (1-12); defaults to the current month
    pub month: Option<u32>,
    /// Period year; defaults to the current year
    pub year: Option<i32>,
    pub owner: Option<String>,
}

/// GET /api/analytics/budget-performance - Budget vs. actual for a period
pub async fn get_budget_performance(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BudgetPerformanceQuery>,
) -> Result<Json<BudgetPerformance>, AppError> {
    let owner = owner_or_default(&params.owner);

    let today = Utc::now().date_naive();
    let month = params.month.unwrap_or_else(|| today.month());
    let year = params.year.unwrap_or_else(|| today.year());

    let performance =
        budget_performance(&state.db, owner, month, year).map_err(AppError::from_core)?;

    Ok(Json(performance))
}

//! Budget goal handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::transactions::OwnerQuery;
use super::owner_or_default;
use crate::{AppError, AppState, SuccessResponse};
use fintrack_core::models::{BudgetGoal, NewBudgetGoal};

/// Query parameters for listing budget goals
#[derive(Debug, Deserialize)]
pub struct BudgetGoalQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub owner: Option<String>,
}

/// POST /api/budget-goals - Set or replace a budget goal
pub async fn set_budget_goal(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OwnerQuery>,
    Json(goal): Json<NewBudgetGoal>,
) -> Result<Json<SuccessResponse>, AppError> {
    let owner = owner_or_default(&params.owner);

    state
        .db
        .upsert_budget_goal(owner, &goal)
        .map_err(AppError::from_core)?;

    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/budget-goals - List budget goals
///
/// The period filter applies only when both month and year are supplied.
pub async fn list_budget_goals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BudgetGoalQuery>,
) -> Result<Json<Vec<BudgetGoal>>, AppError> {
    let owner = owner_or_default(&params.owner);

    let period = match (params.month, params.year) {
        (Some(month), Some(year)) => Some((month, year)),
        _ => None,
    };

    let goals = state
        .db
        .list_budget_goals(owner, period)
        .map_err(AppError::from_core)?;

    Ok(Json(goals))
}

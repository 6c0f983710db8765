//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::owner_or_default;
use crate::{AppError, AppState, SuccessResponse, MAX_PAGE_LIMIT};
use fintrack_core::models::{NewTransaction, Transaction};

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub owner: Option<String>,
}

fn default_limit() -> i64 {
    100
}

/// Query parameters carrying only an owner
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub owner: Option<String>,
}

#[derive(Serialize)]
pub struct CreateTransactionResponse {
    pub id: i64,
}

/// POST /api/transactions - Record a transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OwnerQuery>,
    Json(new_tx): Json<NewTransaction>,
) -> Result<Json<CreateTransactionResponse>, AppError> {
    let owner = owner_or_default(&params.owner);

    let id = state
        .db
        .insert_transaction(owner, &new_tx)
        .map_err(AppError::from_core)?;

    Ok(Json(CreateTransactionResponse { id }))
}

/// GET /api/transactions - List transactions, most recent first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionQuery>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let owner = owner_or_default(&params.owner);

    // Input validation: clamp pagination parameters
    let limit = params.limit.max(1).min(MAX_PAGE_LIMIT);

    let transactions = state
        .db
        .list_transactions(owner, limit)
        .map_err(AppError::from_core)?;

    Ok(Json(transactions))
}

/// DELETE /api/transactions/:id - Delete a transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<SuccessResponse>, AppError> {
    let owner = owner_or_default(&params.owner);

    let deleted = state
        .db
        .delete_transaction(owner, id)
        .map_err(AppError::from_core)?;

    if !deleted {
        return Err(AppError::not_found("Transaction not found"));
    }

    Ok(Json(SuccessResponse { success: true }))
}

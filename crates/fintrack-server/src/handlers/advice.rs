//! Advice handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};
use fintrack_core::ai::AdviceBackend;
use fintrack_core::models::AdviceRequest;

#[derive(Serialize)]
pub struct AdviceResponse {
    pub advice: String,
}

/// POST /api/advice - Generate financial advice from a ledger snapshot
///
/// The request body carries the transaction records to analyze (arbitrary
/// key/value shape, passed through to the generator), an optional
/// category→budget mapping, and optional free-text context. Generator
/// failures surface as one opaque error; the caller decides whether to retry.
pub async fn generate_advice(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AdviceRequest>,
) -> Result<Json<AdviceResponse>, AppError> {
    let Some(client) = state.advice.as_ref() else {
        return Err(AppError::service_unavailable(
            "Advice backend not configured",
        ));
    };

    let advice = client
        .generate_advice(&request)
        .await
        .map_err(AppError::from_core)?;

    Ok(Json(AdviceResponse { advice }))
}

//! Fintrack Web Server
//!
//! Axum-based REST API for the Fintrack personal finance tracker.
//!
//! Design notes:
//! - Restrictive CORS policy (explicit origin allowlist)
//! - Input validation (pagination limits, period ranges) before any store call
//! - Sanitized error responses: internal errors are logged in full and
//!   returned to clients as a generic message
//! - The ledger owner is a query parameter that defaults to "default" at
//!   this boundary; the core requires it explicitly everywhere

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use fintrack_core::ai::{AdviceBackend, AdviceClient};
use fintrack_core::db::Database;

mod handlers;

/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Owner assigned when the caller does not name one
///
/// This is a boundary convention only; every core operation takes the owner
/// explicitly.
pub const DEFAULT_OWNER: &str = "default";

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
    /// Advice generator client, when configured
    pub advice: Option<AdviceClient>,
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
///
/// The advice client is resolved from the environment; see
/// `create_router_with_advice` to inject one (used by tests).
pub fn create_router(db: Database, config: ServerConfig) -> Router {
    let advice = AdviceClient::from_env();
    if let Some(ref client) = advice {
        info!(
            "Advice backend configured: {} (model: {})",
            client.host(),
            client.model()
        );
    } else {
        info!("ℹ️  Advice backend not configured (set GEMINI_API_KEY to enable advice)");
    }

    create_router_with_advice(db, config, advice)
}

/// Create the application router with an explicit advice client
pub fn create_router_with_advice(
    db: Database,
    config: ServerConfig,
    advice: Option<AdviceClient>,
) -> Router {
    let state = Arc::new(AppState {
        db,
        config: config.clone(),
        advice,
    });

    let api_routes = Router::new()
        // Transactions
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route("/transactions/:id", delete(handlers::delete_transaction))
        // Summary
        .route("/summary", get(handlers::get_summary))
        // Budget goals
        .route(
            "/budget-goals",
            get(handlers::list_budget_goals).post(handlers::set_budget_goal),
        )
        // Analytics
        .route(
            "/analytics/spending-trends",
            get(handlers::get_spending_trends),
        )
        .route(
            "/analytics/budget-performance",
            get(handlers::get_budget_performance),
        )
        // Advice
        .route("/advice", post(handlers::generate_advice));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        // Allow specified origins
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}

/// Start the server
pub async fn serve(db: Database, host: &str, port: u16, config: ServerConfig) -> anyhow::Result<()> {
    // Surface advice backend health once at startup; a dead backend is not
    // fatal, advice calls just fail until it recovers
    if let Some(client) = AdviceClient::from_env() {
        if !client.health_check().await {
            warn!(host = client.host(), "Advice backend is not responding");
        }
    }

    let app = create_router(db, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// API error with sanitized client response
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn bad_gateway(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn service_unavailable(msg: &str) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a core error onto its HTTP status
    ///
    /// Validation and not-found failures are deterministic and safe to show;
    /// advice failures come pre-sanitized; store failures stay internal.
    pub fn from_core(err: fintrack_core::Error) -> Self {
        use fintrack_core::Error as CoreError;

        match err {
            CoreError::InvalidData(msg) => Self::bad_request(&msg),
            CoreError::NotFound(msg) => Self::not_found(&msg),
            CoreError::Advice(msg) => Self::bad_gateway(&msg),
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "An internal error occurred".to_string(),
                internal: Some(other.into()),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;

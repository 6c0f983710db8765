//! Pluggable advice generator abstraction
//!
//! The advice generator is an external collaborator: it receives a
//! structured prompt built from ledger data and returns opaque text. This
//! module keeps the transport pluggable behind one trait.
//!
//! # Architecture
//!
//! - `AdviceBackend` trait: defines the generate/health interface
//! - `AdviceClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `GeminiBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables:
//! - `ADVICE_BACKEND`: Backend to use (gemini, mock). Default: gemini
//! - `GEMINI_API_KEY`: API key (required for gemini backend)
//! - `GEMINI_MODEL`: Model name (default: gemini-pro)
//! - `GEMINI_HOST`: Base URL override, mainly for tests
//! - `ADVICE_TIMEOUT_SECS`: Request timeout in seconds (default: 30)

mod gemini;
mod mock;
mod prompt;

pub use gemini::GeminiBackend;
pub use mock::MockBackend;
pub use prompt::build_advice_prompt;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::AdviceRequest;

/// Trait defining the interface for advice generator backends
///
/// Backends must be Send + Sync to allow use across async tasks. Any
/// backend failure surfaces as the single opaque advice error; callers see
/// no transport detail and retry at their own discretion.
#[async_trait]
pub trait AdviceBackend: Send + Sync {
    /// Generate financial advice text for the given ledger snapshot
    async fn generate_advice(&self, request: &AdviceRequest) -> Result<String>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete advice client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AdviceClient {
    /// Gemini generateContent API over HTTP
    Gemini(GeminiBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AdviceClient {
    /// Create an advice client from environment variables
    ///
    /// Checks `ADVICE_BACKEND` to determine which backend to use:
    /// - `gemini` (default): Uses GEMINI_API_KEY, GEMINI_MODEL, GEMINI_HOST
    /// - `mock`: Creates a mock backend for testing
    ///
    /// Returns None if the required environment variables are not set.
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var("ADVICE_BACKEND").unwrap_or_else(|_| "gemini".to_string());

        match backend.to_lowercase().as_str() {
            "gemini" => GeminiBackend::from_env().map(AdviceClient::Gemini),
            "mock" => Some(AdviceClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown ADVICE_BACKEND, falling back to gemini");
                GeminiBackend::from_env().map(AdviceClient::Gemini)
            }
        }
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AdviceClient::Mock(MockBackend::new())
    }
}

// Implement AdviceBackend for AdviceClient by delegating to the inner backend
#[async_trait]
impl AdviceBackend for AdviceClient {
    async fn generate_advice(&self, request: &AdviceRequest) -> Result<String> {
        match self {
            AdviceClient::Gemini(b) => b.generate_advice(request).await,
            AdviceClient::Mock(b) => b.generate_advice(request).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AdviceClient::Gemini(b) => b.health_check().await,
            AdviceClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AdviceClient::Gemini(b) => b.model(),
            AdviceClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AdviceClient::Gemini(b) => b.host(),
            AdviceClient::Mock(b) => b.host(),
        }
    }
}

//! Test utilities for fintrack-core
//!
//! This module provides testing infrastructure including a mock advice
//! server that speaks the Gemini generateContent wire shape, for
//! development and integration tests without real credentials.

use std::net::SocketAddr;

use axum::{
    extract::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// Mock advice server for testing and development
pub struct MockAdviceServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockAdviceServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/v1beta/models", get(handle_models))
            .route("/v1beta/models/:model_action", post(handle_generate));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockAdviceServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Model list endpoint (health check)
async fn handle_models() -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: vec![ModelInfo {
            name: "models/gemini-pro".to_string(),
        }],
    })
}

/// generateContent endpoint
///
/// Echoes a canned advice string that references how much prompt text was
/// received, so tests can assert the prompt actually reached the wire.
async fn handle_generate(Json(request): Json<GenerateRequest>) -> Json<GenerateResponse> {
    let prompt_len: usize = request
        .contents
        .iter()
        .flat_map(|c| c.parts.iter())
        .map(|p| p.text.len())
        .sum();

    Json(GenerateResponse {
        candidates: vec![Candidate {
            content: CandidateContent {
                parts: vec![CandidatePart {
                    text: format!(
                        "Your finances look manageable. (analyzed {} prompt characters)",
                        prompt_len
                    ),
                }],
            },
        }],
    })
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    #[serde(default)]
    contents: Vec<RequestContent>,
}

#[derive(Debug, Deserialize)]
struct RequestContent {
    #[serde(default)]
    parts: Vec<RequestPart>,
}

#[derive(Debug, Deserialize)]
struct RequestPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Serialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Serialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Serialize)]
struct CandidatePart {
    text: String,
}

#[derive(Debug, Serialize)]
struct ModelsResponse {
    models: Vec<ModelInfo>,
}

#[derive(Debug, Serialize)]
struct ModelInfo {
    name: String,
}

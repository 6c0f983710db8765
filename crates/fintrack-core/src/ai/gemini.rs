//! Gemini backend implementation
//!
//! HTTP client for the Gemini generateContent API. Requests carry a timeout
//! so an advice call can never block a caller indefinitely; on any failure
//! the caller sees one opaque advice error while the transport detail goes
//! to the log.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::AdviceRequest;

use super::prompt::build_advice_prompt;
use super::AdviceBackend;

/// Default public API host
const DEFAULT_HOST: &str = "https://generativelanguage.googleapis.com";

/// Default model when GEMINI_MODEL is unset
const DEFAULT_MODEL: &str = "gemini-pro";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Message shown to callers for every generator failure
const ADVICE_FAILED: &str = "advice generation failed";

/// Gemini advice backend
pub struct GeminiBackend {
    http_client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl Clone for GeminiBackend {
    fn clone(&self) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
        }
    }
}

impl GeminiBackend {
    /// Create a new Gemini backend
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self::with_timeout(
            base_url,
            api_key,
            model,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create with an explicit request timeout
    pub fn with_timeout(base_url: &str, api_key: &str, model: &str, timeout: Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    /// Create from environment variables
    ///
    /// Requires `GEMINI_API_KEY`; `GEMINI_HOST`, `GEMINI_MODEL`, and
    /// `ADVICE_TIMEOUT_SECS` are optional overrides.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").ok()?;
        let host = std::env::var("GEMINI_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout = std::env::var("ADVICE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Some(Self::with_timeout(
            &host,
            &api_key,
            &model,
            Duration::from_secs(timeout),
        ))
    }
}

/// Request body for the generateContent endpoint
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

/// Response from the generateContent endpoint
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl AdviceBackend for GeminiBackend {
    async fn generate_advice(&self, request: &AdviceRequest) -> Result<String> {
        let prompt = build_advice_prompt(request);

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = match self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "Advice generator request failed");
                return Err(Error::Advice(ADVICE_FAILED.to_string()));
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "Advice generator returned error status");
            return Err(Error::Advice(ADVICE_FAILED.to_string()));
        }

        let parsed: GenerateContentResponse = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "Advice generator returned malformed response");
                return Err(Error::Advice(ADVICE_FAILED.to_string()));
            }
        };

        let text: String = parsed
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            warn!("Advice generator returned no usable text");
            return Err(Error::Advice(ADVICE_FAILED.to_string()));
        }

        debug!(chars = text.len(), "Advice generated");
        Ok(text)
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/v1beta/models", self.base_url);
        match self
            .http_client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockAdviceServer;

    #[tokio::test]
    async fn test_generate_against_mock_server() {
        let server = MockAdviceServer::start().await;
        let backend = GeminiBackend::new(&server.url(), "test-key", "gemini-pro");

        assert!(backend.health_check().await);

        let mut tx = serde_json::Map::new();
        tx.insert("category".to_string(), serde_json::json!("food"));
        tx.insert("amount".to_string(), serde_json::json!(250.0));
        tx.insert("type".to_string(), serde_json::json!("expense"));

        let request = AdviceRequest {
            transactions: vec![tx],
            budget_goals: None,
            user_context: Some("trying to cut grocery spend".to_string()),
        };

        let advice = backend.generate_advice(&request).await.unwrap();
        assert!(advice.contains("finances"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_opaque() {
        // Nothing listens on this port; the transport error must not leak
        let backend = GeminiBackend::new("http://127.0.0.1:9", "test-key", "gemini-pro");

        let result = backend.generate_advice(&AdviceRequest::default()).await;
        match result {
            Err(Error::Advice(msg)) => assert_eq!(msg, "advice generation failed"),
            other => panic!("Expected opaque advice error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_health_check_failure() {
        let backend = GeminiBackend::new("http://127.0.0.1:9", "test-key", "gemini-pro");
        assert!(!backend.health_check().await);
    }

    #[test]
    fn test_from_env_requires_api_key() {
        // The constructor reads the environment; without a key there is no
        // backend. Guarded against parallel tests mutating the variable.
        if std::env::var("GEMINI_API_KEY").is_err() {
            assert!(GeminiBackend::from_env().is_none());
        }
    }
}

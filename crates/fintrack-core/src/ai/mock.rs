//! Mock backend for testing
//!
//! Returns deterministic advice without a network call. Useful for unit
//! tests and development without API credentials.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::AdviceRequest;

use super::AdviceBackend;

/// Mock advice backend for testing
#[derive(Clone)]
pub struct MockBackend {
    /// Whether health_check should return true and generation succeed
    pub healthy: bool,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self { healthy: true }
    }

    /// Create an unhealthy mock backend that fails every call
    pub fn unhealthy() -> Self {
        Self { healthy: false }
    }
}

#[async_trait]
impl AdviceBackend for MockBackend {
    async fn generate_advice(&self, request: &AdviceRequest) -> Result<String> {
        if !self.healthy {
            return Err(Error::Advice("advice generation failed".to_string()));
        }

        let goal_count = request
            .budget_goals
            .as_ref()
            .map(|g| g.len())
            .unwrap_or(0);

        Ok(format!(
            "Mock advice: reviewed {} transactions and {} budget goals. \
             Keep fixed costs low and put the surplus into savings.",
            request.transactions.len(),
            goal_count
        ))
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_generates_deterministic_advice() {
        let backend = MockBackend::new();
        let advice = backend
            .generate_advice(&AdviceRequest::default())
            .await
            .unwrap();
        assert!(advice.contains("0 transactions"));
    }

    #[tokio::test]
    async fn test_unhealthy_mock_fails_opaquely() {
        let backend = MockBackend::unhealthy();
        let result = backend.generate_advice(&AdviceRequest::default()).await;
        match result {
            Err(Error::Advice(msg)) => assert_eq!(msg, "advice generation failed"),
            other => panic!("Expected advice error, got {:?}", other.map(|_| ())),
        }
    }
}

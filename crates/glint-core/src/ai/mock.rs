//! Mock backend for testing
//!
//! Returns a fixed response for every prompt. Can be configured to return
//! empty text (simulating an unparseable provider response) or to fail with
//! a transport-style error.

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::TextGenerator;

/// Mock generation backend for testing
#[derive(Clone)]
pub struct MockBackend {
    /// Text returned for every prompt
    pub response: String,
    /// When true, generate returns an error instead of text
    pub failing: bool,
    /// Whether health_check should return true
    pub healthy: bool,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a new mock backend with a canned response
    pub fn new() -> Self {
        Self {
            response: "Mock insight text".to_string(),
            failing: false,
            healthy: true,
        }
    }

    /// Create a mock backend returning a specific response
    pub fn with_response(response: &str) -> Self {
        Self {
            response: response.to_string(),
            ..Self::new()
        }
    }

    /// Create a mock backend whose generate calls fail
    pub fn failing() -> Self {
        Self {
            failing: true,
            healthy: false,
            ..Self::new()
        }
    }
}

#[async_trait]
impl TextGenerator for MockBackend {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        if self.failing {
            return Err(Error::InvalidData("mock transport failure".to_string()));
        }
        Ok(self.response.clone())
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

//! Pluggable text-generation provider abstraction
//!
//! This module provides a backend-agnostic interface for generating insight
//! text. Exactly one backend is active per job run.
//!
//! # Architecture
//!
//! - `TextGenerator` trait: defines the interface all backends implement
//! - `GenClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `GeminiBackend`, `OpenAiBackend`, `MockBackend`
//!
//! # Selection
//!
//! `GenClient::from_config` resolves the backend once from credentials:
//! a Gemini key wins over an OpenAI key, and with neither configured there
//! is no client at all (the job must not run). The caller cannot tell which
//! backend produced a result: both take a prompt and return best-effort
//! text, degrading to an empty string when the response cannot be parsed.

mod gemini;
mod mock;
mod openai;

pub use gemini::GeminiBackend;
pub use mock::MockBackend;
pub use openai::OpenAiBackend;

use async_trait::async_trait;

use crate::config::ProviderConfig;
use crate::error::Result;

/// Maximum output tokens requested from either provider
pub const MAX_OUTPUT_TOKENS: u32 = 400;

/// Per-request timeout for provider calls
///
/// A hung provider call becomes a transport error for the household being
/// processed instead of stalling the rest of the run.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Trait defining the interface for all generation backends
///
/// `generate` propagates transport errors and degrades malformed or
/// field-missing responses to an empty string. Backends must be
/// Send + Sync to allow use across async tasks.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete generation client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum GenClient {
    /// Gemini text-completion backend (primary)
    Gemini(GeminiBackend),
    /// OpenAI chat-completion backend (secondary)
    OpenAi(OpenAiBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl GenClient {
    /// Resolve a client from provider configuration
    ///
    /// Precedence: Gemini key > OpenAI key. Returns None when neither
    /// credential is configured; the caller treats that as a job-level
    /// precondition failure, not a per-household error.
    pub fn from_config(config: &ProviderConfig) -> Option<Self> {
        if let Some(ref key) = config.gemini_key {
            return Some(GenClient::Gemini(GeminiBackend::new(
                key,
                config.gemini_model(),
            )));
        }
        if let Some(ref key) = config.openai_key {
            return Some(GenClient::OpenAi(OpenAiBackend::new(key)));
        }
        None
    }

    /// Create a mock client for testing
    pub fn mock() -> Self {
        GenClient::Mock(MockBackend::new())
    }
}

// Implement TextGenerator for GenClient by delegating to the inner backend
#[async_trait]
impl TextGenerator for GenClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        match self {
            GenClient::Gemini(b) => b.generate(prompt).await,
            GenClient::OpenAi(b) => b.generate(prompt).await,
            GenClient::Mock(b) => b.generate(prompt).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            GenClient::Gemini(b) => b.health_check().await,
            GenClient::OpenAi(b) => b.health_check().await,
            GenClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            GenClient::Gemini(b) => b.model(),
            GenClient::OpenAi(b) => b.model(),
            GenClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            GenClient::Gemini(b) => b.host(),
            GenClient::OpenAi(b) => b.host(),
            GenClient::Mock(b) => b.host(),
        }
    }
}

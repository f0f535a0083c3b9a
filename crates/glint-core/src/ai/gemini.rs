//! Gemini text-completion backend (primary provider)
//!
//! Calls the generative language `:generateText` endpoint with the access
//! key passed as a query parameter. The response is parsed leniently: a
//! body without `candidates` (or one that is not valid JSON at all) yields
//! an empty string rather than an error. Only transport-level failures
//! propagate to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

use super::{TextGenerator, MAX_OUTPUT_TOKENS, REQUEST_TIMEOUT_SECS};

/// Default API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta2";

/// Gemini backend
#[derive(Clone)]
pub struct GeminiBackend {
    http_client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiBackend {
    /// Create a new Gemini backend against the production endpoint
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Create a backend against a custom base URL (used by tests)
    pub fn with_base_url(api_key: &str, model: &str, base_url: &str) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

/// Text generation request body
#[derive(Debug, Serialize)]
struct GenerateTextRequest {
    prompt: TextPrompt,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct TextPrompt {
    text: String,
}

/// Text generation response body
///
/// Every field defaults so a partial or malformed body deserializes to an
/// empty candidate list instead of failing.
#[derive(Debug, Default, Deserialize)]
struct GenerateTextResponse {
    #[serde(default)]
    candidates: Vec<TextCandidate>,
}

#[derive(Debug, Default, Deserialize)]
struct TextCandidate {
    #[serde(default)]
    output: String,
}

#[async_trait]
impl TextGenerator for GeminiBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateTextRequest {
            prompt: TextPrompt {
                text: prompt.to_string(),
            },
            max_output_tokens: MAX_OUTPUT_TOKENS,
        };

        let url = format!("{}/{}:generateText", self.base_url, self.model);
        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let body = response.bytes().await?;
        let parsed: GenerateTextResponse = match serde_json::from_slice(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!("Unparseable Gemini response, treating as empty: {}", e);
                return Ok(String::new());
            }
        };

        Ok(parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| c.output)
            .unwrap_or_default())
    }

    async fn health_check(&self) -> bool {
        // The generateText API has no dedicated health endpoint; reaching
        // the base URL at all is treated as healthy.
        self.http_client.get(&self.base_url).send().await.is_ok()
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

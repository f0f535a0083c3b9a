//! OpenAI chat-completion backend (secondary provider)
//!
//! Calls `/v1/chat/completions` with bearer-token authentication, sending
//! the prompt as a single user message against a fixed chat model. Response
//! parsing mirrors the Gemini backend: missing `choices` or an unparseable
//! body degrade to an empty string, transport failures propagate.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

use super::{TextGenerator, MAX_OUTPUT_TOKENS, REQUEST_TIMEOUT_SECS};

/// Default API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Fixed chat model used for insight generation
const CHAT_MODEL: &str = "gpt-3.5-turbo";

/// OpenAI backend
#[derive(Clone)]
pub struct OpenAiBackend {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiBackend {
    /// Create a new OpenAI backend against the production endpoint
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a backend against a custom base URL (used by tests)
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

/// Chat completion request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat completion response body, parsed leniently
#[derive(Debug, Default, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Default, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: ChatResponseMessage,
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: String,
}

#[async_trait]
impl TextGenerator for OpenAiBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: CHAT_MODEL.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        let response = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let body = response.bytes().await?;
        let parsed: ChatCompletionResponse = match serde_json::from_slice(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!("Unparseable OpenAI response, treating as empty: {}", e);
                return Ok(String::new());
            }
        };

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default())
    }

    async fn health_check(&self) -> bool {
        if let Ok(resp) = self
            .http_client
            .get(format!("{}/v1/models", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
        {
            return resp.status().is_success();
        }
        false
    }

    fn model(&self) -> &str {
        CHAT_MODEL
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

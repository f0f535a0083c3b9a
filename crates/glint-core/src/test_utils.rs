//! Test utilities for glint-core
//!
//! Provides a mock provider server speaking both the Gemini `:generateText`
//! shape and the OpenAI `/v1/chat/completions` shape, so gateway behavior
//! can be exercised over real HTTP in integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{RawQuery, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::oneshot;

/// How the mock server should answer generation requests
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Well-formed response carrying this text
    Text(String),
    /// Valid JSON missing the candidates/choices field entirely
    MissingFields,
    /// A body that is not JSON at all
    Garbage,
}

#[derive(Clone)]
struct MockState {
    reply: Arc<Mutex<MockReply>>,
    requests: Arc<Mutex<Vec<Value>>>,
    /// Raw query strings seen on the Gemini-shaped endpoint
    queries: Arc<Mutex<Vec<String>>>,
    /// Authorization headers seen on the chat endpoint
    auth_headers: Arc<Mutex<Vec<String>>>,
}

/// Mock provider server for testing
pub struct MockProviderServer {
    addr: SocketAddr,
    state: MockState,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockProviderServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let state = MockState {
            reply: Arc::new(Mutex::new(MockReply::Text("Mock insight".to_string()))),
            requests: Arc::new(Mutex::new(Vec::new())),
            queries: Arc::new(Mutex::new(Vec::new())),
            auth_headers: Arc::new(Mutex::new(Vec::new())),
        };

        let app = Router::new()
            .route("/:model_call", post(handle_generate_text))
            .route("/v1/chat/completions", post(handle_chat_completions))
            .with_state(state.clone());

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
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Configure the next replies
    pub fn set_reply(&self, reply: MockReply) {
        *self.state.reply.lock().unwrap() = reply;
    }

    /// Request bodies received so far
    pub fn requests(&self) -> Vec<Value> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Query strings seen on the Gemini-shaped endpoint
    pub fn queries(&self) -> Vec<String> {
        self.state.queries.lock().unwrap().clone()
    }

    /// Authorization headers seen on the chat endpoint
    pub fn auth_headers(&self) -> Vec<String> {
        self.state.auth_headers.lock().unwrap().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockProviderServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Gemini-shaped endpoint (`POST /{model}:generateText`)
async fn handle_generate_text(
    State(state): State<MockState>,
    RawQuery(query): RawQuery,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.requests.lock().unwrap().push(body);
    state.queries.lock().unwrap().push(query.unwrap_or_default());

    let reply = state.reply.lock().unwrap().clone();
    match reply {
        MockReply::Text(text) => {
            Json(json!({ "candidates": [{ "output": text }] })).into_response()
        }
        MockReply::MissingFields => Json(json!({ "filters": [] })).into_response(),
        MockReply::Garbage => "not json".into_response(),
    }
}

/// OpenAI-shaped endpoint (`POST /v1/chat/completions`)
async fn handle_chat_completions(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.requests.lock().unwrap().push(body);
    state.auth_headers.lock().unwrap().push(
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string(),
    );

    let reply = state.reply.lock().unwrap().clone();
    match reply {
        MockReply::Text(text) => Json(json!({
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": text },
                "finish_reason": "stop"
            }]
        }))
        .into_response(),
        MockReply::MissingFields => {
            Json(json!({ "error": { "message": "bad request" } })).into_response()
        }
        MockReply::Garbage => "not json".into_response(),
    }
}

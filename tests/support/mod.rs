//! Shared fixtures for the integration tests
//!
//! - [`MockServer`]: in-process OpenAI-compatible server with canned replies
//! - [`closed_port`]: a local port with nothing listening on it

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use lmbridge_core::ServerEndpoint;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

// ============================================================================
// Canned replies
// ============================================================================

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn json(value: Value) -> Self {
        Self::raw(value.to_string())
    }

    pub fn raw(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(code: u16) -> Self {
        Self {
            status: StatusCode::from_u16(code).expect("valid status code"),
            body: json!({ "error": "mock failure" }).to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// `/v1/models` body listing `ids` in order
pub fn models_body(ids: &[&str]) -> Value {
    let data: Vec<Value> = ids
        .iter()
        .map(|id| json!({ "id": id, "object": "model", "owned_by": "organization_owner" }))
        .collect();
    json!({ "object": "list", "data": data })
}

/// `/v1/chat/completions` body with one choice
pub fn chat_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

// ============================================================================
// Mock server
// ============================================================================

#[derive(Clone)]
struct MockState {
    models: Reply,
    chat: Reply,
    model_hits: Arc<AtomicUsize>,
    chat_hits: Arc<AtomicUsize>,
    last_chat: Arc<Mutex<Option<Value>>>,
    last_auth: Arc<Mutex<Option<String>>>,
}

pub struct MockServer {
    addr: SocketAddr,
    state: MockState,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(models: Reply, chat: Reply) -> Self {
        let state = MockState {
            models,
            chat,
            model_hits: Arc::new(AtomicUsize::new(0)),
            chat_hits: Arc::new(AtomicUsize::new(0)),
            last_chat: Arc::new(Mutex::new(None)),
            last_auth: Arc::new(Mutex::new(None)),
        };
        let app = Router::new()
            .route("/v1/models", get(models_handler))
            .route("/v1/chat/completions", post(chat_handler))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Server that lists `ids` and answers every chat with `content`
    pub async fn with_models(ids: &[&str], content: &str) -> Self {
        Self::start(Reply::json(models_body(ids)), Reply::json(chat_body(content))).await
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn endpoint(&self) -> ServerEndpoint {
        ServerEndpoint::new(self.base_url())
    }

    pub fn model_hits(&self) -> usize {
        self.state.model_hits.load(Ordering::SeqCst)
    }

    pub fn chat_hits(&self) -> usize {
        self.state.chat_hits.load(Ordering::SeqCst)
    }

    /// JSON body of the most recent chat completion request
    pub fn last_chat_request(&self) -> Option<Value> {
        self.state.last_chat.lock().expect("lock").clone()
    }

    /// `Authorization` header of the most recent request
    pub fn last_authorization(&self) -> Option<String> {
        self.state.last_auth.lock().expect("lock").clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn models_handler(State(state): State<MockState>, headers: HeaderMap) -> Response {
    state.model_hits.fetch_add(1, Ordering::SeqCst);
    record_auth(&state, &headers);
    respond(&state.models).await
}

async fn chat_handler(State(state): State<MockState>, headers: HeaderMap, body: Bytes) -> Response {
    state.chat_hits.fetch_add(1, Ordering::SeqCst);
    record_auth(&state, &headers);
    *state.last_chat.lock().expect("lock") = serde_json::from_slice(&body).ok();
    respond(&state.chat).await
}

fn record_auth(state: &MockState, headers: &HeaderMap) {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    *state.last_auth.lock().expect("lock") = auth;
}

async fn respond(reply: &Reply) -> Response {
    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }
    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body.clone(),
    )
        .into_response()
}

// ============================================================================
// Ports
// ============================================================================

/// A port that was free a moment ago; nothing listens on it
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let port = listener.local_addr().expect("probe port address").port();
    drop(listener);
    port
}

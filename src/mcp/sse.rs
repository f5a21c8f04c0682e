//! MCP SSE transport
//!
//! The HTTP transport the upstream server runs by default: a client opens
//! `GET /sse` and receives an `endpoint` event naming the POST path for its
//! session, then JSON-RPC requests posted to `/messages?session_id=…` are
//! answered with `message` events on the session's stream.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use futures::stream::{self, Stream, StreamExt};
use tokio::sync::mpsc;

use crate::error::{McpError, Result};
use crate::mcp::server::McpServer;
use crate::mcp::types::JsonRpcResponse;

/// Buffered responses per session before POSTs start failing
const SESSION_CHANNEL_CAPACITY: usize = 32;

/// Shared state for the SSE transport
pub struct SseState {
    /// The JSON-RPC dispatcher
    server: Arc<McpServer>,

    /// Open sessions, keyed by session id
    sessions: Mutex<HashMap<String, mpsc::Sender<JsonRpcResponse>>>,
}

impl SseState {
    pub fn new(server: Arc<McpServer>) -> Self {
        Self {
            server,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Lock the session map, recovering from a poisoned lock
    fn sessions(&self) -> MutexGuard<'_, HashMap<String, mpsc::Sender<JsonRpcResponse>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Removes the session entry when the stream that owns it is dropped
struct SessionGuard {
    state: Arc<SseState>,
    session_id: String,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.state.sessions().remove(&self.session_id);
        tracing::info!(session_id = %self.session_id, "SSE session closed");
    }
}

/// Build the axum router for the SSE transport
pub fn router(state: Arc<SseState>) -> Router {
    Router::new()
        .route("/sse", get(sse_handler))
        .route("/messages", post(messages_handler))
        .with_state(state)
}

/// Run the SSE transport until the listener fails
pub async fn run_sse(server: Arc<McpServer>, host: &str, port: u16) -> Result<()> {
    let state = Arc::new(SseState::new(server));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!(host, port, "SSE transport listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| McpError::TransportError {
            message: e.to_string(),
        })?;

    Ok(())
}

/// `GET /sse` — open a session and stream responses
async fn sse_handler(
    State(state): State<Arc<SseState>>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let session_id = uuid::Uuid::new_v4().to_string();
    let (tx, rx) = mpsc::channel::<JsonRpcResponse>(SESSION_CHANNEL_CAPACITY);

    state.sessions().insert(session_id.clone(), tx);

    tracing::info!(session_id = %session_id, "SSE session opened");

    // Dropped with the stream when the client disconnects
    let guard = SessionGuard {
        state,
        session_id: session_id.clone(),
    };

    // First event tells the client where to POST its requests
    let endpoint = format!("/messages?session_id={}", session_id);
    let endpoint_event =
        stream::once(async move { Ok(Event::default().event("endpoint").data(endpoint)) });

    let message_events = stream::unfold((rx, guard), |(mut rx, guard)| async move {
        let response = rx.recv().await?;
        let data = serde_json::to_string(&response).unwrap_or_else(|e| {
            format!(
                r#"{{"jsonrpc":"2.0","id":null,"error":{{"code":-32603,"message":"{}"}}}}"#,
                e
            )
        });
        Some((Ok(Event::default().event("message").data(data)), (rx, guard)))
    });

    Sse::new(endpoint_event.chain(message_events)).keep_alive(KeepAlive::default())
}

/// Query parameters for `POST /messages`
#[derive(Debug, serde::Deserialize)]
struct MessagesQuery {
    session_id: String,
}

/// `POST /messages` — accept a JSON-RPC request for a session
async fn messages_handler(
    State(state): State<Arc<SseState>>,
    Query(query): Query<MessagesQuery>,
    body: String,
) -> impl IntoResponse {
    let sender = state.sessions().get(&query.session_id).cloned();

    let Some(sender) = sender else {
        return (StatusCode::NOT_FOUND, "Unknown session".to_string());
    };

    let response = state.server.handle_message(&body).await;

    if let Some(response) = response {
        if sender.send(response).await.is_err() {
            // Stream side went away; the guard has removed (or is removing) it
            return (StatusCode::GONE, "Session closed".to_string());
        }
    }

    (StatusCode::ACCEPTED, "Accepted".to_string())
}

//! In-process real-time channel.
//!
//! Every WebSocket connection gets its own session id and an outgoing queue.
//! Uploads address that queue through [`Notifier::publish`].

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use dashmap::DashMap;
use futures::{SinkExt, StreamExt};
use serde_json::json;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::notifier::{NotificationError, Notifier};
use crate::state::AppState;

/// event sent to a client right after it connects
pub const CONNECT_EVENT: &str = "connect";

pub type Tx = mpsc::UnboundedSender<String>;

/// session id -> outgoing queue of one connected client
#[derive(Default)]
pub struct SessionHub {
    sessions: DashMap<String, Tx>,
}

impl SessionHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, session_id: impl Into<String>, tx: Tx) {
        self.sessions.insert(session_id.into(), tx);
    }

    pub fn unregister(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Notifier for SessionHub {
    fn publish(&self, session_id: &str, event: &str, payload: serde_json::Value) -> Result<(), NotificationError> {
        let tx = self
            .sessions
            .get(session_id)
            .ok_or_else(|| NotificationError::UnknownSession(session_id.to_string()))?;

        let message = serde_json::to_string(&json!({ "event": event, "data": payload }))?;
        tx.send(message)
            .map_err(|_| NotificationError::ChannelClosed(session_id.to_string()))
    }
}

// upgrade to a websocket and attach it to the hub
pub async fn ws_handler(State(state): State<Arc<AppState>>, ws: WebSocketUpgrade) -> Response {
    let hub = state.hub.clone();
    ws.on_upgrade(move |socket| client_connected(socket, hub))
}

async fn client_connected(socket: WebSocket, hub: Arc<SessionHub>) {
    let session_id = Uuid::new_v4().to_string();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    hub.register(session_id.clone(), tx);
    tracing::info!("🔌 Client connected: {}", session_id);

    if let Err(e) = hub.publish(&session_id, CONNECT_EVENT, json!({ "socketId": session_id })) {
        tracing::warn!("Failed to greet {}: {}", session_id, e);
    }

    let (mut ws_tx, mut ws_rx) = socket.split();

    // forward queued events to the socket
    let forward = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if ws_tx.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    // the client has nothing to say, just wait for it to go away
    while let Some(msg) = ws_rx.next().await {
        match msg {
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => {}
        }
    }

    hub.unregister(&session_id);
    forward.abort();
    tracing::info!("Client disconnected: {}", session_id);
}

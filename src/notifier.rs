use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

/// event carrying per-file upload progress
pub const UPLOAD_PROGRESS_EVENT: &str = "file-upload";
/// event published once every file of a request has been stored
pub const UPLOAD_COMPLETE_EVENT: &str = "upload-complete";

/// failures delivering an event to a session channel.
/// these never abort an upload, they only get logged.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("no session registered under id {0:?}")]
    UnknownSession(String),

    #[error("session {0:?} closed its channel")]
    ChannelClosed(String),

    #[error("failed to encode event payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// publish side of the real-time channel, keyed by session id
pub trait Notifier: Send + Sync {
    fn publish(&self, session_id: &str, event: &str, payload: serde_json::Value) -> Result<(), NotificationError>;
}

/// a notifier handle bound to one session
#[derive(Clone)]
pub struct SessionNotifier {
    session_id: String,
    notifier: Arc<dyn Notifier>,
}

impl SessionNotifier {
    pub fn new(notifier: Arc<dyn Notifier>, session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            notifier,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// best-effort publish, errors are logged and dropped
    pub fn notify<T: Serialize>(&self, event: &str, payload: &T) {
        let result = serde_json::to_value(payload)
            .map_err(NotificationError::from)
            .and_then(|value| self.notifier.publish(&self.session_id, event, value));

        if let Err(e) = result {
            tracing::warn!("Failed to publish {} to session {}: {}", event, self.session_id, e);
        }
    }
}

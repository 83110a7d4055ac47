use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notifier::{SessionNotifier, UPLOAD_PROGRESS_EVENT};
use crate::throttle::ThrottleGate;

/// progress notification for a single file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub filename: String,
    pub processed_already: u64,
}

/// per-field counter, owned by exactly one tracker
#[derive(Debug, Clone)]
pub struct ProgressState {
    pub filename: String,
    pub bytes_processed: u64,
    pub last_notified_at: Option<DateTime<Utc>>,
}

impl ProgressState {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            bytes_processed: 0,
            last_notified_at: None,
        }
    }
}

/// counts the bytes of one field as they pass through and reports
/// the running total, at most once per throttle window.
///
/// the tracker only looks at chunks; the caller forwards them.
pub struct ProgressTracker {
    state: ProgressState,
    gate: ThrottleGate,
    notifier: SessionNotifier,
}

impl ProgressTracker {
    pub fn new(state: ProgressState, gate: ThrottleGate, notifier: SessionNotifier) -> Self {
        Self { state, gate, notifier }
    }

    pub fn bytes_processed(&self) -> u64 {
        self.state.bytes_processed
    }

    /// account for one chunk and maybe publish progress
    pub fn observe(&mut self, chunk: &[u8]) {
        self.state.bytes_processed += chunk.len() as u64;
        tracing::trace!("{}: {} bytes so far", self.state.filename, self.state.bytes_processed);

        if let Some(now) = self.gate.admit(self.state.last_notified_at) {
            self.notifier.notify(
                UPLOAD_PROGRESS_EVENT,
                &ProgressEvent {
                    filename: self.state.filename.clone(),
                    processed_already: self.state.bytes_processed,
                },
            );
            self.state.last_notified_at = Some(now);
        }
    }

    pub fn finish(self) -> ProgressState {
        self.state
    }
}

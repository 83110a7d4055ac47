#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::path::Path;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use chrono::{DateTime, TimeZone, Utc};
use filedrop::notifier::{NotificationError, Notifier};
use filedrop::throttle::Clock;
use filedrop::sink::Storage;
use tokio::io::AsyncWrite;

/// notifier that remembers every publish
#[derive(Default)]
pub struct RecordingNotifier {
    pub events: Mutex<Vec<(String, String, serde_json::Value)>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn named(&self, event: &str) -> Vec<serde_json::Value> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, name, _)| name == event)
            .map(|(_, _, payload)| payload.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn publish(&self, session_id: &str, event: &str, payload: serde_json::Value) -> Result<(), NotificationError> {
        if self.fail {
            return Err(NotificationError::UnknownSession(session_id.to_string()));
        }
        self.events
            .lock()
            .unwrap()
            .push((session_id.to_string(), event.to_string(), payload));
        Ok(())
    }
}

/// storage whose writers reject every write
pub struct FailingStorage;

pub struct FailingWriter;

impl AsyncWrite for FailingWriter {
    fn poll_write(self: Pin<&mut Self>, _: &mut Context<'_>, _: &[u8]) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(io::Error::other("disk full")))
    }

    fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

impl Storage for FailingStorage {
    type Writer = FailingWriter;

    async fn create(&self, _path: &Path) -> io::Result<FailingWriter> {
        Ok(FailingWriter)
    }
}

/// replays a fixed list of timestamps, one per read.
/// once the list runs out the last timestamp keeps being returned.
#[derive(Debug, Default)]
pub struct ScriptedClock {
    ticks: Mutex<(VecDeque<DateTime<Utc>>, Option<DateTime<Utc>>)>,
}

impl ScriptedClock {
    pub fn new(ticks: impl IntoIterator<Item = DateTime<Utc>>) -> Self {
        Self {
            ticks: Mutex::new((ticks.into_iter().collect(), None)),
        }
    }
}

impl Clock for ScriptedClock {
    fn now(&self) -> DateTime<Utc> {
        let mut guard = self.ticks.lock().unwrap_or_else(|p| p.into_inner());
        let (queue, last) = &mut *guard;
        match queue.pop_front() {
            Some(tick) => {
                *last = Some(tick);
                tick
            }
            None => last.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        }
    }
}

/// 2021-07-01 01:01:<secs>
pub fn at(secs: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 7, 1, 1, 1, secs).unwrap()
}

pub const BOUNDARY: &str = "X-FILEDROP-BOUNDARY";

/// multipart body with one part per (field, filename, content); filename None makes a text field
pub fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (field, filename, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    field, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", field).as_bytes(),
            ),
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

pub fn shared(notifier: RecordingNotifier) -> Arc<RecordingNotifier> {
    Arc::new(notifier)
}

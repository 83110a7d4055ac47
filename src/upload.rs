use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::Multipart;
use futures::{Stream, StreamExt};
use serde::Serialize;

use crate::error::UploadError;
use crate::notifier::{SessionNotifier, UPLOAD_COMPLETE_EVENT};
use crate::progress::{ProgressState, ProgressTracker};
use crate::sink::{FileSink, Storage};
use crate::throttle::ThrottleGate;
use crate::utils::sanitize_filename;

/// outcome of one stored field
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    pub field: String,
    pub filename: String,
    pub bytes: u64,
}

/// outcome of a whole request, also the payload of the completion event
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadReport {
    pub files: Vec<FieldReport>,
    pub total_bytes: u64,
}

/// drives every file field of one request through tracker and sink.
///
/// holds nothing mutable, so fields can be processed concurrently
/// through a shared reference.
pub struct UploadOrchestrator<S> {
    storage: Arc<S>,
    destination: PathBuf,
    notifier: SessionNotifier,
    gate: ThrottleGate,
}

impl<S: Storage> UploadOrchestrator<S> {
    pub fn new(storage: Arc<S>, destination: PathBuf, notifier: SessionNotifier, gate: ThrottleGate) -> Self {
        Self {
            storage,
            destination,
            notifier,
            gate,
        }
    }

    /// consume the whole multipart body, storing every file field.
    /// resolves once all sinks are closed, or with the first error.
    pub async fn register_upload(&self, mut multipart: Multipart) -> Result<UploadReport, UploadError> {
        tracing::debug!("Registering upload for session {}", self.notifier.session_id());
        let mut report = UploadReport::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            tracing::error!("Failed to read multipart field: {}", e);
            UploadError::Parse(e.to_string())
        })? {
            let Some(file_name) = field.file_name().map(str::to_owned) else {
                tracing::trace!("Skipping non-file field {:?}", field.name());
                continue;
            };
            // a file input left empty still sends a part, with filename=""
            if file_name.is_empty() {
                tracing::trace!("Skipping empty file field {:?}", field.name());
                continue;
            }
            let field_name = field.name().unwrap_or_default().to_owned();

            let stored = self.process_field(&field_name, &file_name, field).await?;
            report.total_bytes += stored.bytes;
            report.files.push(stored);
        }

        self.notifier.notify(UPLOAD_COMPLETE_EVENT, &report);
        tracing::info!(
            "✅ Upload finished for session {}: {} files ({} bytes)",
            self.notifier.session_id(),
            report.files.len(),
            report.total_bytes
        );
        Ok(report)
    }

    /// run a single field pipeline to completion
    pub async fn process_field<St, E>(
        &self,
        field_name: &str,
        file_name: &str,
        chunks: St,
    ) -> Result<FieldReport, UploadError>
    where
        St: Stream<Item = Result<Bytes, E>>,
        E: Display,
    {
        // only the final path component, so nothing escapes the destination
        let Some(stored_name) = sanitize_filename(file_name) else {
            tracing::warn!("Rejected unusable filename: {:?}", file_name);
            return Err(UploadError::Parse(format!("Invalid filename: {:?}", file_name)));
        };
        tracing::debug!("Receiving file: {} -> {}", file_name, stored_name);

        let mut sink = FileSink::open(self.storage.as_ref(), self.destination.join(&stored_name), file_name).await?;
        // progress is reported under the name the client sent
        let mut tracker = ProgressTracker::new(ProgressState::new(file_name), self.gate.clone(), self.notifier.clone());

        let mut chunks = std::pin::pin!(chunks);
        while let Some(chunk) = chunks.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    tracing::warn!("Stream for {} ended abnormally: {}", file_name, e);
                    sink.abort().await;
                    return Err(UploadError::ConnectionAbort {
                        filename: file_name.to_string(),
                        reason: e.to_string(),
                    });
                }
            };

            tracker.observe(&chunk);
            if let Err(e) = sink.write(&chunk).await {
                tracing::error!("{}", e);
                sink.abort().await;
                return Err(e);
            }
        }

        let written = sink.close().await.map_err(|e| {
            tracing::error!("{}", e);
            e
        })?;
        let state = tracker.finish();
        debug_assert_eq!(state.bytes_processed, written);

        tracing::info!("📥 Stored file: {} ({} bytes)", stored_name, written);
        Ok(FieldReport {
            field: field_name.to_string(),
            filename: stored_name,
            bytes: state.bytes_processed,
        })
    }
}

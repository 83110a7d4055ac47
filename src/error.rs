use std::fmt;
use std::io;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::models::ErrorResponse;

/// which storage step failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Open,
    Write,
    Close,
}

impl fmt::Display for StorageOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StorageOp::Open => "open",
            StorageOp::Write => "write",
            StorageOp::Close => "close",
        })
    }
}

/// everything that can abort an upload request
#[derive(Debug, Error)]
pub enum UploadError {
    /// malformed multipart body or unusable field
    #[error("Failed to parse upload: {0}")]
    Parse(String),

    /// open, write or close failed for a field
    #[error("Failed to {operation} {filename}: {source}")]
    Storage {
        filename: String,
        operation: StorageOp,
        #[source]
        source: io::Error,
    },

    /// the body stream broke off in the middle of a field
    #[error("Connection aborted while receiving {filename}: {reason}")]
    ConnectionAbort { filename: String, reason: String },
}

impl UploadError {
    pub fn storage(filename: &str, operation: StorageOp, source: io::Error) -> Self {
        UploadError::Storage {
            filename: filename.to_string(),
            operation,
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            UploadError::Parse(_) => StatusCode::BAD_REQUEST,
            UploadError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            UploadError::ConnectionAbort { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

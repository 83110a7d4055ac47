use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{StorageOp, UploadError};

/// where sinks get their writers from
pub trait Storage: Send + Sync {
    type Writer: AsyncWrite + Unpin + Send;

    /// create or truncate the file at `path`
    fn create(&self, path: &Path) -> impl Future<Output = io::Result<Self::Writer>> + Send;
}

/// plain files on the local disk
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl Storage for LocalStorage {
    type Writer = tokio::fs::File;

    fn create(&self, path: &Path) -> impl Future<Output = io::Result<Self::Writer>> + Send {
        tokio::fs::File::create(path.to_path_buf())
    }
}

/// writes one field's bytes to its destination path, in order
pub struct FileSink<W> {
    filename: String,
    path: PathBuf,
    writer: W,
    written: u64,
}

impl<W: AsyncWrite + Unpin + Send> FileSink<W> {
    pub async fn open<S>(storage: &S, path: PathBuf, filename: &str) -> Result<Self, UploadError>
    where
        S: Storage<Writer = W>,
    {
        tracing::trace!("Opening sink: {:?}", path);
        let writer = storage
            .create(&path)
            .await
            .map_err(|e| UploadError::storage(filename, StorageOp::Open, e))?;

        Ok(Self {
            filename: filename.to_string(),
            path,
            writer,
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub async fn write(&mut self, chunk: &[u8]) -> Result<(), UploadError> {
        self.writer
            .write_all(chunk)
            .await
            .map_err(|e| UploadError::storage(&self.filename, StorageOp::Write, e))?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    /// flush and close, returns the number of bytes written
    pub async fn close(mut self) -> Result<u64, UploadError> {
        self.writer
            .flush()
            .await
            .map_err(|e| UploadError::storage(&self.filename, StorageOp::Close, e))?;
        self.writer
            .shutdown()
            .await
            .map_err(|e| UploadError::storage(&self.filename, StorageOp::Close, e))?;
        Ok(self.written)
    }

    /// close after a failure; whatever reached the disk stays there
    pub async fn abort(mut self) {
        if let Err(e) = self.writer.shutdown().await {
            tracing::warn!("Failed to close partial file {:?}: {}", self.path, e);
        }
        tracing::debug!("Left partial file {:?} ({} bytes)", self.path, self.written);
    }
}

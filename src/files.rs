use std::io;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tokio::fs;

use crate::models::FileStatus;
use crate::utils::pretty_bytes;

/// stat every entry of `dir`. nothing is cached, each call hits the disk.
pub async fn file_status(dir: &Path, owner: &str) -> io::Result<Vec<FileStatus>> {
    tracing::debug!("Listing files in directory: {:?}", dir);
    let mut files = Vec::new();
    let mut entries = fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let metadata = entry.metadata().await?;
        let name = entry.file_name().to_string_lossy().to_string();
        tracing::trace!("Found file: {} ({} bytes)", name, metadata.len());

        // birth time when the platform has it
        let stamp = metadata.created().or_else(|_| metadata.modified()).ok();

        files.push(FileStatus {
            file: name,
            size: pretty_bytes(metadata.len()),
            last_modified: stamp.map(format_time).unwrap_or_else(|| "Unknown".to_string()),
            owner: owner.to_string(),
        });
    }

    files.sort_by(|a, b| a.file.cmp(&b.file));
    tracing::debug!("Found {} files total", files.len());
    Ok(files)
}

fn format_time(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339()
}

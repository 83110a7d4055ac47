use std::path::PathBuf;
use std::time::Duration;

/// application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// directory uploads are stored in and listed from
    pub downloads_dir: PathBuf,
    /// bind address
    pub host: String,
    /// bind port
    pub port: u16,
    /// maximum request body size in bytes
    pub max_upload_size: usize,
    /// number of tokio worker threads
    pub worker_threads: usize,
    /// minimum time between two progress events of one file
    pub progress_delay: Duration,
    /// owner reported in the file listing
    pub owner: String,
}

impl Config {
    /// load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let owner = std::env::var("FILES_OWNER")
            .or_else(|_| std::env::var("USER"))
            .unwrap_or_else(|_| "unknown".to_string());

        Self {
            downloads_dir: std::env::var("DOWNLOADS_DIR")
                .unwrap_or_else(|_| "./downloads".to_string())
                .into(),
            host: std::env::var("HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            max_upload_size: std::env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10 * 1024 * 1024 * 1024), // 10GB default
            worker_threads: std::env::var("WORKER_THREADS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(8),
            progress_delay: std::env::var("PROGRESS_DELAY_MS")
                .ok()
                .and_then(|ms| ms.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(Duration::from_millis(200)),
            owner,
        }
    }
}

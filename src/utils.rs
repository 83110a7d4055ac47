use tokio::signal;

/// last path component of a client supplied name, unchanged otherwise.
/// `None` when nothing usable is left (empty, `.` or `..`).
pub fn sanitize_filename(filename: &str) -> Option<String> {
    // browsers on windows may send `C:\fakepath\name`
    let name = filename.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default();
    match name {
        "" | "." | ".." => None,
        name => Some(name.to_string()),
    }
}

const UNITS: [&str; 9] = ["B", "kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// human readable size in decimal units, e.g. 125200 -> "125 kB"
pub fn pretty_bytes(size: u64) -> String {
    if size < 1000 {
        return format!("{} B", size);
    }

    let mut exponent = 0;
    let mut scaled = size;
    while scaled >= 1000 && exponent < UNITS.len() - 1 {
        scaled /= 1000;
        exponent += 1;
    }
    let value = size as f64 / 1000f64.powi(exponent as i32);

    // three significant digits, trailing zeros dropped
    let decimals = if value >= 100.0 {
        0
    } else if value >= 10.0 {
        1
    } else {
        2
    };
    let formatted = format!("{:.*}", decimals, value);
    let formatted = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        formatted
    };

    format!("{} {}", formatted, UNITS[exponent])
}

// wait for ctrl-c or sigterm
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}

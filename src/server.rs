use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    services::ServeDir,
    trace::TraceLayer,
    compression::CompressionLayer,
    limit::RequestBodyLimitLayer,
    cors::{Any, CorsLayer},
};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::handlers::{default_route, fallback, list_files, preflight, upload_files};
use crate::hub::ws_handler;
use crate::state::AppState;
use crate::utils::shutdown_signal;
use crate::config::Config;

/// build the router
pub fn build_router(state: Arc<AppState>, config: &Config) -> Router {
    tracing::debug!("Building router with max upload size: {} bytes", config.max_upload_size);

    // every response carries `Access-Control-Allow-Origin: *`
    let cors = CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_origin(Any)
        .allow_headers(Any);

    // verb table per path; anything unmatched goes to `fallback`
    Router::new()
        .route(
            "/",
            get(list_files)
                .post(upload_files)
                .options(preflight)
                .fallback(default_route),
        )
        .route("/upload", post(upload_files).options(preflight))
        .route("/files", get(list_files).options(preflight))
        .route("/ws", get(ws_handler))
        .nest_service("/downloads", ServeDir::new(&state.downloads_dir))
        .fallback(fallback)
        // uploads are streamed, the only cap is the configured one
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_size))
        .layer(cors)
        .layer(CompressionLayer::new()
            .gzip(true)
            .br(true)
            .zstd(true)
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// serve until a shutdown signal arrives
pub async fn start_server(app: Router, addr: SocketAddr) -> std::io::Result<()> {
    tracing::info!("Starting server...");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::debug!("Listener bound to {}", addr);

    tracing::info!("Server running and ready to accept connections");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .tcp_nodelay(true)
    .await
}

/// print startup banner with server info
pub fn print_startup_banner(config: &Config) {
    tracing::info!("filedrop starting...");
    tracing::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    tracing::info!("📡 HTTP API: http://{}:{}", config.host, config.port);
    tracing::info!("🔌 PROGRESS CHANNEL: ws://{}:{}/ws", config.host, config.port);
    tracing::info!("⏱️  Progress events at most every {:?} per file", config.progress_delay);
    tracing::info!("📁 Storing files in: {:?}", config.downloads_dir.canonicalize().unwrap_or(config.downloads_dir.clone()));
    tracing::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

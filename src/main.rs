use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::net::SocketAddr;
use std::sync::Arc;

use filedrop::config::Config;
use filedrop::state::AppState;
use filedrop::server::{build_router, print_startup_banner, start_server};

// use mimalloc as the global allocator
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() {
    // load .env file if it exists (fails silently if not found)
    let _ = dotenvy::dotenv();

    // load configuration from environment variables
    let config = Config::from_env();

    // build tokio runtime with configured worker threads
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.worker_threads)
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime");

    runtime.block_on(async {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info".into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .init();

        // create the directory if it doesn't exist
        if !config.downloads_dir.exists() {
            std::fs::create_dir_all(&config.downloads_dir).expect("Failed to create downloads directory");
            tracing::info!("Created downloads directory at: {:?}", config.downloads_dir);
        }

        let state = Arc::new(AppState::new(&config));
        let app = build_router(state, &config);

        let addr = SocketAddr::from((
            config.host.parse::<std::net::IpAddr>()
                .expect("Invalid HOST"),
            config.port
        ));

        print_startup_banner(&config);

        if let Err(e) = start_server(app, addr).await {
            tracing::error!("Server error: {}", e);
        }
    });
}

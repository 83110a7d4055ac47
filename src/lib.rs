pub mod config;
pub mod error;
pub mod files;
pub mod handlers;
pub mod hub;
pub mod models;
pub mod notifier;
pub mod progress;
pub mod server;
pub mod sink;
pub mod state;
pub mod throttle;
pub mod upload;
pub mod utils;

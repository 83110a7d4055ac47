use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::hub::SessionHub;
use crate::notifier::{Notifier, SessionNotifier};
use crate::sink::LocalStorage;
use crate::throttle::{Clock, SystemClock, ThrottleGate};
use crate::upload::UploadOrchestrator;

/// shared application state
#[derive(Clone)]
pub struct AppState {
    pub downloads_dir: PathBuf,
    pub owner: String,
    pub progress_delay: Duration,
    /// connected real-time clients
    pub hub: Arc<SessionHub>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            downloads_dir: config.downloads_dir.clone(),
            owner: config.owner.clone(),
            progress_delay: config.progress_delay,
            hub: Arc::new(SessionHub::new()),
            clock: Arc::new(SystemClock),
        }
    }

    /// orchestrator for one request, bound to the caller's session
    pub fn orchestrator(&self, session_id: &str) -> UploadOrchestrator<LocalStorage> {
        let notifier: Arc<dyn Notifier> = self.hub.clone();
        UploadOrchestrator::new(
            Arc::new(LocalStorage),
            self.downloads_dir.clone(),
            SessionNotifier::new(notifier, session_id),
            ThrottleGate::new(self.progress_delay, self.clock.clone()),
        )
    }
}

//! Server shared state

use crate::config::Config;
use std::time::Instant;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration, read-only once the server starts
    pub config: Config,

    started: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Self {
        Self {
            config,
            started: Instant::now(),
        }
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

//! Application state shared across HTTP handlers

use crate::auth::AuthSystem;
use crate::config::Config;
use crate::storage::StorageLayer;
use std::sync::Arc;
use std::time::Instant;

/// HTTP server state shared across handlers
///
/// Every field is behind an `Arc`, so cloning the state per worker is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration (read-only)
    pub config: Arc<Config>,
    /// Authentication system
    pub auth: Arc<AuthSystem>,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
    /// Process start, reported by the health endpoint
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config, auth: AuthSystem, storage: Arc<StorageLayer>) -> Self {
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            storage,
            started_at: Instant::now(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Seconds since the state was built
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

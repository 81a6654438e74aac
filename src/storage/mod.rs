//! Storage layer for the API
//!
//! One relational store, constructed at startup and injected wherever it is needed.

/// Database storage module
pub mod database;

use crate::config::StorageConfig;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Main storage layer, owns the connection pool
#[derive(Debug, Clone)]
pub struct StorageLayer {
    /// Database connection pool
    pub database: Arc<database::Database>,
}

impl StorageLayer {
    /// Connect to the configured database
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        info!("Initializing storage layer");
        let database = Arc::new(database::Database::new(&config.database).await?);
        info!("Storage layer initialized successfully");
        Ok(Self { database })
    }

    /// Wrap an existing database handle
    pub fn from_database(database: database::Database) -> Self {
        Self {
            database: Arc::new(database),
        }
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        self.database.migrate().await
    }

    /// Whether the database answers queries
    pub async fn health_check(&self) -> bool {
        match self.database.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Database health check failed: {}", e);
                false
            }
        }
    }

    /// Close all connections
    pub async fn close(&self) -> Result<()> {
        info!("Closing storage connections");
        self.database.close().await
    }

    /// Get database handle
    pub fn db(&self) -> &database::Database {
        &self.database
    }
}

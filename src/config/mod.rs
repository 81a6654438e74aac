//! Configuration management for the API
//!
//! Defaults, then an optional YAML file, then environment variables. The result is
//! validated once; any error aborts startup.

pub mod models;

pub use models::*;

use crate::utils::error::{ApiError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub app: AppConfig,
}

impl Config {
    /// Load configuration from a YAML file. The result is not validated.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ApiError::Config(format!("Failed to read config file: {}", e)))?;

        let app: AppConfig = serde_yaml::from_str(&content)
            .map_err(|e| ApiError::Config(format!("Failed to parse config: {}", e)))?;

        debug!("Configuration file parsed successfully");
        Ok(Self { app })
    }

    /// Load configuration from an optional file, apply environment overrides and validate
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup, using the environment variable names
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app = &mut self.app;

        if let Some(host) = lookup("HOST") {
            app.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            app.server.port = port
                .parse()
                .map_err(|_| ApiError::Config(format!("Invalid PORT: {}", port)))?;
        }
        if let Some(env) = lookup("APP_ENV") {
            app.server.environment = env.parse().map_err(ApiError::Config)?;
        }
        if let Some(origins) = lookup("CORS_ORIGIN") {
            app.server.cors.allowed_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
        if let Some(url) = lookup("DATABASE_URL") {
            app.storage.database.url = url;
        }
        if let Some(max) = lookup("DATABASE_MAX_CONNECTIONS") {
            app.storage.database.max_connections = max.parse().map_err(|_| {
                ApiError::Config(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", max))
            })?;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            app.auth.jwt_secret = secret;
        }
        if let Some(expires_in) = lookup("JWT_EXPIRES_IN") {
            app.auth.jwt_expires_in = expires_in;
        }

        Ok(())
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.app.server
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.app.storage
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.app.auth
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.app
            .server
            .validate()
            .map_err(|e| ApiError::Config(format!("Server config error: {}", e)))?;

        self.app
            .storage
            .database
            .validate()
            .map_err(|e| ApiError::Config(format!("Database config error: {}", e)))?;

        self.app
            .auth
            .validate()
            .map_err(|e| ApiError::Config(format!("Auth config error: {}", e)))?;

        Ok(())
    }
}

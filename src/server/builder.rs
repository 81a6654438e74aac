//! Server builder and run_server function
//!
//! Loads configuration in layers (defaults, YAML file, environment, command line) and
//! starts the HTTP server.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::storage::database::DatabaseBackendType;
use crate::utils::error::{ApiError, Result, expose_internal_details};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file read when no path is given and the file exists
pub const DEFAULT_CONFIG_PATH: &str = "config/sus.yaml";

/// Command line overrides, applied after the environment
#[derive(Debug, Clone, Default)]
pub struct ServerOptions {
    pub config_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Server builder for easier configuration
#[derive(Debug, Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| ApiError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

/// Resolve every configuration layer into a validated `Config`
pub async fn load_config(options: &ServerOptions) -> Result<Config> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            warn!("Ignoring unreadable .env file: {}", e);
        }
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    let path = match options.config_path.as_deref() {
        Some(path) => Some(path),
        None if default_path.exists() => Some(default_path),
        None => None,
    };

    let mut config = Config::load(path).await?;
    if let Some(host) = &options.host {
        config.app.server.host = host.clone();
    }
    if let Some(port) = options.port {
        config.app.server.port = port;
    }
    config.validate()?;

    Ok(config)
}

/// Run the server with layered configuration loading
pub async fn run_server(options: ServerOptions) -> Result<()> {
    info!("Starting SUS Digital API");

    let config = load_config(&options).await?;
    expose_internal_details(config.server().is_development());
    info!(
        "Environment: {:?}, database backend: {:?}",
        config.server().environment,
        DatabaseBackendType::from_url(&config.storage().database.url)
    );

    let server = ServerBuilder::new().with_config(config).build().await?;
    info!("Server starting at: http://{}", server.config().address());

    server.start().await
}

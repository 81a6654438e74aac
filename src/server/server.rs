//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and the application factory.

use crate::auth::AuthSystem;
use crate::config::{Config, CorsConfig, ServerConfig};
use crate::server::handlers::{
    api_index, health_check, json_error_handler, not_found, query_error_handler,
};
use crate::server::middleware::RequestLogger;
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::StorageLayer;
use crate::utils::error::{ApiError, Result};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use std::sync::Arc;
use tracing::info;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Connect storage, apply migrations and build the auth system
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let storage = Arc::new(StorageLayer::new(config.storage()).await?);
        storage.migrate().await?;
        let auth = AuthSystem::new(config.auth(), Arc::clone(&storage))?;

        Ok(Self {
            config: config.server().clone(),
            state: AppState::new(config.clone(), auth, storage),
        })
    }

    /// Start the HTTP server and close storage once it stops
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let workers = self.config.workers;
        let storage = Arc::clone(&self.state.storage);

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);
        let mut server = ActixHttpServer::new(move || create_app(state.clone()));
        if let Some(workers) = workers {
            server = server.workers(workers);
        }

        let server = server
            .bind(&bind_addr)
            .map_err(|e| ApiError::config(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);
        let result = server.await;

        info!("HTTP server stopped");
        storage.close().await?;
        result.map_err(ApiError::from)
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Create the Actix-web application
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let server_config = state.config.server();
    let cors = build_cors(&server_config.cors);
    let json_config = web::JsonConfig::default()
        .limit(server_config.max_body_size)
        .error_handler(json_error_handler);
    let query_config = web::QueryConfig::default().error_handler(query_error_handler);

    App::new()
        .app_data(state)
        .app_data(json_config)
        .app_data(query_config)
        .wrap(RequestLogger)
        .wrap(cors)
        .wrap(
            DefaultHeaders::new()
                .add(("X-Content-Type-Options", "nosniff"))
                .add(("X-Frame-Options", "SAMEORIGIN"))
                .add(("Referrer-Policy", "no-referrer"))
                .add(("X-DNS-Prefetch-Control", "off")),
        )
        .route("/health", web::get().to(health_check))
        .route("/api", web::get().to(api_index))
        .configure(routes::configure_routes)
        .default_service(web::to(not_found))
}

fn build_cors(cors_config: &CorsConfig) -> Cors {
    let mut cors = if cors_config.allows_any_origin() {
        Cors::default().allow_any_origin()
    } else {
        cors_config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    let methods: Vec<actix_web::http::Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    if !methods.is_empty() {
        cors = cors.allowed_methods(methods);
    }

    let headers: Vec<actix_web::http::header::HeaderName> = cors_config
        .allowed_headers
        .iter()
        .filter_map(|h| h.parse().ok())
        .collect();
    if !headers.is_empty() {
        cors = cors.allowed_headers(headers);
    }

    cors.max_age(cors_config.max_age)
}

//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by resource.

pub mod auth;
pub mod consultas;
pub mod medicos;
pub mod pacientes;
pub mod usuarios;

use crate::storage::database::page_offset;
use crate::utils::error::ApiError;
use actix_web::web;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mount every `/api` resource
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(auth::configure_routes)
        .configure(usuarios::configure_routes)
        .configure(medicos::configure_routes)
        .configure(pacientes::configure_routes)
        .configure(consultas::configure_routes);
}

/// Body carrying a single confirmation message
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Total number of items across all pages
    pub total: u64,
    /// Total number of pages
    pub pages: u64,
    pub current_page: u64,
    pub per_page: u64,
}

impl Pagination {
    pub fn new(total: u64, current_page: u64, per_page: u64) -> Self {
        Self {
            total,
            pages: total.div_ceil(per_page.max(1)),
            current_page,
            per_page,
        }
    }
}

/// Query parameters for pagination
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    /// Page number (1-based)
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

/// Upper bound on `limit`
pub const MAX_PAGE_SIZE: u64 = 100;

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PaginationQuery {
    /// Validate pagination parameters
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.page == 0 {
            return Err(ApiError::validation("Página deve ser maior que zero"));
        }
        if self.limit == 0 || self.limit > MAX_PAGE_SIZE {
            return Err(ApiError::validation(format!(
                "Limite deve estar entre 1 e {}",
                MAX_PAGE_SIZE
            )));
        }
        if page_offset(self.page, self.limit).is_none() {
            return Err(ApiError::validation("Página fora do intervalo"));
        }
        Ok(())
    }
}

/// Parse a path identifier. Anything that is not a UUID cannot name a record.
pub fn parse_id(raw: &str, not_found: &'static str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(not_found))
}

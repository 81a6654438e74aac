//! # SUS Digital API
//!
//! Authentication and authorization core of a clinical-records backend.
//!
//! ## Features
//!
//! - **Accounts with roles**: ADMIN, MEDICO and PACIENTE, each clinical account owning a
//!   doctor or patient profile
//! - **Stateless sessions**: HS256 bearer tokens with a configurable lifetime
//! - **Credential storage**: bcrypt hashes, verified on the blocking pool
//! - **Request pipeline**: authentication middleware, role guards and ownership checks
//! - **Relational store**: SeaORM over SQLite or PostgreSQL, migrations applied at startup
//!
//! ## Running
//!
//! ```bash
//! JWT_SECRET=change-me cargo run -- --port 3000
//! ```
//!
//! ## Embedding
//!
//! ```rust,no_run
//! use sus_digital::server::{ServerOptions, run_server};
//!
//! #[tokio::main]
//! async fn main() -> sus_digital::Result<()> {
//!     run_server(ServerOptions::default()).await
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

pub use auth::{AuthSystem, AuthenticatedContext, JwtHandler, PasswordHasher};
pub use config::Config;
pub use core::models::{Account, AccountWithProfile, Profile, Role};
pub use server::{AppState, HttpServer, create_app, run_server};
pub use storage::StorageLayer;
pub use utils::error::{ApiError, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

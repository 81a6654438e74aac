//! HTTP middleware implementations
//!
//! - Bearer-token authentication
//! - Role guards
//! - Request logging

mod auth;
mod guard;
mod helpers;
mod request_logger;


pub use auth::{AuthMiddleware, AuthMiddlewareService};
pub use guard::{RequireRole, RequireRoleService};
pub use helpers::authorization_header;
pub use request_logger::{RequestLogger, RequestLoggerService};

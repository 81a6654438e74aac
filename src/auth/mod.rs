//! Authentication and authorization system
//!
//! Credential hashing, token issuance and verification, identity loading, guards and
//! the session flows built on them.

pub mod guard;
pub mod jwt;
pub mod password;
pub mod session;
pub mod system;
pub mod types;

pub use guard::{require_owner_or_admin, require_role};
pub use jwt::{Claims, JwtHandler, TokenError, UnverifiedClaims, decode_unverified};
pub use password::{BCRYPT_COST, PasswordHasher};
pub use session::{ChangePasswordRequest, LoginRequest, RegisterRequest, SessionGrant};
pub use system::AuthSystem;
pub use types::AuthenticatedContext;

//! JWT token handling
//!
//! HS256 tokens carrying account id, email and role. Stateless: nothing is stored
//! server-side and tokens cannot be revoked before they expire.

mod handler;
pub mod types;
mod utils;


pub use types::{Claims, JwtHandler, TokenError, UnverifiedClaims};
pub use utils::{decode_unverified, extract_bearer_token};

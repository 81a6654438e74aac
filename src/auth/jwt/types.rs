//! JWT types and data structures

use crate::core::models::Role;
use crate::utils::error::AuthFailure;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// JWT handler for token operations
#[derive(Clone)]
pub struct JwtHandler {
    /// Encoding key for signing tokens
    pub(super) encoding_key: EncodingKey,
    /// Decoding key for verifying tokens
    pub(super) decoding_key: DecodingKey,
    /// JWT algorithm
    pub(super) algorithm: Algorithm,
    /// Token lifetime in seconds
    pub(super) lifetime: u64,
    /// Lifetime as configured, advertised to clients
    pub(super) lifetime_label: String,
}

impl std::fmt::Debug for JwtHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtHandler")
            .field("algorithm", &self.algorithm)
            .field("lifetime", &self.lifetime)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: Uuid,
    /// Account email at issue time
    pub email: String,
    /// Account role
    pub role: Role,
    /// Issued at timestamp
    pub iat: u64,
    /// Expiration timestamp
    pub exp: u64,
}

/// Claims decoded without checking the signature.
///
/// Inspection only. There is no conversion into `Claims` or into an authenticated
/// context, so these can never reach an authorization decision.
#[derive(Debug, Clone)]
pub struct UnverifiedClaims(pub(super) Claims);

impl UnverifiedClaims {
    pub fn subject(&self) -> Uuid {
        self.0.sub
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn expires_at(&self) -> u64 {
        self.0.exp
    }
}

/// Token verification failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Signature valid, expiry passed
    #[error("token expired")]
    Expired,
    /// Malformed token or signature mismatch
    #[error("token invalid")]
    Invalid,
}

impl From<TokenError> for AuthFailure {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthFailure::ExpiredToken,
            TokenError::Invalid => AuthFailure::InvalidToken,
        }
    }
}

//! Core JWT handler implementation

use super::types::{Claims, JwtHandler, TokenError};
use crate::config::AuthConfig;
use crate::core::models::Role;
use crate::utils::error::{ApiError, Result};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use uuid::Uuid;

impl JwtHandler {
    /// Create a new JWT handler. An empty secret or unparseable lifetime is a config error.
    pub fn new(config: &AuthConfig) -> Result<Self> {
        if config.jwt_secret.trim().is_empty() {
            return Err(ApiError::config("JWT_SECRET must be set"));
        }
        let lifetime = config.token_lifetime().map_err(ApiError::Config)?;
        let secret = config.jwt_secret.as_bytes();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            lifetime: lifetime.as_secs(),
            lifetime_label: config.jwt_expires_in.clone(),
        })
    }

    /// Issue a signed token for an account
    pub fn issue(&self, account_id: Uuid, email: &str, role: Role) -> Result<String> {
        let now = now_secs()?;

        let claims = Claims {
            sub: account_id,
            email: email.to_string(),
            role,
            iat: now,
            exp: now + self.lifetime,
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key)?;

        debug!("Issued token for account: {}", account_id);
        Ok(token)
    }

    /// Verify signature and expiry.
    ///
    /// The signature is checked first, so `Expired` is only ever reported for a token
    /// this handler signed. A token is expired from the second its `exp` is reached.
    pub fn verify(&self, token: &str) -> std::result::Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => {
                    warn!("Token verification failed: {}", e);
                    TokenError::Invalid
                }
            }
        })?;

        let now = now_secs().map_err(|_| TokenError::Invalid)?;
        if data.claims.exp <= now {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }

    /// Token lifetime in seconds
    pub fn lifetime_secs(&self) -> u64 {
        self.lifetime
    }

    /// Lifetime string as configured, e.g. `"24h"`
    pub fn expires_in_label(&self) -> &str {
        &self.lifetime_label
    }
}

pub(super) fn now_secs() -> Result<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| ApiError::internal(format!("System time error: {}", e)))
}

//! Core authentication system implementation

use super::jwt::{JwtHandler, extract_bearer_token};
use super::password::PasswordHasher;
use super::types::AuthenticatedContext;
use crate::config::AuthConfig;
use crate::core::models::AccountWithProfile;
use crate::storage::StorageLayer;
use crate::utils::error::{ApiError, AuthFailure, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Main authentication system
#[derive(Debug, Clone)]
pub struct AuthSystem {
    /// Storage layer for account data
    pub(super) storage: Arc<StorageLayer>,
    /// JWT handler
    pub(super) jwt: Arc<JwtHandler>,
    /// Password hasher
    pub(super) hasher: PasswordHasher,
}

impl AuthSystem {
    /// Create a new authentication system. Fails when the signing secret is missing.
    pub fn new(config: &AuthConfig, storage: Arc<StorageLayer>) -> Result<Self> {
        info!("Initializing authentication system");

        let jwt = Arc::new(JwtHandler::new(config)?);

        info!("Authentication system initialized successfully");
        Ok(Self {
            storage,
            jwt,
            hasher: PasswordHasher::new(),
        })
    }

    /// Replace the password hasher
    pub fn with_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn jwt(&self) -> &JwtHandler {
        &self.jwt
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    pub fn storage(&self) -> &StorageLayer {
        &self.storage
    }

    /// Load an account and its profile by id
    pub async fn load_identity(&self, account_id: Uuid) -> Result<Option<AccountWithProfile>> {
        self.storage.db().find_account_by_id(account_id).await
    }

    /// Authenticate from the raw `Authorization` header value.
    ///
    /// Extract, verify, load, attach. Every rejection is a 401 except store failures,
    /// which propagate as system errors.
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<AuthenticatedContext> {
        let token = authorization
            .and_then(extract_bearer_token)
            .ok_or(ApiError::unauthenticated(AuthFailure::MissingToken))?;

        let claims = self.jwt.verify(token).map_err(|e| {
            debug!("Rejecting token: {}", e);
            ApiError::unauthenticated(e.into())
        })?;

        match self.load_identity(claims.sub).await? {
            Some(identity) if identity.account.active => {
                debug!("Authenticated account: {}", identity.account.id);
                Ok(AuthenticatedContext::new(identity))
            }
            Some(_) => {
                warn!("Token presented for inactive account: {}", claims.sub);
                Err(ApiError::unauthenticated(AuthFailure::InvalidOrInactiveUser))
            }
            None => {
                warn!("Token presented for unknown account: {}", claims.sub);
                Err(ApiError::unauthenticated(AuthFailure::InvalidOrInactiveUser))
            }
        }
    }
}

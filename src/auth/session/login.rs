//! Login

use super::types::{LoginRequest, SessionGrant, present, present_secret};
use crate::auth::system::AuthSystem;
use crate::utils::error::{ApiError, AuthFailure, Result};
use tracing::{info, warn};

impl AuthSystem {
    /// Exchange email and password for a token.
    ///
    /// Unknown email and wrong password produce the same error and cost the same
    /// hashing work. An inactive account is refused before its password is checked.
    pub async fn login(&self, request: &LoginRequest) -> Result<SessionGrant> {
        let (Some(email), Some(password)) =
            (present(&request.email), present_secret(&request.password))
        else {
            return Err(ApiError::validation("Email e senha são obrigatórios"));
        };

        info!("Login attempt: {}", email);

        let Some(identity) = self.storage.db().find_account_by_email(email).await? else {
            self.hasher.equalize_timing(password).await;
            warn!("Login failed: unknown email");
            return Err(ApiError::unauthenticated(AuthFailure::InvalidCredentials));
        };

        if !identity.account.active {
            warn!("Login refused for inactive account: {}", identity.account.id);
            return Err(ApiError::unauthenticated(AuthFailure::InactiveAccount));
        }

        if !self
            .hasher
            .matches(password, &identity.account.password_hash)
            .await
        {
            warn!("Login failed for account: {}", identity.account.id);
            return Err(ApiError::unauthenticated(AuthFailure::InvalidCredentials));
        }

        let account = &identity.account;
        let token = self.jwt.issue(account.id, &account.email, account.role)?;

        info!("Login succeeded: {}", account.id);
        Ok(SessionGrant {
            identity,
            token,
            expires_in: self.jwt.expires_in_label().to_string(),
        })
    }
}

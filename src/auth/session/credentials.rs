//! Current-identity and password operations

use super::types::{ChangePasswordRequest, MIN_PASSWORD_LEN, present_secret};
use crate::auth::system::AuthSystem;
use crate::auth::types::AuthenticatedContext;
use crate::core::models::AccountWithProfile;
use crate::utils::error::{ApiError, AuthFailure, Result};
use tracing::{info, warn};

impl AuthSystem {
    /// The caller's own account and profile
    pub fn me<'a>(&self, ctx: Option<&'a AuthenticatedContext>) -> Result<&'a AccountWithProfile> {
        ctx.map(AuthenticatedContext::identity)
            .ok_or(ApiError::unauthenticated(AuthFailure::NotAuthenticated))
    }

    /// Replace the caller's password.
    ///
    /// Input is validated before the store is touched. Tokens already issued stay valid
    /// until they expire.
    pub async fn change_password(
        &self,
        ctx: Option<&AuthenticatedContext>,
        request: &ChangePasswordRequest,
    ) -> Result<()> {
        let ctx = ctx.ok_or(ApiError::unauthenticated(AuthFailure::NotAuthenticated))?;

        let (Some(current), Some(new)) = (
            present_secret(&request.current_password),
            present_secret(&request.new_password),
        ) else {
            return Err(ApiError::validation(
                "Senha atual e nova senha são obrigatórias",
            ));
        };

        if new.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::validation(format!(
                "Nova senha deve ter pelo menos {} caracteres",
                MIN_PASSWORD_LEN
            )));
        }

        if !self.hasher.matches(current, &ctx.account().password_hash).await {
            warn!("Wrong current password for account: {}", ctx.account_id());
            return Err(ApiError::WrongCurrentPassword);
        }

        let password_hash = self.hasher.hash(new).await?;
        self.storage
            .db()
            .update_account_password(ctx.account_id(), &password_hash)
            .await?;

        info!("Password changed for account: {}", ctx.account_id());
        Ok(())
    }
}

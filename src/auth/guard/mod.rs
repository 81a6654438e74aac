//! Authorization guards
//!
//! Pure predicates over an already attached `AuthenticatedContext`. They compose in any
//! order. A missing context is a 401, a failed check a 403.


use super::types::AuthenticatedContext;
use crate::core::models::Role;
use crate::utils::error::{ApiError, AuthFailure, Result};
use uuid::Uuid;

/// Allow the request only when the caller's role is in `allowed`
pub fn require_role<'a>(
    ctx: Option<&'a AuthenticatedContext>,
    allowed: &[Role],
) -> Result<&'a AuthenticatedContext> {
    let ctx = ctx.ok_or(ApiError::unauthenticated(AuthFailure::NotAuthenticated))?;

    if allowed.contains(&ctx.role()) {
        return Ok(ctx);
    }

    Err(ApiError::forbidden(
        format!("Permissão necessária: {}", describe_roles(allowed)),
        Some(ctx.role()),
    ))
}

/// Allow ADMIN, or the caller whose account id is `owner_id`
pub fn require_owner_or_admin(
    ctx: Option<&AuthenticatedContext>,
    owner_id: Uuid,
) -> Result<&AuthenticatedContext> {
    let ctx = ctx.ok_or(ApiError::unauthenticated(AuthFailure::NotAuthenticated))?;

    if ctx.role() == Role::Admin || ctx.account_id() == owner_id {
        return Ok(ctx);
    }

    Err(ApiError::forbidden(
        "Você só pode acessar seus próprios dados",
        Some(ctx.role()),
    ))
}

/// `"ADMIN ou MEDICO"`
pub fn describe_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(" ou ")
}

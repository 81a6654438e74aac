//! Password change endpoint

use crate::auth::{AuthenticatedContext, ChangePasswordRequest};
use crate::server::routes::MessageResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::info;

/// Change the caller's password. Tokens already issued stay valid until they expire.
pub async fn change_password(
    state: web::Data<AppState>,
    ctx: AuthenticatedContext,
    request: web::Json<ChangePasswordRequest>,
) -> ActixResult<HttpResponse> {
    state.auth.change_password(Some(&ctx), &request).await?;
    info!("Password changed for account {}", ctx.account_id());

    Ok(HttpResponse::Ok().json(MessageResponse::new("Senha alterada com sucesso")))
}

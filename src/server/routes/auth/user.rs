//! Current user endpoint

use super::models::{MeResponse, UserDetail};
use crate::auth::AuthenticatedContext;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};

/// Account and profile of the caller, as loaded by the auth middleware
pub async fn get_current_user(
    state: web::Data<AppState>,
    ctx: AuthenticatedContext,
) -> ActixResult<HttpResponse> {
    let identity = state.auth.me(Some(&ctx))?;

    Ok(HttpResponse::Ok().json(MeResponse {
        user: UserDetail::from(identity),
    }))
}

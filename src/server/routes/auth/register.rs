//! User registration endpoint

use super::models::RegisterResponse;
use crate::auth::RegisterRequest;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::info;

/// Create an account and its role profile, then sign the caller in
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    let grant = state.auth.register(&request).await?;
    info!(
        "Registered {} account {}",
        grant.identity.account.role, grant.identity.account.id
    );

    Ok(HttpResponse::Created().json(RegisterResponse::from(grant)))
}

//! User login endpoint

use super::models::LoginResponse;
use crate::auth::LoginRequest;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};

/// Exchange email and password for a token
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    let grant = state.auth.login(&request).await?;
    Ok(HttpResponse::Ok().json(LoginResponse::from(grant)))
}

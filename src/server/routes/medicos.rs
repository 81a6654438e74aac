//! Doctor directory, open to any authenticated account

use super::parse_id;
use crate::server::middleware::AuthMiddleware;
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::{HttpResponse, Result as ActixResult, web};

const NOT_FOUND: &str = "Médico não encontrado";

/// Configure doctor routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/medicos")
            .wrap(AuthMiddleware)
            .route("", web::get().to(list_doctors))
            .route("/{id}", web::get().to(get_doctor)),
    );
}

/// All doctors, ordered by name
pub async fn list_doctors(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let doctors = state.storage.db().list_doctors().await?;
    Ok(HttpResponse::Ok().json(doctors))
}

/// One doctor with the owning account's email and active flag
pub async fn get_doctor(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let doctor_id = parse_id(&path, NOT_FOUND)?;
    let doctor = state
        .storage
        .db()
        .find_doctor(doctor_id)
        .await?
        .ok_or(ApiError::not_found(NOT_FOUND))?;

    Ok(HttpResponse::Ok().json(doctor))
}

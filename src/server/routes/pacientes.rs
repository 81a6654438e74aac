//! Patient directory, restricted to ADMIN and MEDICO

use super::parse_id;
use crate::core::models::Role;
use crate::server::middleware::{AuthMiddleware, RequireRole};
use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::{HttpResponse, Result as ActixResult, web};

const NOT_FOUND: &str = "Paciente não encontrado";

/// Configure patient routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/pacientes")
            .wrap(RequireRole::new(&[Role::Admin, Role::Medico]))
            .wrap(AuthMiddleware)
            .route("", web::get().to(list_patients))
            .route("/{id}", web::get().to(get_patient)),
    );
}

/// All patients, ordered by name
pub async fn list_patients(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let patients = state.storage.db().list_patients().await?;
    Ok(HttpResponse::Ok().json(patients))
}

pub async fn get_patient(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let patient_id = parse_id(&path, NOT_FOUND)?;
    let patient = state
        .storage
        .db()
        .find_patient(patient_id)
        .await?
        .ok_or(ApiError::not_found(NOT_FOUND))?;

    Ok(HttpResponse::Ok().json(patient))
}

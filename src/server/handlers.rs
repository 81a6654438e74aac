//! Service-level handlers: health, API index and the 404 fallback

use crate::server::state::AppState;
use crate::utils::error::ApiError;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;
use tracing::debug;

/// Health check endpoint handler. Reports 503 when the database does not answer.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database_up = state.storage.health_check().await;

    let body = json!({
        "status": if database_up { "OK" } else { "DEGRADED" },
        "service": "SUS Digital API",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime": state.uptime_secs(),
        "database": if database_up { "up" } else { "down" },
    });

    if database_up {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

/// Service description and endpoint index
pub async fn api_index() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Bem-vindo à API SUS Digital!",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Sistema de Gestão de Saúde Digital",
        "endpoints": {
            "auth": {
                "POST /api/auth/register": "Cadastrar novo usuário",
                "POST /api/auth/login": "Fazer login",
                "GET /api/auth/me": "Obter dados do usuário logado",
                "POST /api/auth/change-password": "Alterar senha",
            },
            "usuarios": {
                "GET /api/usuarios": "Listar usuários (ADMIN)",
                "GET /api/usuarios/{id}": "Obter usuário por ID (próprio ou ADMIN)",
                "PUT /api/usuarios/{id}": "Atualizar usuário (ADMIN)",
                "DELETE /api/usuarios/{id}": "Deletar usuário (ADMIN)",
            },
            "medicos": {
                "GET /api/medicos": "Listar médicos",
                "GET /api/medicos/{id}": "Obter médico por ID",
            },
            "pacientes": {
                "GET /api/pacientes": "Listar pacientes (MEDICO/ADMIN)",
                "GET /api/pacientes/{id}": "Obter paciente por ID (MEDICO/ADMIN)",
            },
            "consultas": {
                "GET /api/consultas": "Listar consultas visíveis ao usuário",
                "POST /api/consultas": "Agendar consulta (MEDICO/ADMIN)",
                "GET /api/consultas/{id}": "Obter consulta por ID",
                "PUT /api/consultas/{id}": "Atualizar consulta (MEDICO responsável/ADMIN)",
                "DELETE /api/consultas/{id}": "Deletar consulta (ADMIN)",
                "GET /api/consultas/medico/{id}": "Agenda de um médico",
                "GET /api/consultas/paciente/{id}": "Histórico de um paciente",
            },
        },
    }))
}

/// Fallback for unmatched routes
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    debug!("No route for {} {}", req.method(), req.path());

    HttpResponse::NotFound().json(json!({
        "erro": "Rota não encontrada",
        "path": req.uri().to_string(),
        "method": req.method().as_str(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Malformed JSON bodies become validation errors
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!("Rejecting request body: {}", err);
    ApiError::validation(format!("Corpo da requisição inválido: {}", err)).into()
}

/// Malformed query strings become validation errors
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!("Rejecting query string: {}", err);
    ApiError::validation(format!("Parâmetros de consulta inválidos: {}", err)).into()
}

//! HTTP response handling for errors

use super::types::{ApiError, FieldHint};
use crate::core::models::Role;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use once_cell::sync::OnceCell;
use serde::Serialize;

static EXPOSE_DETAILS: OnceCell<bool> = OnceCell::new();

/// Include internal error details in 5xx bodies. Set once at startup, development mode only.
pub fn expose_internal_details(enabled: bool) {
    let _ = EXPOSE_DETAILS.set(enabled);
}

fn details_exposed() -> bool {
    EXPOSE_DETAILS.get().copied().unwrap_or(false)
}

/// Standard error response format
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub erro: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub timestamp: String,
}

impl ErrorResponse {
    fn new<S: Into<String>>(erro: S, code: &'static str) -> Self {
        Self {
            erro: erro.into(),
            code,
            message: None,
            required: None,
            allowed: None,
            field: None,
            user_type: None,
            details: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn with_message<S: Into<String>>(mut self, message: S) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiError {
    /// Build the JSON body for this error
    pub fn to_body(&self) -> ErrorResponse {
        match self {
            ApiError::Validation { message, hint } => {
                let mut body = ErrorResponse::new(message.clone(), "VALIDATION_ERROR");
                match hint {
                    Some(FieldHint::Required(fields)) => body.required = Some(fields.clone()),
                    Some(FieldHint::Allowed(values)) => body.allowed = Some(values.clone()),
                    None => {}
                }
                body
            }
            ApiError::DuplicateEmail => ErrorResponse::new(self.to_string(), "DUPLICATE_EMAIL"),
            ApiError::DuplicateEntry { field } => {
                let mut body = ErrorResponse::new("Dados duplicados", "DUPLICATE_ENTRY")
                    .with_message(self.to_string());
                body.field = Some(field.clone());
                body
            }
            ApiError::ForeignKey => {
                ErrorResponse::new(self.to_string(), "FOREIGN_KEY_CONSTRAINT")
            }
            ApiError::WrongCurrentPassword => {
                ErrorResponse::new(self.to_string(), "WRONG_CURRENT_PASSWORD")
            }
            ApiError::Unauthenticated(failure) => {
                let body = ErrorResponse::new(failure.message(), failure.code());
                match failure.hint() {
                    Some(hint) => body.with_message(hint),
                    None => body,
                }
            }
            ApiError::Forbidden { message, user_type } => {
                let mut body =
                    ErrorResponse::new("Acesso negado", "FORBIDDEN").with_message(message.clone());
                body.user_type = *user_type;
                body
            }
            ApiError::NotFound(message) => ErrorResponse::new(message.clone(), "NOT_FOUND"),
            _ => {
                let mut body = ErrorResponse::new("Erro interno do servidor", "INTERNAL_ERROR");
                if details_exposed() {
                    body.details = Some(self.to_string());
                }
                body
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. }
            | ApiError::DuplicateEmail
            | ApiError::DuplicateEntry { .. }
            | ApiError::ForeignKey
            | ApiError::WrongCurrentPassword => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_body())
    }
}

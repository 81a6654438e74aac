//! Error types for the API

use crate::core::models::Role;
use thiserror::Error;

/// Result type alias for the API
pub type Result<T> = std::result::Result<T, ApiError>;

/// Main error type for the API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Configuration errors, fatal at startup
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors not covered by a more specific translation
    #[error("Database error: {0}")]
    Database(sea_orm::DbErr),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Token encoding errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Hashing primitive failures
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Missing or malformed input
    #[error("{message}")]
    Validation {
        message: String,
        hint: Option<FieldHint>,
    },

    /// Registration with an email that already exists
    #[error("Email já está em uso")]
    DuplicateEmail,

    /// Unique constraint violation reported by the store
    #[error("O {field} informado já está em uso")]
    DuplicateEntry { field: String },

    /// Foreign key violation reported by the store
    #[error("Referência a registro inexistente")]
    ForeignKey,

    /// Change-password with a current password that does not verify
    #[error("Senha atual incorreta")]
    WrongCurrentPassword,

    /// Authentication failures
    #[error("{}", .0.message())]
    Unauthenticated(AuthFailure),

    /// Role or ownership mismatch
    #[error("Acesso negado: {message}")]
    Forbidden {
        message: String,
        user_type: Option<Role>,
    },

    /// Referenced entity absent
    #[error("{0}")]
    NotFound(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Extra context attached to a validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldHint {
    /// Fields the request must carry
    Required(Vec<&'static str>),
    /// Values a field accepts
    Allowed(Vec<&'static str>),
}

/// Reasons a request fails authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No `Authorization: Bearer <token>` header, or an empty token
    MissingToken,
    /// Token signature is valid but its expiry has passed
    ExpiredToken,
    /// Token is malformed or its signature does not match
    InvalidToken,
    /// Token subject no longer exists or was deactivated
    InvalidOrInactiveUser,
    /// Unknown email or wrong password at login
    InvalidCredentials,
    /// Correct credentials for a deactivated account
    InactiveAccount,
    /// A guard or handler ran without an attached identity
    NotAuthenticated,
}

impl AuthFailure {
    /// Enumerable reason code clients branch on
    pub fn code(&self) -> &'static str {
        match self {
            AuthFailure::MissingToken => "MISSING_TOKEN",
            AuthFailure::ExpiredToken => "EXPIRED_TOKEN",
            AuthFailure::InvalidToken => "INVALID_TOKEN",
            AuthFailure::InvalidOrInactiveUser => "INVALID_OR_INACTIVE_USER",
            AuthFailure::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthFailure::InactiveAccount => "INACTIVE_ACCOUNT",
            AuthFailure::NotAuthenticated => "NOT_AUTHENTICATED",
        }
    }

    /// Human readable message
    pub fn message(&self) -> &'static str {
        match self {
            AuthFailure::MissingToken => "Token não fornecido ou formato inválido",
            AuthFailure::ExpiredToken => "Token expirado",
            AuthFailure::InvalidToken => "Token inválido",
            AuthFailure::InvalidOrInactiveUser => "Token inválido ou usuário inativo",
            AuthFailure::InvalidCredentials => "Credenciais inválidas",
            AuthFailure::InactiveAccount => "Usuário desativado",
            AuthFailure::NotAuthenticated => "Usuário não autenticado",
        }
    }

    /// Optional follow-up instruction for the client
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            AuthFailure::MissingToken => Some("Use: Authorization: Bearer <token>"),
            AuthFailure::ExpiredToken => Some("Faça login novamente"),
            _ => None,
        }
    }
}

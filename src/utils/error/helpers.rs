//! Helper functions for creating specific error types

use super::types::{ApiError, AuthFailure, FieldHint};
use crate::core::models::Role;

impl ApiError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            hint: None,
        }
    }

    pub fn missing_fields<S: Into<String>>(message: S, required: Vec<&'static str>) -> Self {
        Self::Validation {
            message: message.into(),
            hint: Some(FieldHint::Required(required)),
        }
    }

    pub fn invalid_choice<S: Into<String>>(message: S, allowed: Vec<&'static str>) -> Self {
        Self::Validation {
            message: message.into(),
            hint: Some(FieldHint::Allowed(allowed)),
        }
    }

    pub fn unauthenticated(failure: AuthFailure) -> Self {
        Self::Unauthenticated(failure)
    }

    pub fn forbidden<S: Into<String>>(message: S, user_type: Option<Role>) -> Self {
        Self::Forbidden {
            message: message.into(),
            user_type,
        }
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn crypto<S: Into<String>>(message: S) -> Self {
        Self::Crypto(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// The authentication failure carried by this error, if any
    pub fn auth_failure(&self) -> Option<AuthFailure> {
        match self {
            Self::Unauthenticated(failure) => Some(*failure),
            _ => None,
        }
    }

    /// Whether the error is a system failure rather than a client mistake
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::Database(_)
                | Self::Yaml(_)
                | Self::Io(_)
                | Self::Jwt(_)
                | Self::Crypto(_)
                | Self::Internal(_)
        )
    }
}

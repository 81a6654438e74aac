//! Session flow inputs and outputs

use crate::core::models::AccountWithProfile;
use serde::Deserialize;

/// Minimum password length, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

/// Registration input. Every field is optional on the wire so that missing fields
/// are reported as validation errors rather than deserialization failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    #[serde(rename = "senha")]
    pub password: Option<String>,
    #[serde(rename = "tipo")]
    pub role: Option<String>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub crm: Option<String>,
    #[serde(rename = "especialidade")]
    pub specialty: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(rename = "endereco")]
    pub address: Option<String>,
    #[serde(rename = "dataNascimento")]
    pub birth_date: Option<String>,
    #[serde(rename = "cartaoSus")]
    pub sus_card: Option<String>,
}

/// Login input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    #[serde(rename = "senha")]
    pub password: Option<String>,
}

/// Change-password input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(rename = "senhaAtual")]
    pub current_password: Option<String>,
    #[serde(rename = "novaSenha")]
    pub new_password: Option<String>,
}

/// Result of a successful register or login
#[derive(Debug, Clone)]
pub struct SessionGrant {
    pub identity: AccountWithProfile,
    pub token: String,
    /// Advertised token lifetime, e.g. `"24h"`
    pub expires_in: String,
}

/// Trimmed value of an optional field. Blank counts as absent.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Password field, kept byte for byte. Blank counts as absent.
pub(crate) fn present_secret(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

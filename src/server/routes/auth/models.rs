//! Response models for authentication endpoints

use crate::auth::SessionGrant;
use crate::core::models::{AccountWithProfile, Profile, Role};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Account summary returned by register and login
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    #[serde(rename = "tipo")]
    pub role: Role,
    #[serde(rename = "perfil")]
    pub profile: Option<Profile>,
}

impl From<&AccountWithProfile> for UserSummary {
    fn from(identity: &AccountWithProfile) -> Self {
        Self {
            id: identity.account.id,
            email: identity.account.email.clone(),
            role: identity.account.role,
            profile: identity.profile.clone(),
        }
    }
}

/// Account detail returned by the current-user endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub id: Uuid,
    pub email: String,
    #[serde(rename = "tipo")]
    pub role: Role,
    #[serde(rename = "ativo")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "perfil")]
    pub profile: Option<Profile>,
}

impl From<&AccountWithProfile> for UserDetail {
    fn from(identity: &AccountWithProfile) -> Self {
        Self {
            id: identity.account.id,
            email: identity.account.email.clone(),
            role: identity.account.role,
            active: identity.account.active,
            created_at: identity.account.created_at,
            profile: identity.profile.clone(),
        }
    }
}

/// Registration response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: UserSummary,
    pub token: String,
    /// Always empty: refresh tokens are not issued
    pub refresh_token: String,
    #[serde(rename = "perfil")]
    pub profile: Option<Profile>,
}

impl From<SessionGrant> for RegisterResponse {
    fn from(grant: SessionGrant) -> Self {
        Self {
            message: "Usuário criado com sucesso",
            user: UserSummary::from(&grant.identity),
            token: grant.token,
            refresh_token: String::new(),
            profile: grant.identity.profile,
        }
    }
}

/// Login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: UserSummary,
    pub token: String,
    pub refresh_token: String,
    pub expires_in: String,
}

impl From<SessionGrant> for LoginResponse {
    fn from(grant: SessionGrant) -> Self {
        Self {
            message: "Login realizado com sucesso",
            user: UserSummary::from(&grant.identity),
            token: grant.token,
            refresh_token: String::new(),
            expires_in: grant.expires_in,
        }
    }
}

/// Current-user response
#[derive(Debug, Serialize)]
pub struct MeResponse {
    #[serde(rename = "usuario")]
    pub user: UserDetail,
}

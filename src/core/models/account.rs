//! Account and role types

use super::profile::Profile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role. Closed set, immutable after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Administrator, no profile
    Admin,
    /// Doctor, owns a doctor profile
    Medico,
    /// Patient, owns a patient profile
    Paciente,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 3] = [Role::Admin, Role::Medico, Role::Paciente];

    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Medico => "MEDICO",
            Role::Paciente => "PACIENTE",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "MEDICO" => Ok(Role::Medico),
            "PACIENTE" => Ok(Role::Paciente),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Authentication identity
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    /// Email address (unique)
    pub email: String,
    /// bcrypt hash, never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(rename = "tipo")]
    pub role: Role,
    #[serde(rename = "ativo")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account joined with its optional role profile
#[derive(Debug, Clone, Serialize)]
pub struct AccountWithProfile {
    #[serde(flatten)]
    pub account: Account,
    #[serde(rename = "perfil")]
    pub profile: Option<Profile>,
}

impl AccountWithProfile {
    pub fn new(account: Account, profile: Option<Profile>) -> Self {
        Self { account, profile }
    }
}

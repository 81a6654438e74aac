use crate::core::models::{Account, Role};
use crate::utils::error::ApiError;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Account database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Account ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Email address (unique)
    #[sea_orm(unique)]
    pub email: String,

    /// bcrypt password hash
    pub password_hash: String,

    /// Role name: ADMIN, MEDICO or PACIENTE
    pub role: String,

    /// Deactivated accounts fail authentication
    pub active: bool,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Account entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Doctor profile, MEDICO accounts only
    #[sea_orm(has_one = "super::doctor::Entity")]
    Doctor,

    /// Patient profile, PACIENTE accounts only
    #[sea_orm(has_one = "super::patient::Entity")]
    Patient,
}

impl Related<super::doctor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Doctor.def()
    }
}

impl Related<super::patient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Patient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert the row into the domain account
    pub fn to_domain(&self) -> crate::utils::error::Result<Account> {
        let role = Role::from_str(&self.role).map_err(|e| {
            ApiError::internal(format!("Corrupt account row {}: {}", self.id, e))
        })?;

        Ok(Account {
            id: self.id,
            email: self.email.clone(),
            password_hash: self.password_hash.clone(),
            role,
            active: self.active,
            created_at: self.created_at.naive_utc().and_utc(),
            updated_at: self.updated_at.naive_utc().and_utc(),
        })
    }

    /// Active model for a new account
    pub fn new_active(email: &str, password_hash: &str, role: Role) -> ActiveModel {
        let now = chrono::Utc::now();
        ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            role: Set(role.to_string()),
            active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}

use crate::core::models::{NewPatientProfile, PatientProfile};
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Patient profile database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "patients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    /// National ID number (unique)
    #[sea_orm(unique)]
    pub cpf: String,

    pub birth_date: Date,

    pub phone: Option<String>,

    pub address: Option<String>,

    /// Cartão SUS number
    pub sus_card: Option<String>,

    /// Owning account (unique, 1:1)
    #[sea_orm(unique)]
    pub account_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    Account,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn to_domain(&self) -> PatientProfile {
        PatientProfile {
            id: self.id,
            account_id: self.account_id,
            name: self.name.clone(),
            cpf: self.cpf.clone(),
            birth_date: self.birth_date,
            phone: self.phone.clone(),
            address: self.address.clone(),
            sus_card: self.sus_card.clone(),
        }
    }

    pub fn new_active(account_id: Uuid, profile: &NewPatientProfile) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(profile.name.clone()),
            cpf: Set(profile.cpf.clone()),
            birth_date: Set(profile.birth_date),
            phone: Set(profile.phone.clone()),
            address: Set(profile.address.clone()),
            sus_card: Set(profile.sus_card.clone()),
            account_id: Set(account_id),
        }
    }
}

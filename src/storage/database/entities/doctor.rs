use crate::core::models::{DoctorProfile, NewDoctorProfile};
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Doctor profile database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "doctors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    /// License number (unique)
    #[sea_orm(unique)]
    pub crm: String,

    pub specialty: String,

    pub phone: Option<String>,

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
    pub fn to_domain(&self) -> DoctorProfile {
        DoctorProfile {
            id: self.id,
            account_id: self.account_id,
            name: self.name.clone(),
            crm: self.crm.clone(),
            specialty: self.specialty.clone(),
            phone: self.phone.clone(),
        }
    }

    pub fn new_active(account_id: Uuid, profile: &NewDoctorProfile) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(profile.name.clone()),
            crm: Set(profile.crm.clone()),
            specialty: Set(profile.specialty.clone()),
            phone: Set(profile.phone.clone()),
            account_id: Set(account_id),
        }
    }
}

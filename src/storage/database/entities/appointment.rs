use crate::core::models::{Appointment, AppointmentStatus, NewAppointment};
use crate::utils::error::ApiError;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Appointment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub scheduled_at: DateTimeWithTimeZone,

    pub reason: String,

    pub notes: Option<String>,

    /// AGENDADA, CONFIRMADA, REALIZADA or CANCELADA
    pub status: String,

    pub doctor_id: Uuid,

    pub patient_id: Uuid,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Profiles with appointments cannot be deleted
    #[sea_orm(
        belongs_to = "super::doctor::Entity",
        from = "Column::DoctorId",
        to = "super::doctor::Column::Id",
        on_delete = "Restrict"
    )]
    Doctor,

    #[sea_orm(
        belongs_to = "super::patient::Entity",
        from = "Column::PatientId",
        to = "super::patient::Column::Id",
        on_delete = "Restrict"
    )]
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
    pub fn to_domain(&self) -> crate::utils::error::Result<Appointment> {
        let status = AppointmentStatus::from_str(&self.status).map_err(|e| {
            ApiError::internal(format!("Corrupt appointment row {}: {}", self.id, e))
        })?;

        Ok(Appointment {
            id: self.id,
            scheduled_at: self.scheduled_at.naive_utc().and_utc(),
            reason: self.reason.clone(),
            notes: self.notes.clone(),
            status,
            doctor_id: self.doctor_id,
            patient_id: self.patient_id,
            created_at: self.created_at.naive_utc().and_utc(),
            updated_at: self.updated_at.naive_utc().and_utc(),
        })
    }

    pub fn new_active(appointment: &NewAppointment) -> ActiveModel {
        let now = chrono::Utc::now();
        ActiveModel {
            id: Set(Uuid::new_v4()),
            scheduled_at: Set(appointment.scheduled_at.into()),
            reason: Set(appointment.reason.clone()),
            notes: Set(appointment.notes.clone()),
            status: Set(AppointmentStatus::default().to_string()),
            doctor_id: Set(appointment.doctor_id),
            patient_id: Set(appointment.patient_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}

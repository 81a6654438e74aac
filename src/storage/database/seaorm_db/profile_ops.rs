use crate::core::models::{DoctorProfile, OwnerSummary, PatientProfile, ProfileWithOwner};
use crate::utils::error::{ApiError, Result};
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, account, doctor, patient};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// All doctors, ordered by name
    pub async fn list_doctors(&self) -> Result<Vec<ProfileWithOwner<DoctorProfile>>> {
        let rows = entities::Doctor::find()
            .find_also_related(entities::Account)
            .order_by_asc(doctor::Column::Name)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(doctor, owner)| with_owner(doctor.to_domain(), owner))
            .collect()
    }

    pub async fn find_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Option<ProfileWithOwner<DoctorProfile>>> {
        debug!("Finding doctor by ID: {}", doctor_id);

        entities::Doctor::find_by_id(doctor_id)
            .find_also_related(entities::Account)
            .one(&self.db)
            .await?
            .map(|(doctor, owner)| with_owner(doctor.to_domain(), owner))
            .transpose()
    }

    /// All patients, ordered by name
    pub async fn list_patients(&self) -> Result<Vec<ProfileWithOwner<PatientProfile>>> {
        let rows = entities::Patient::find()
            .find_also_related(entities::Account)
            .order_by_asc(patient::Column::Name)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(patient, owner)| with_owner(patient.to_domain(), owner))
            .collect()
    }

    pub async fn find_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Option<ProfileWithOwner<PatientProfile>>> {
        debug!("Finding patient by ID: {}", patient_id);

        entities::Patient::find_by_id(patient_id)
            .find_also_related(entities::Account)
            .one(&self.db)
            .await?
            .map(|(patient, owner)| with_owner(patient.to_domain(), owner))
            .transpose()
    }
}

fn with_owner<P>(profile: P, owner: Option<account::Model>) -> Result<ProfileWithOwner<P>> {
    let owner = owner.ok_or_else(|| ApiError::internal("Profile row without an owning account"))?;
    Ok(ProfileWithOwner {
        profile,
        owner: OwnerSummary {
            email: owner.email,
            active: owner.active,
        },
    })
}

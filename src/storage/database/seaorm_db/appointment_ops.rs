use crate::core::models::{
    AppointmentChanges, AppointmentDetail, AppointmentDoctor, AppointmentFilter,
    AppointmentPatient, NewAppointment,
};
use crate::utils::error::{ApiError, Result};
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::*;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, appointment, doctor, patient};
use super::types::{Page, SeaOrmDatabase, page_offset};

impl SeaOrmDatabase {
    /// Store a new appointment. Both parties must exist.
    pub async fn create_appointment(&self, new: &NewAppointment) -> Result<AppointmentDetail> {
        debug!(
            "Creating appointment: doctor={} patient={}",
            new.doctor_id, new.patient_id
        );

        let model = appointment::Model::new_active(new)
            .insert(&self.db)
            .await?;
        self.detail(model).await
    }

    pub async fn find_appointment(&self, appointment_id: Uuid) -> Result<Option<AppointmentDetail>> {
        debug!("Finding appointment by ID: {}", appointment_id);

        match entities::Appointment::find_by_id(appointment_id)
            .one(&self.db)
            .await?
        {
            Some(model) => Ok(Some(self.detail(model).await?)),
            None => Ok(None),
        }
    }

    /// Paginated appointment listing, earliest first. `page` is 1-based.
    pub async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Page<AppointmentDetail>> {
        let per_page = per_page.max(1);
        if page_offset(page, per_page).is_none() {
            return Err(ApiError::validation("Página fora do intervalo"));
        }

        let mut query = entities::Appointment::find();
        if let Some(status) = filter.status {
            query = query.filter(appointment::Column::Status.eq(status.to_string()));
        }
        if let Some(doctor_id) = filter.doctor_id {
            query = query.filter(appointment::Column::DoctorId.eq(doctor_id));
        }
        if let Some(patient_id) = filter.patient_id {
            query = query.filter(appointment::Column::PatientId.eq(patient_id));
        }
        if let Some(from) = filter.from {
            query = query.filter(appointment::Column::ScheduledAt.gte(stored(from)));
        }
        if let Some(until) = filter.until {
            query = query.filter(appointment::Column::ScheduledAt.lte(stored(until)));
        }

        let paginator = query
            .order_by_asc(appointment::Column::ScheduledAt)
            .paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;
        let items = self.details(models).await?;

        Ok(Page { items, total })
    }

    /// Every appointment of a doctor, earliest first
    pub async fn appointments_for_doctor(&self, doctor_id: Uuid) -> Result<Vec<AppointmentDetail>> {
        let models = entities::Appointment::find()
            .filter(appointment::Column::DoctorId.eq(doctor_id))
            .order_by_asc(appointment::Column::ScheduledAt)
            .all(&self.db)
            .await?;
        self.details(models).await
    }

    /// Every appointment of a patient, latest first
    pub async fn appointments_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<AppointmentDetail>> {
        let models = entities::Appointment::find()
            .filter(appointment::Column::PatientId.eq(patient_id))
            .order_by_desc(appointment::Column::ScheduledAt)
            .all(&self.db)
            .await?;
        self.details(models).await
    }

    /// Apply changes to an appointment. `None` when it does not exist.
    pub async fn update_appointment(
        &self,
        appointment_id: Uuid,
        changes: &AppointmentChanges,
    ) -> Result<Option<AppointmentDetail>> {
        debug!("Updating appointment: {}", appointment_id);

        let Some(model) = entities::Appointment::find_by_id(appointment_id)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        if changes.is_empty() {
            return Ok(Some(self.detail(model).await?));
        }

        let mut active: appointment::ActiveModel = model.into();
        if let Some(scheduled_at) = changes.scheduled_at {
            active.scheduled_at = Set(stored(scheduled_at));
        }
        if let Some(reason) = &changes.reason {
            active.reason = Set(reason.clone());
        }
        if let Some(notes) = &changes.notes {
            active.notes = Set(notes.clone());
        }
        if let Some(status) = changes.status {
            active.status = Set(status.to_string());
        }
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&self.db).await?;

        Ok(Some(self.detail(updated).await?))
    }

    /// `false` when nothing was deleted
    pub async fn delete_appointment(&self, appointment_id: Uuid) -> Result<bool> {
        debug!("Deleting appointment: {}", appointment_id);

        let result = entities::Appointment::delete_by_id(appointment_id)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn detail(&self, model: appointment::Model) -> Result<AppointmentDetail> {
        self.details(vec![model])
            .await?
            .pop()
            .ok_or_else(|| ApiError::internal("Appointment row vanished while loading"))
    }

    async fn details(&self, models: Vec<appointment::Model>) -> Result<Vec<AppointmentDetail>> {
        let doctor_ids: Vec<Uuid> = models.iter().map(|m| m.doctor_id).collect();
        let patient_ids: Vec<Uuid> = models.iter().map(|m| m.patient_id).collect();

        let doctors: HashMap<Uuid, doctor::Model> = entities::Doctor::find()
            .filter(doctor::Column::Id.is_in(doctor_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();
        let patients: HashMap<Uuid, patient::Model> = entities::Patient::find()
            .filter(patient::Column::Id.is_in(patient_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        models
            .iter()
            .map(|model| {
                let appointment = model.to_domain()?;
                let doctor = doctors.get(&model.doctor_id).ok_or_else(|| {
                    ApiError::internal(format!("Appointment {} without a doctor", model.id))
                })?;
                let patient = patients.get(&model.patient_id).ok_or_else(|| {
                    ApiError::internal(format!("Appointment {} without a patient", model.id))
                })?;
                Ok(AppointmentDetail {
                    appointment,
                    doctor: AppointmentDoctor {
                        name: doctor.name.clone(),
                        specialty: doctor.specialty.clone(),
                        crm: doctor.crm.clone(),
                        phone: doctor.phone.clone(),
                    },
                    patient: AppointmentPatient {
                        name: patient.name.clone(),
                        cpf: patient.cpf.clone(),
                        sus_card: patient.sus_card.clone(),
                        phone: patient.phone.clone(),
                        address: patient.address.clone(),
                    },
                })
            })
            .collect()
    }
}

/// Timestamps are kept in UTC so stored values order the same as instants
fn stored(instant: DateTime<Utc>) -> DateTime<FixedOffset> {
    instant.fixed_offset()
}

//! Appointments between a doctor and a patient

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Appointment lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppointmentStatus {
    #[default]
    Agendada,
    Confirmada,
    Realizada,
    Cancelada,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Agendada,
        AppointmentStatus::Confirmada,
        AppointmentStatus::Realizada,
        AppointmentStatus::Cancelada,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Agendada => "AGENDADA",
            AppointmentStatus::Confirmada => "CONFIRMADA",
            AppointmentStatus::Realizada => "REALIZADA",
            AppointmentStatus::Cancelada => "CANCELADA",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Invalid appointment status: {}", s))
    }
}

/// Stored appointment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    #[serde(rename = "dataHora")]
    pub scheduled_at: DateTime<Utc>,
    #[serde(rename = "motivo")]
    pub reason: String,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    #[serde(rename = "medicoId")]
    pub doctor_id: Uuid,
    #[serde(rename = "pacienteId")]
    pub patient_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Doctor fields shown alongside an appointment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentDoctor {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "especialidade")]
    pub specialty: String,
    pub crm: String,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
}

/// Patient fields shown alongside an appointment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentPatient {
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    #[serde(rename = "cartaoSus")]
    pub sus_card: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(rename = "endereco")]
    pub address: Option<String>,
}

/// Appointment with both parties
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentDetail {
    #[serde(flatten)]
    pub appointment: Appointment,
    #[serde(rename = "medico")]
    pub doctor: AppointmentDoctor,
    #[serde(rename = "paciente")]
    pub patient: AppointmentPatient,
}

/// Validated fields of a new appointment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub scheduled_at: DateTime<Utc>,
    pub reason: String,
    pub notes: Option<String>,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
}

/// Fields to change on an existing appointment. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentChanges {
    pub scheduled_at: Option<DateTime<Utc>>,
    pub reason: Option<String>,
    /// `Some(None)` clears the notes
    pub notes: Option<Option<String>>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentChanges {
    pub fn is_empty(&self) -> bool {
        self.scheduled_at.is_none()
            && self.reason.is_none()
            && self.notes.is_none()
            && self.status.is_none()
    }
}

/// Filters for the paginated appointment listing. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub doctor_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

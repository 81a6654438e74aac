//! Role-specific profiles attached 1:1 to an account

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

/// Doctor profile, owned by a MEDICO account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfile {
    pub id: Uuid,
    #[serde(rename = "usuarioId")]
    pub account_id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    /// License number (unique)
    pub crm: String,
    #[serde(rename = "especialidade")]
    pub specialty: String,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
}

/// Patient profile, owned by a PACIENTE account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    pub id: Uuid,
    #[serde(rename = "usuarioId")]
    pub account_id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    /// National ID number (unique)
    pub cpf: String,
    #[serde(rename = "dataNascimento")]
    pub birth_date: NaiveDate,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(rename = "endereco")]
    pub address: Option<String>,
    /// Health card number (Cartão SUS)
    #[serde(rename = "cartaoSus")]
    pub sus_card: Option<String>,
}

/// Profile of whichever kind the account role calls for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Profile {
    Doctor(DoctorProfile),
    Patient(PatientProfile),
}

impl Profile {
    pub fn as_doctor(&self) -> Option<&DoctorProfile> {
        match self {
            Profile::Doctor(doctor) => Some(doctor),
            Profile::Patient(_) => None,
        }
    }

    pub fn as_patient(&self) -> Option<&PatientProfile> {
        match self {
            Profile::Patient(patient) => Some(patient),
            Profile::Doctor(_) => None,
        }
    }
}

/// Validated doctor fields for a new registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDoctorProfile {
    pub name: String,
    pub crm: String,
    pub specialty: String,
    pub phone: Option<String>,
}

/// Validated patient fields for a new registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatientProfile {
    pub name: String,
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub sus_card: Option<String>,
}

/// Summary of the account owning a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerSummary {
    pub email: String,
    #[serde(rename = "ativo")]
    pub active: bool,
}

/// Profile listed together with its owning account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileWithOwner<P> {
    #[serde(flatten)]
    pub profile: P,
    #[serde(rename = "usuario")]
    pub owner: OwnerSummary,
}

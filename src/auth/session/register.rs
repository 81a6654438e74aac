//! Account registration

use super::types::{MIN_PASSWORD_LEN, RegisterRequest, SessionGrant, present, present_secret};
use crate::auth::system::AuthSystem;
use crate::core::models::{
    Account, AccountWithProfile, NewDoctorProfile, NewPatientProfile, Profile, Role,
};
use crate::storage::database::RegistrationTx;
use crate::utils::error::{ApiError, Result};
use chrono::NaiveDate;
use std::str::FromStr;
use tracing::{info, warn};

const REQUIRED_FIELDS: [&str; 4] = ["email", "senha", "tipo", "nome"];

impl AuthSystem {
    /// Register an account with its role profile and issue its first token.
    ///
    /// The account and profile are written in one transaction; a profile that fails
    /// validation or insertion leaves no account behind.
    pub async fn register(&self, request: &RegisterRequest) -> Result<SessionGrant> {
        let (Some(email), Some(password), Some(role), Some(name)) = (
            present(&request.email),
            present_secret(&request.password),
            present(&request.role),
            present(&request.name),
        ) else {
            return Err(ApiError::missing_fields(
                "Dados obrigatórios não fornecidos",
                REQUIRED_FIELDS.to_vec(),
            ));
        };

        let role = Role::from_str(role).map_err(|_| {
            ApiError::invalid_choice(
                "Tipo de usuário inválido",
                Role::ALL.iter().map(Role::as_str).collect(),
            )
        })?;

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::validation(format!(
                "Senha deve ter pelo menos {} caracteres",
                MIN_PASSWORD_LEN
            )));
        }

        info!("Registering new {} account: {}", role, email);

        if self.storage.db().email_exists(email).await? {
            return Err(ApiError::DuplicateEmail);
        }

        let password_hash = self.hasher.hash(password).await?;

        let tx = self.storage.db().begin_registration().await?;
        let written = write_registration(&tx, email, &password_hash, role, name, request).await;
        let identity = match written {
            Ok(identity) => {
                tx.commit().await?;
                identity
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Registration rollback failed: {}", rollback_err);
                }
                return Err(e);
            }
        };

        let account = &identity.account;
        let token = self.jwt.issue(account.id, &account.email, account.role)?;

        info!("Account registered: {}", account.id);
        Ok(SessionGrant {
            identity,
            token,
            expires_in: self.jwt.expires_in_label().to_string(),
        })
    }
}

async fn write_registration(
    tx: &RegistrationTx,
    email: &str,
    password_hash: &str,
    role: Role,
    name: &str,
    request: &RegisterRequest,
) -> Result<AccountWithProfile> {
    let account: Account = tx.insert_account(email, password_hash, role).await?;

    let profile = match role {
        Role::Admin => None,
        Role::Medico => {
            let fields = doctor_fields(name, request)?;
            Some(Profile::Doctor(tx.insert_doctor(account.id, &fields).await?))
        }
        Role::Paciente => {
            let fields = patient_fields(name, request)?;
            Some(Profile::Patient(tx.insert_patient(account.id, &fields).await?))
        }
    };

    Ok(AccountWithProfile::new(account, profile))
}

fn doctor_fields(name: &str, request: &RegisterRequest) -> Result<NewDoctorProfile> {
    let (Some(crm), Some(specialty)) = (present(&request.crm), present(&request.specialty)) else {
        return Err(ApiError::validation(
            "CRM e especialidade são obrigatórios para médicos",
        ));
    };

    Ok(NewDoctorProfile {
        name: name.to_string(),
        crm: crm.to_string(),
        specialty: specialty.to_string(),
        phone: present(&request.phone).map(str::to_string),
    })
}

fn patient_fields(name: &str, request: &RegisterRequest) -> Result<NewPatientProfile> {
    let Some(cpf) = present(&request.cpf) else {
        return Err(ApiError::validation("CPF é obrigatório para pacientes"));
    };

    let birth_date = match present(&request.birth_date) {
        Some(raw) => parse_birth_date(raw)?,
        None => default_birth_date(),
    };

    Ok(NewPatientProfile {
        name: name.to_string(),
        cpf: cpf.to_string(),
        birth_date,
        phone: present(&request.phone).map(str::to_string),
        address: present(&request.address).map(str::to_string),
        sus_card: present(&request.sus_card).map(str::to_string),
    })
}

/// Accepts `YYYY-MM-DD` or a full timestamp starting with one
pub(crate) fn parse_birth_date(raw: &str) -> Result<NaiveDate> {
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| ApiError::validation("Data de nascimento inválida"))
}

pub(crate) fn default_birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default()
}

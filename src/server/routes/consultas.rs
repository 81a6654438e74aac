//! Appointment scheduling between doctors and patients
//!
//! Every route needs an authenticated caller. ADMIN sees every appointment, a MEDICO only
//! the ones they attend and a PACIENTE only their own.

use super::{MessageResponse, Pagination, PaginationQuery, parse_id};
use crate::auth::session::types::present;
use crate::auth::AuthenticatedContext;
use crate::core::models::{
    Appointment, AppointmentChanges, AppointmentDetail, AppointmentFilter, AppointmentStatus,
    NewAppointment, Profile, Role,
};
use crate::server::middleware::{AuthMiddleware, RequireRole};
use crate::server::state::AppState;
use crate::storage::database::page_offset;
use crate::utils::error::ApiError;
use actix_web::{HttpResponse, Result as ActixResult, web};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;
use uuid::Uuid;

const NOT_FOUND: &str = "Consulta não encontrada";
const DOCTOR_NOT_FOUND: &str = "Médico não encontrado";
const PATIENT_NOT_FOUND: &str = "Paciente não encontrado";
const NOT_YOURS: &str = "Você só pode acessar suas próprias consultas";

/// Roles allowed to create and edit appointments
const SCHEDULERS: [Role; 2] = [Role::Admin, Role::Medico];

/// Configure appointment routes. Role gates sit on the individual routes, inside the
/// scope's auth middleware.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/consultas")
            .wrap(AuthMiddleware)
            .route("", web::get().to(list_appointments))
            .route(
                "",
                web::post()
                    .to(create_appointment)
                    .wrap(RequireRole::new(&SCHEDULERS)),
            )
            .route("/medico/{id}", web::get().to(appointments_for_doctor))
            .route("/paciente/{id}", web::get().to(appointments_for_patient))
            .route("/{id}", web::get().to(get_appointment))
            .route(
                "/{id}",
                web::put()
                    .to(update_appointment)
                    .wrap(RequireRole::new(&SCHEDULERS)),
            )
            .route(
                "/{id}",
                web::delete()
                    .to(delete_appointment)
                    .wrap(RequireRole::admin()),
            ),
    );
}

/// Which appointments a caller may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    All,
    Doctor(Uuid),
    Patient(Uuid),
    /// MEDICO or PACIENTE account without its profile row
    Nothing,
}

impl Visibility {
    pub fn for_caller(role: Role, profile: Option<&Profile>) -> Self {
        match role {
            Role::Admin => Visibility::All,
            Role::Medico => profile
                .and_then(Profile::as_doctor)
                .map_or(Visibility::Nothing, |doctor| Visibility::Doctor(doctor.id)),
            Role::Paciente => profile
                .and_then(Profile::as_patient)
                .map_or(Visibility::Nothing, |patient| Visibility::Patient(patient.id)),
        }
    }

    fn of(ctx: &AuthenticatedContext) -> Self {
        Self::for_caller(ctx.role(), ctx.profile())
    }

    pub fn permits(&self, appointment: &Appointment) -> bool {
        match self {
            Visibility::All => true,
            Visibility::Doctor(id) => appointment.doctor_id == *id,
            Visibility::Patient(id) => appointment.patient_id == *id,
            Visibility::Nothing => false,
        }
    }

    /// Restrict a listing filter to this caller. `false` when nothing is visible.
    pub fn narrow(&self, filter: &mut AppointmentFilter) -> bool {
        match self {
            Visibility::All => true,
            Visibility::Doctor(id) => {
                filter.doctor_id = Some(*id);
                true
            }
            Visibility::Patient(id) => {
                filter.patient_id = Some(*id);
                true
            }
            Visibility::Nothing => false,
        }
    }
}

/// Scheduling body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAppointmentRequest {
    #[serde(rename = "dataHora")]
    pub scheduled_at: Option<String>,
    #[serde(rename = "motivo")]
    pub reason: Option<String>,
    #[serde(rename = "medicoId")]
    pub doctor_id: Option<String>,
    #[serde(rename = "pacienteId")]
    pub patient_id: Option<String>,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
}

impl CreateAppointmentRequest {
    /// Check required fields and parse them. Past dates are refused against `now`.
    fn validate(&self, now: DateTime<Utc>) -> Result<NewAppointment, ApiError> {
        let (Some(scheduled_at), Some(reason), Some(doctor_id), Some(patient_id)) = (
            present(&self.scheduled_at),
            present(&self.reason),
            present(&self.doctor_id),
            present(&self.patient_id),
        ) else {
            return Err(ApiError::missing_fields(
                "Dados obrigatórios não fornecidos",
                vec!["dataHora", "motivo", "medicoId", "pacienteId"],
            ));
        };

        let scheduled_at = parse_instant(scheduled_at)?;
        if scheduled_at < now {
            return Err(ApiError::validation(
                "Data da consulta não pode ser no passado",
            ));
        }

        Ok(NewAppointment {
            scheduled_at,
            reason: reason.to_string(),
            notes: present(&self.notes).map(str::to_string),
            doctor_id: parse_id(doctor_id, DOCTOR_NOT_FOUND)?,
            patient_id: parse_id(patient_id, PATIENT_NOT_FOUND)?,
        })
    }
}

/// Update body. Absent fields stay as they are; `"observacoes": null` clears the notes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAppointmentRequest {
    #[serde(rename = "dataHora")]
    pub scheduled_at: Option<String>,
    #[serde(rename = "motivo")]
    pub reason: Option<String>,
    #[serde(rename = "observacoes", default, deserialize_with = "explicit_null")]
    pub notes: Option<Option<String>>,
    pub status: Option<String>,
}

fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl UpdateAppointmentRequest {
    fn validate(&self, now: DateTime<Utc>) -> Result<AppointmentChanges, ApiError> {
        let scheduled_at = match present(&self.scheduled_at) {
            Some(raw) => {
                let instant = parse_instant(raw)?;
                if instant < now {
                    return Err(ApiError::validation(
                        "Data da consulta não pode ser no passado",
                    ));
                }
                Some(instant)
            }
            None => None,
        };

        Ok(AppointmentChanges {
            scheduled_at,
            reason: present(&self.reason).map(str::to_string),
            notes: self.notes.clone(),
            status: parse_status(present(&self.status))?,
        })
    }
}

/// Query parameters of the appointment listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAppointmentsQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<String>,
    #[serde(rename = "medicoId")]
    pub doctor_id: Option<String>,
    #[serde(rename = "pacienteId")]
    pub patient_id: Option<String>,
    #[serde(rename = "dataInicio")]
    pub from: Option<String>,
    #[serde(rename = "dataFim")]
    pub until: Option<String>,
}

/// Default page size of the appointment listing
const DEFAULT_LIMIT: u64 = 100;

impl ListAppointmentsQuery {
    fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page.unwrap_or(1),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
        }
    }

    fn filter(&self) -> Result<AppointmentFilter, ApiError> {
        let id = |raw: &Option<String>, field: &str| {
            present(raw)
                .map(|v| {
                    Uuid::parse_str(v)
                        .map_err(|_| ApiError::validation(format!("{} inválido", field)))
                })
                .transpose()
        };

        Ok(AppointmentFilter {
            status: parse_status(present(&self.status))?,
            doctor_id: id(&self.doctor_id, "medicoId")?,
            patient_id: id(&self.patient_id, "pacienteId")?,
            from: present(&self.from).map(|v| parse_bound(v, NaiveTime::MIN)).transpose()?,
            until: present(&self.until)
                .map(|v| parse_bound(v, end_of_day()))
                .transpose()?,
        })
    }
}

/// Listing pagination with navigation flags
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPagination {
    #[serde(flatten)]
    pub base: Pagination,
    pub has_next: bool,
    pub has_prev: bool,
}

impl AppointmentPagination {
    pub fn new(total: u64, page: u64, per_page: u64) -> Self {
        let seen = page_offset(page, per_page)
            .unwrap_or(u64::MAX)
            .saturating_add(per_page);
        Self {
            base: Pagination::new(total, page, per_page),
            has_next: seen < total,
            has_prev: page > 1,
        }
    }
}

/// One page of appointments
#[derive(Debug, Serialize)]
pub struct ListAppointmentsResponse {
    pub consultas: Vec<AppointmentDetail>,
    pub pagination: AppointmentPagination,
}

#[derive(Debug, Serialize)]
pub struct AppointmentResponse {
    pub message: &'static str,
    pub consulta: AppointmentDetail,
}

/// Schedule an appointment (ADMIN or MEDICO)
pub async fn create_appointment(
    state: web::Data<AppState>,
    ctx: AuthenticatedContext,
    request: web::Json<CreateAppointmentRequest>,
) -> ActixResult<HttpResponse> {
    let appointment = request.validate(Utc::now())?;
    let db = state.storage.db();

    if db.find_doctor(appointment.doctor_id).await?.is_none() {
        return Err(ApiError::not_found(DOCTOR_NOT_FOUND).into());
    }
    if db.find_patient(appointment.patient_id).await?.is_none() {
        return Err(ApiError::not_found(PATIENT_NOT_FOUND).into());
    }

    let consulta = db.create_appointment(&appointment).await?;
    info!(
        "Appointment {} scheduled by {}",
        consulta.appointment.id,
        ctx.account_id()
    );

    Ok(HttpResponse::Created().json(AppointmentResponse {
        message: "Consulta criada com sucesso",
        consulta,
    }))
}

/// Paginated listing, earliest first, limited to what the caller may see
pub async fn list_appointments(
    state: web::Data<AppState>,
    ctx: AuthenticatedContext,
    query: web::Query<ListAppointmentsQuery>,
) -> ActixResult<HttpResponse> {
    let pagination = query.pagination();
    pagination.validate()?;
    let mut filter = query.filter()?;

    let (consultas, total) = if Visibility::of(&ctx).narrow(&mut filter) {
        let page = state
            .storage
            .db()
            .list_appointments(&filter, pagination.page, pagination.limit)
            .await?;
        (page.items, page.total)
    } else {
        (Vec::new(), 0)
    };

    Ok(HttpResponse::Ok().json(ListAppointmentsResponse {
        consultas,
        pagination: AppointmentPagination::new(total, pagination.page, pagination.limit),
    }))
}

/// One appointment with both parties
pub async fn get_appointment(
    state: web::Data<AppState>,
    ctx: AuthenticatedContext,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let appointment_id = parse_id(&path, NOT_FOUND)?;
    let consulta = state
        .storage
        .db()
        .find_appointment(appointment_id)
        .await?
        .ok_or(ApiError::not_found(NOT_FOUND))?;

    if !Visibility::of(&ctx).permits(&consulta.appointment) {
        return Err(ApiError::forbidden(NOT_YOURS, Some(ctx.role())).into());
    }

    Ok(HttpResponse::Ok().json(consulta))
}

/// Change date, reason, notes or status (ADMIN, or the attending MEDICO)
pub async fn update_appointment(
    state: web::Data<AppState>,
    ctx: AuthenticatedContext,
    path: web::Path<String>,
    request: web::Json<UpdateAppointmentRequest>,
) -> ActixResult<HttpResponse> {
    let appointment_id = parse_id(&path, NOT_FOUND)?;
    let db = state.storage.db();

    let existing = db
        .find_appointment(appointment_id)
        .await?
        .ok_or(ApiError::not_found(NOT_FOUND))?;
    if !Visibility::of(&ctx).permits(&existing.appointment) {
        return Err(ApiError::forbidden(NOT_YOURS, Some(ctx.role())).into());
    }

    let changes = request.validate(Utc::now())?;
    let consulta = db
        .update_appointment(appointment_id, &changes)
        .await?
        .ok_or(ApiError::not_found(NOT_FOUND))?;
    info!(
        "Appointment {} updated by {}",
        appointment_id,
        ctx.account_id()
    );

    Ok(HttpResponse::Ok().json(AppointmentResponse {
        message: "Consulta atualizada com sucesso",
        consulta,
    }))
}

/// Remove an appointment (ADMIN)
pub async fn delete_appointment(
    state: web::Data<AppState>,
    ctx: AuthenticatedContext,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let appointment_id = parse_id(&path, NOT_FOUND)?;

    if !state.storage.db().delete_appointment(appointment_id).await? {
        return Err(ApiError::not_found(NOT_FOUND).into());
    }
    info!(
        "Appointment {} deleted by {}",
        appointment_id,
        ctx.account_id()
    );

    Ok(HttpResponse::Ok().json(MessageResponse::new("Consulta deletada com sucesso")))
}

/// A doctor's agenda, earliest first. A MEDICO may only open their own.
pub async fn appointments_for_doctor(
    state: web::Data<AppState>,
    ctx: AuthenticatedContext,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let doctor_id = parse_id(&path, DOCTOR_NOT_FOUND)?;
    let visibility = Visibility::of(&ctx);
    if matches!(visibility, Visibility::Doctor(own) if own != doctor_id) {
        return Err(ApiError::forbidden(NOT_YOURS, Some(ctx.role())).into());
    }

    let consultas = state.storage.db().appointments_for_doctor(doctor_id).await?;
    Ok(HttpResponse::Ok().json(visible(consultas, visibility)))
}

/// A patient's history, latest first. A PACIENTE may only open their own.
pub async fn appointments_for_patient(
    state: web::Data<AppState>,
    ctx: AuthenticatedContext,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let patient_id = parse_id(&path, PATIENT_NOT_FOUND)?;
    let visibility = Visibility::of(&ctx);
    if matches!(visibility, Visibility::Patient(own) if own != patient_id) {
        return Err(ApiError::forbidden(NOT_YOURS, Some(ctx.role())).into());
    }

    let consultas = state
        .storage
        .db()
        .appointments_for_patient(patient_id)
        .await?;
    Ok(HttpResponse::Ok().json(visible(consultas, visibility)))
}

fn visible(consultas: Vec<AppointmentDetail>, visibility: Visibility) -> Vec<AppointmentDetail> {
    consultas
        .into_iter()
        .filter(|c| visibility.permits(&c.appointment))
        .collect()
}

fn parse_status(raw: Option<&str>) -> Result<Option<AppointmentStatus>, ApiError> {
    raw.map(|v| {
        v.parse::<AppointmentStatus>().map_err(|_| {
            ApiError::invalid_choice(
                "Status inválido",
                AppointmentStatus::ALL
                    .iter()
                    .map(AppointmentStatus::as_str)
                    .collect(),
            )
        })
    })
    .transpose()
}

/// RFC 3339, or a local date-time without offset taken as UTC
fn parse_instant(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ApiError::validation("Data inválida"))
}

/// Listing bound: a full instant, or a bare date pinned to `time` of that day
fn parse_bound(raw: &str, time: NaiveTime) -> Result<DateTime<Utc>, ApiError> {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Ok(date.and_time(time).and_utc()),
        Err(_) => parse_instant(raw),
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

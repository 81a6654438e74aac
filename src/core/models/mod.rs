//! Core data models
//!
//! Accounts, roles, the doctor/patient profiles attached to them and their appointments.

pub mod account;
pub mod appointment;
pub mod profile;

pub use account::{Account, AccountWithProfile, Role};
pub use appointment::{
    Appointment, AppointmentChanges, AppointmentDetail, AppointmentDoctor, AppointmentFilter,
    AppointmentPatient, AppointmentStatus, NewAppointment,
};
pub use profile::{
    DoctorProfile, NewDoctorProfile, NewPatientProfile, OwnerSummary, PatientProfile, Profile,
    ProfileWithOwner,
};

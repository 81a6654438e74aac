// Module declarations
mod account_ops;
mod appointment_ops;
mod connection;
mod profile_ops;
mod registration;
mod types;

// Re-export public types
pub use types::{
    AccountFilter, DatabaseBackendType, Page, RegistrationTx, SeaOrmDatabase, page_offset,
};

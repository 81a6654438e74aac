/// Account entity module
pub mod account;
/// Appointment entity module
pub mod appointment;
/// Doctor profile entity module
pub mod doctor;
/// Patient profile entity module
pub mod patient;

pub use account::Entity as Account;
pub use appointment::Entity as Appointment;
pub use doctor::Entity as Doctor;
pub use patient::Entity as Patient;

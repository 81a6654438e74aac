//! Session and credential flows: register, login, me, change-password

mod credentials;
mod login;
mod register;
pub mod types;


pub use types::{ChangePasswordRequest, LoginRequest, RegisterRequest, SessionGrant};

//! Error handling for the API
//!
//! One error type for the whole crate. Store errors are translated centrally in
//! `conversions`, and every variant maps to a status code and JSON body in `response`.

mod conversions;
mod helpers;
mod response;
mod types;

pub use response::{ErrorResponse, expose_internal_details};
pub use types::{ApiError, AuthFailure, FieldHint, Result};

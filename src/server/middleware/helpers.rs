//! Helper functions for middleware

use actix_web::http::header::{AUTHORIZATION, HeaderMap};

/// Raw `Authorization` header value. `None` when absent or not valid visible ASCII.
pub fn authorization_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}


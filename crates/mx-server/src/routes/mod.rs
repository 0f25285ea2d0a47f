//! Route handlers for the HTTP API.

pub mod config;
pub mod health;
pub mod movies;

use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};

/// Attach `Cache-Control: public, max-age=<secs>` to a response.
pub(crate) fn with_max_age(max_age_secs: u64, body: impl IntoResponse) -> Response {
    let mut response = body.into_response();
    if let Ok(value) = HeaderValue::from_str(&format!("public, max-age={max_age_secs}")) {
        response.headers_mut().insert(header::CACHE_CONTROL, value);
    }
    response
}

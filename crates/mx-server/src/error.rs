//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`mx_core::Error`] so that route handlers
//! can return `Result<T, AppError>` directly. Server-side failures are logged
//! in full and answered with a generic message.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
pub struct AppError {
    inner: mx_core::Error,
    message: Option<String>,
}

impl AppError {
    pub fn new(inner: mx_core::Error) -> Self {
        Self {
            inner,
            message: None,
        }
    }

    /// Answer 500 with `message` whatever the underlying failure was. The
    /// original error is still logged.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn status(&self) -> StatusCode {
        if self.message.is_some() {
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
        StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn code(&self) -> &'static str {
        if self.message.is_some() {
            "internal_error"
        } else {
            self.inner.code()
        }
    }

    fn public_message(&self) -> String {
        if let Some(ref message) = self.message {
            return message.clone();
        }
        match &self.inner {
            mx_core::Error::InvalidQuery(reason) => reason.to_string(),
            mx_core::Error::Validation(msg) => msg.clone(),
            mx_core::Error::NotFound { entity, .. } => {
                let mut entity = entity.clone();
                if let Some(first) = entity.get_mut(..1) {
                    first.make_ascii_uppercase();
                }
                format!("{entity} not found")
            }
            mx_core::Error::RateLimited { .. } => {
                "Rate limit exceeded. Please try again later.".to_string()
            }
            mx_core::Error::Upstream { .. }
            | mx_core::Error::Config(_)
            | mx_core::Error::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl From<mx_core::Error> for AppError {
    fn from(e: mx_core::Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Server error in API handler"
            );
        }

        let body = json!({
            "error": self.public_message(),
            "code": self.code(),
        });

        let mut response = (status, axum::Json(body)).into_response();

        if let (
            StatusCode::TOO_MANY_REQUESTS,
            mx_core::Error::RateLimited {
                retry_after: Some(secs),
            },
        ) = (status, &self.inner)
        {
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        response
    }
}

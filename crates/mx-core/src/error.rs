//! Unified error type for the movie explorer.
//!
//! All crates funnel their failures into [`Error`], which carries enough
//! context for the HTTP layer to derive a status code via
//! [`Error::http_status`] and a machine-readable code via [`Error::code`].

use std::fmt;

/// Why a search query was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Absent, empty, or whitespace-only.
    #[error("Query parameter is required")]
    Missing,
    /// Fewer than two characters after trimming.
    #[error("Query must be at least 2 characters long")]
    TooShort,
}

/// Unified error type covering all failure modes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The search text failed validation.
    #[error("{0}")]
    InvalidQuery(QueryError),

    /// Other caller-supplied input failed validation.
    #[error("{0}")]
    Validation(String),

    /// The upstream API does not know the requested entity.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "movie").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// The upstream API signalled rate limiting.
    #[error("Upstream rate limit exceeded")]
    RateLimited {
        /// Seconds the upstream asked us to wait, when it said so.
        retry_after: Option<u64>,
    },

    /// Any other upstream failure: non-success status, transport, or decode.
    #[error("Upstream error{}: {}", status_suffix(.status), .message)]
    Upstream {
        /// HTTP status returned by the upstream, if a response was received.
        status: Option<u16>,
        /// Human-readable error description.
        message: String,
    },

    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::InvalidQuery(_) => 400,
            Error::Validation(_) => 400,
            Error::NotFound { .. } => 404,
            Error::RateLimited { .. } => 429,
            Error::Upstream { .. } => 500,
            Error::Config(_) => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Short machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidQuery(_) => "invalid_query",
            Error::Validation(_) => "validation_error",
            Error::NotFound { .. } => "not_found",
            Error::RateLimited { .. } => "rate_limited",
            Error::Upstream { .. } => "upstream_error",
            Error::Config(_) => "config_error",
            Error::Internal(_) => "internal_error",
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::Upstream`].
    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Error::Upstream {
            status,
            message: message.into(),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" [{s}]")).unwrap_or_default()
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

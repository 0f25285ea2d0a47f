//! Boundary validation for search and detail requests.
//!
//! Invalid queries are rejected so no upstream call is wasted on an empty
//! search term. Invalid page numbers fall back to page 1 instead, so stale or
//! hand-edited URLs still render something.

use crate::error::{Error, QueryError, Result};

/// Minimum number of characters in a trimmed search query.
pub const MIN_QUERY_CHARS: usize = 2;

/// Validate and normalize raw search text.
///
/// Returns the trimmed text. Length is counted in characters, not bytes.
pub fn validate_query(raw: Option<&str>) -> Result<String> {
    let trimmed = raw.map(str::trim).unwrap_or_default();

    if trimmed.is_empty() {
        return Err(Error::InvalidQuery(QueryError::Missing));
    }

    if trimmed.chars().count() < MIN_QUERY_CHARS {
        return Err(Error::InvalidQuery(QueryError::TooShort));
    }

    Ok(trimmed.to_string())
}

/// Parse a page number, defaulting to 1 for anything that is not a positive
/// base-10 integer.
pub fn validate_page(raw: Option<&str>) -> u32 {
    raw.and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|&p| p >= 1)
        .unwrap_or(1)
}

/// Parse a movie id from a path segment.
pub fn parse_movie_id(raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| Error::Validation("Invalid movie ID".into()))
}

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub page: u32,
}

impl SearchQuery {
    /// Validate raw query-string values into a canonical request.
    pub fn parse(q: Option<&str>, page: Option<&str>) -> Result<Self> {
        Ok(Self {
            text: validate_query(q)?,
            page: validate_page(page),
        })
    }
}

//! UI-facing view types.
//!
//! These are the shapes the HTTP API returns. Image fields hold absolute URLs
//! (or `null` when no artwork is available) so the UI never has to know about
//! the upstream image CDN layout.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// One entry of a search result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchResultView {
    pub id: u64,
    pub title: String,
    /// ISO date (`YYYY-MM-DD`) or empty when unknown.
    pub release_date: String,
    pub overview: String,
    pub poster_url: Option<String>,
    pub vote_average: f64,
}

/// A page of search results.
///
/// `page`, `total_pages` and `total_results` are copied from the upstream
/// response unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchPage {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
    pub results: Vec<SearchResultView>,
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// Full detail view of a single movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MovieDetailView {
    pub id: u64,
    pub title: String,
    pub release_date: String,
    pub overview: String,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub vote_average: f64,
    /// Runtime in minutes.
    pub runtime: u32,
    /// Genre names in upstream order.
    pub genres: Vec<String>,
    /// Top-billed cast, at most five, in upstream order.
    pub cast: Vec<CastMemberView>,
    /// YouTube trailers, at most three, in upstream order.
    pub trailers: Vec<TrailerView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CastMemberView {
    pub id: u64,
    pub name: String,
    pub character: String,
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TrailerView {
    /// Video key on the hosting site (the YouTube video id).
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
}

// ---------------------------------------------------------------------------
// Display configuration
// ---------------------------------------------------------------------------

/// The subset of the upstream image configuration the UI needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DisplayConfiguration {
    pub images: DisplayImages,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DisplayImages {
    pub secure_base_url: String,
    pub poster_sizes: Vec<String>,
    pub backdrop_sizes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailer_serializes_kind_as_type() {
        let trailer = TrailerView {
            key: "abc123".into(),
            site: "YouTube".into(),
            kind: "Trailer".into(),
        };
        let json = serde_json::to_value(&trailer).unwrap();
        assert_eq!(json["type"], "Trailer");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn missing_poster_serializes_as_null() {
        let view = SearchResultView {
            id: 1,
            title: "Heat".into(),
            release_date: "1995-12-15".into(),
            overview: String::new(),
            poster_url: None,
            vote_average: 7.9,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert!(json["poster_url"].is_null());
    }
}

//! TMDB v3 response types.
//!
//! Only the fields the service reads are modelled; serde ignores the rest.
//! Nullable text fields collapse to empty strings so the views never carry
//! `null` titles or overviews.

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// `GET /configuration`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfiguration {
    pub images: RemoteImageConfiguration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteImageConfiguration {
    pub secure_base_url: String,
    #[serde(default)]
    pub poster_sizes: Vec<String>,
    #[serde(default)]
    pub backdrop_sizes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// `GET /search/movie`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSearchPage {
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub results: Vec<RemoteMovieSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteMovieSummary {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Option<Vec<RemoteGenre>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteGenre {
    pub id: u64,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// `GET /movie/{id}?append_to_response=videos,credits`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteMovieDetail {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub runtime: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<RemoteGenre>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub videos: RemoteVideos,
    #[serde(default, deserialize_with = "null_as_default")]
    pub credits: RemoteCredits,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteVideos {
    #[serde(default)]
    pub results: Vec<RemoteVideo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteVideo {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteCredits {
    #[serde(default)]
    pub cast: Vec<RemoteCastMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteCastMember {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

//! TMDB (The Movie Database) API client.
//!
//! [`TmdbClient`] implements [`MovieApi`] against the TMDB v3 REST API:
//!
//! - Bearer-token authentication with a v4 read access token.
//! - Optional token-bucket pacing via [`governor`]. Requests wait for a
//!   permit; failed requests are never retried.
//! - Status mapping: 404 on a detail lookup becomes [`Error::NotFound`], 429
//!   becomes [`Error::RateLimited`], everything else non-2xx becomes
//!   [`Error::Upstream`].

use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use mx_core::config::TmdbConfig;
use mx_core::{Error, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::models::{RemoteConfiguration, RemoteMovieDetail, RemoteSearchPage};

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// The three upstream calls the service depends on.
///
/// Implemented by [`TmdbClient`]; tests substitute their own implementations
/// or point the client at a mock server.
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// `GET /configuration`
    async fn configuration(&self) -> Result<RemoteConfiguration>;

    /// `GET /search/movie`
    async fn search_movies(&self, query: &str, page: u32) -> Result<RemoteSearchPage>;

    /// `GET /movie/{id}` with videos and credits appended.
    async fn movie_details(&self, id: u64) -> Result<RemoteMovieDetail>;
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
    language: String,
    include_adult: bool,
    limiter: Option<Arc<DirectLimiter>>,
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .field("include_adult", &self.include_adult)
            .finish_non_exhaustive()
    }
}

impl TmdbClient {
    /// Build a client from the `[tmdb]` config section.
    pub fn new(config: &TmdbConfig) -> Result<Self> {
        let access_token = config
            .access_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::Config("tmdb.access_token is required".into()))?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))?;

        let limiter = NonZeroU32::new(config.requests_per_second)
            .map(|rps| Arc::new(RateLimiter::direct(Quota::per_second(rps))));

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            access_token,
            language: config.language.clone(),
            include_adult: config.include_adult,
            limiter,
        })
    }

    /// Execute a GET request and decode the JSON body.
    ///
    /// `not_found` names the entity a 404 refers to; when `None`, a 404 is
    /// treated like any other upstream failure.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        not_found: Option<(&str, &str)>,
    ) -> Result<T> {
        if let Some(ref limiter) = self.limiter {
            limiter.until_ready().await;
        }

        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "TMDB request");

        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(params)
            .send()
            .await
            .map_err(|e| Error::upstream(None, format!("TMDB request failed: {e}")))?;

        let status = resp.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            warn!(path, retry_after, "TMDB rate limit exceeded");
            return Err(Error::RateLimited { retry_after });
        }

        if status == StatusCode::NOT_FOUND {
            if let Some((entity, id)) = not_found {
                return Err(Error::not_found(entity, id));
            }
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::upstream(
                Some(status.as_u16()),
                format!("TMDB {status}: {body}"),
            ));
        }

        resp.json::<T>().await.map_err(|e| {
            Error::upstream(Some(status.as_u16()), format!("TMDB parse error: {e}"))
        })
    }
}

#[async_trait]
impl MovieApi for TmdbClient {
    async fn configuration(&self) -> Result<RemoteConfiguration> {
        self.get("/configuration", &[], None).await
    }

    async fn search_movies(&self, query: &str, page: u32) -> Result<RemoteSearchPage> {
        let page = page.to_string();
        let include_adult = if self.include_adult { "true" } else { "false" };
        let params = [
            ("query", query),
            ("page", page.as_str()),
            ("include_adult", include_adult),
            ("language", self.language.as_str()),
        ];
        self.get("/search/movie", &params, None).await
    }

    async fn movie_details(&self, id: u64) -> Result<RemoteMovieDetail> {
        let id = id.to_string();
        self.get(
            &format!("/movie/{id}"),
            &[("append_to_response", "videos,credits")],
            Some(("movie", id.as_str())),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> TmdbConfig {
        TmdbConfig {
            api_base_url: format!("{}/3/", server.uri()),
            access_token: Some("test-token".into()),
            requests_per_second: 0,
            ..TmdbConfig::default()
        }
    }

    #[test]
    fn new_requires_token() {
        let config = TmdbConfig::default();
        assert_matches!(TmdbClient::new(&config), Err(Error::Config(_)));
    }

    #[tokio::test]
    async fn configuration_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/configuration"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "images": {
                    "secure_base_url": "https://img/",
                    "poster_sizes": ["w500"],
                    "backdrop_sizes": ["w1280"]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TmdbClient::new(&config_for(&server)).unwrap();
        let config = client.configuration().await.unwrap();
        assert_eq!(config.images.secure_base_url, "https://img/");
    }

    #[tokio::test]
    async fn search_sends_expected_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/search/movie"))
            .and(query_param("query", "the dark knight"))
            .and(query_param("page", "2"))
            .and(query_param("include_adult", "false"))
            .and(query_param("language", "en-US"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "page": 2,
                "total_pages": 3,
                "total_results": 45,
                "results": [{"id": 155, "title": "The Dark Knight", "poster_path": null}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TmdbClient::new(&config_for(&server)).unwrap();
        let page = client.search_movies("the dark knight", 2).await.unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.results[0].id, 155);
    }

    #[tokio::test]
    async fn detail_404_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/movie/999999"))
            .and(query_param("append_to_response", "videos,credits"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = TmdbClient::new(&config_for(&server)).unwrap();
        let err = client.movie_details(999_999).await.unwrap_err();
        assert_matches!(err, Error::NotFound { ref entity, ref id } if entity == "movie" && id == "999999");
    }

    #[tokio::test]
    async fn search_404_is_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/search/movie"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = TmdbClient::new(&config_for(&server)).unwrap();
        let err = client.search_movies("batman", 1).await.unwrap_err();
        assert_matches!(err, Error::Upstream { status: Some(404), .. });
    }

    #[tokio::test]
    async fn rate_limit_carries_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/search/movie"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .expect(1)
            .mount(&server)
            .await;

        let client = TmdbClient::new(&config_for(&server)).unwrap();
        let err = client.search_movies("batman", 1).await.unwrap_err();
        assert_matches!(err, Error::RateLimited { retry_after: Some(7) });
    }

    #[tokio::test]
    async fn server_error_is_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/configuration"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = TmdbClient::new(&config_for(&server)).unwrap();
        let err = client.configuration().await.unwrap_err();
        assert_matches!(err, Error::Upstream { status: Some(503), .. });
    }

    #[tokio::test]
    async fn malformed_body_is_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/movie/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = TmdbClient::new(&config_for(&server)).unwrap();
        let err = client.movie_details(1).await.unwrap_err();
        assert_matches!(err, Error::Upstream { status: Some(200), .. });
    }

    #[tokio::test]
    async fn transport_error_is_upstream_failure() {
        let config = TmdbConfig {
            api_base_url: "http://127.0.0.1:1".into(),
            access_token: Some("t".into()),
            requests_per_second: 0,
            ..TmdbConfig::default()
        };
        let client = TmdbClient::new(&config).unwrap();
        let err = client.configuration().await.unwrap_err();
        assert_matches!(err, Error::Upstream { status: None, .. });
    }
}

//! Shared test harness for integration tests.
//!
//! [`TestHarness`] starts a `wiremock` server standing in for the upstream
//! movie API and an Axum server on a random port wired to it.

#![allow(dead_code)]

use std::net::SocketAddr;

use mx_core::config::Config;
use mx_server::context::AppContext;
use mx_server::router::build_router;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";

pub struct TestHarness {
    pub upstream: MockServer,
    pub addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestHarness {
    /// Start the upstream mock and the server with default configuration.
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    /// Start with a configuration tweaked by `customize`. The upstream base
    /// URL and token are filled in afterwards.
    pub async fn start_with(customize: impl FnOnce(&mut Config)) -> Self {
        let upstream = MockServer::start().await;

        let mut config = Config::default();
        customize(&mut config);
        config.tmdb.api_base_url = upstream.uri();
        config.tmdb.access_token = Some(TOKEN.into());
        config.tmdb.requests_per_second = 0;

        let service = mx_server::build_service(&config).expect("failed to build service");
        let static_dir = config.server.static_dir.clone();
        let app = build_router(AppContext::new(config, service), static_dir);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            upstream,
            addr,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("request failed")
    }

    /// Serve the image configuration, expecting it to be fetched `times`.
    pub async fn mock_configuration(&self, times: u64) {
        Mock::given(method("GET"))
            .and(path("/configuration"))
            .respond_with(ResponseTemplate::new(200).set_body_json(configuration_body()))
            .expect(times)
            .mount(&self.upstream)
            .await;
    }
}

pub fn configuration_body() -> Value {
    json!({
        "images": {
            "base_url": "http://image.tmdb.org/t/p/",
            "secure_base_url": "https://image.tmdb.org/t/p/",
            "poster_sizes": ["w92", "w154", "w500", "original"],
            "backdrop_sizes": ["w300", "w1280", "original"],
            "profile_sizes": ["w45", "w185", "original"]
        },
        "change_keys": ["adult"]
    })
}

pub fn search_body() -> Value {
    json!({
        "page": 1,
        "total_pages": 3,
        "total_results": 42,
        "results": [
            {
                "id": 268,
                "title": "Batman",
                "release_date": "1989-06-23",
                "overview": "Batman must face his most ruthless nemesis.",
                "poster_path": "/batman.jpg",
                "backdrop_path": "/batman-bd.jpg",
                "vote_average": 7.2,
                "adult": false
            },
            {
                "id": 414906,
                "title": "The Batman",
                "release_date": "2022-03-01",
                "overview": "In his second year of fighting crime...",
                "poster_path": null,
                "backdrop_path": null,
                "vote_average": 7.7,
                "adult": false
            }
        ]
    })
}

pub fn detail_body() -> Value {
    let cast: Vec<Value> = (1..=7)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("Actor {i}"),
                "character": format!("Role {i}"),
                "profile_path": format!("/p{i}.jpg"),
                "order": i - 1
            })
        })
        .collect();

    json!({
        "id": 550,
        "title": "Fight Club",
        "release_date": "1999-10-15",
        "overview": "A ticking-time-bomb insomniac...",
        "poster_path": "/fc.jpg",
        "backdrop_path": "/fc-bd.jpg",
        "vote_average": 8.4,
        "runtime": 139,
        "genres": [{"id": 18, "name": "Drama"}],
        "videos": {
            "results": [
                {"key": "teaser1", "site": "YouTube", "type": "Teaser"},
                {"key": "t1", "site": "YouTube", "type": "Trailer"},
                {"key": "v1", "site": "Vimeo", "type": "Trailer"},
                {"key": "t2", "site": "YouTube", "type": "Trailer"},
                {"key": "t3", "site": "YouTube", "type": "Trailer"},
                {"key": "t4", "site": "YouTube", "type": "Trailer"}
            ]
        },
        "credits": {"cast": cast}
    })
}

//! Axum router construction.
//!
//! Builds the application router with the API routes, middleware layers,
//! the OpenAPI document, and optional static file serving for the UI.

use std::path::PathBuf;

use axum::middleware;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::context::AppContext;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health,
        routes::config::get_config,
        routes::movies::search_movies,
        routes::movies::get_movie,
    ),
    components(schemas(
        mx_core::DisplayConfiguration,
        mx_core::DisplayImages,
        mx_core::SearchPage,
        mx_core::SearchResultView,
        mx_core::MovieDetailView,
        mx_core::CastMemberView,
        mx_core::TrailerView,
    ))
)]
pub struct ApiDoc;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/config", get(routes::config::get_config))
        .route("/movies/search", get(routes::movies::search_movies))
        .route("/movies/:id", get(routes::movies::get_movie));

    let mut app = Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .nest("/api", api_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx);

    // SPA fallback: unknown paths get index.html.
    if let Some(dir) = static_dir {
        if dir.exists() {
            tracing::info!("Serving static files from {}", dir.display());
            let index_path = dir.join("index.html");
            app = app.fallback_service(
                ServeDir::new(&dir)
                    .append_index_html_on_directories(true)
                    .not_found_service(ServeFile::new(index_path)),
            );
        } else {
            tracing::warn!("Static directory {} does not exist", dir.display());
        }
    }

    app
}

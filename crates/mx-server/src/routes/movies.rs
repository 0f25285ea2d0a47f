//! Movie search and detail routes.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use mx_core::validate::parse_movie_id;
use mx_core::{MovieDetailView, SearchPage, SearchQuery};

use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::with_max_age;

/// Raw query string; validation happens in [`SearchQuery::parse`] so that
/// malformed values never fail extraction.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SearchParams {
    /// Search text, at least 2 characters after trimming.
    pub q: Option<String>,
    /// 1-based page; invalid values mean page 1.
    pub page: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/movies/search",
    params(SearchParams),
    responses(
        (status = 200, description = "One page of results", body = SearchPage),
        (status = 400, description = "Missing or too short query"),
        (status = 429, description = "Upstream rate limit"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn search_movies(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchParams>,
) -> Result<Response, AppError> {
    let query = SearchQuery::parse(params.q.as_deref(), params.page.as_deref())?;
    let page = ctx.service.search(&query).await?;
    Ok(with_max_age(ctx.config.cache.search_max_age_secs, Json(page)))
}

#[utoipa::path(
    get,
    path = "/api/movies/{id}",
    params(("id" = u64, Path, description = "Upstream movie ID")),
    responses(
        (status = 200, description = "Movie details", body = MovieDetailView),
        (status = 400, description = "Invalid movie ID"),
        (status = 404, description = "Movie not found"),
        (status = 429, description = "Upstream rate limit"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_movie(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_movie_id(&id)?;
    let movie = ctx.service.movie_detail(id).await?;
    Ok(with_max_age(ctx.config.cache.detail_max_age_secs, Json(movie)))
}

//! Display configuration route.

use axum::extract::State;
use axum::response::Response;
use axum::Json;

use mx_core::DisplayConfiguration;

use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::with_max_age;

/// GET /api/config: image base URL and size lists for the UI.
#[utoipa::path(
    get,
    path = "/api/config",
    responses(
        (status = 200, description = "Image configuration", body = DisplayConfiguration),
        (status = 500, description = "Failed to fetch configuration")
    )
)]
pub async fn get_config(State(ctx): State<AppContext>) -> Result<Response, AppError> {
    let display = ctx
        .service
        .display_configuration()
        .await
        .map_err(|e| AppError::new(e).with_message("Failed to fetch configuration"))?;

    Ok(with_max_age(
        ctx.config.cache.configuration_ttl_secs,
        Json(display),
    ))
}

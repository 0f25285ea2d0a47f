//! mx-server: HTTP API for the movie explorer.
//!
//! Ties the upstream client and the configuration cache from `mx-tmdb` into
//! an Axum application:
//!
//! - [`service::MovieService`] with the search, detail, and configuration
//!   operations
//! - JSON routes with per-route `Cache-Control`, CORS, request IDs, and an
//!   OpenAPI document
//! - Optional static UI directory with SPA fallback
//! - Graceful shutdown via signal handling

pub mod context;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use mx_core::config::Config;
use mx_tmdb::{ConfigCache, TmdbClient};
use tokio::signal;

use crate::context::AppContext;
use crate::service::MovieService;

/// Build the service stack for `config`: upstream client, configuration
/// cache, and the operations on top of them.
pub fn build_service(config: &Config) -> mx_core::Result<MovieService> {
    let client = TmdbClient::new(&config.tmdb)?;
    let cache = Arc::new(ConfigCache::new(config.cache.configuration_ttl()));
    Ok(MovieService::new(
        Arc::new(client),
        cache,
        config.images.clone(),
    ))
}

/// Start the movie explorer server.
///
/// Validates the configuration, builds the [`AppContext`], optionally warms
/// the image configuration cache, and serves until a shutdown signal.
pub async fn start(config: Config) -> mx_core::Result<()> {
    config.validate()?;

    let service = build_service(&config)?;
    if config.server.prefetch_configuration {
        service.prefetch_configuration().await;
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| mx_core::Error::Config(format!("Invalid server address: {e}")))?;

    let static_dir = config.server.static_dir.clone();
    let ctx = AppContext::new(config, service);
    let app = router::build_router(ctx, static_dir);

    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| mx_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| mx_core::Error::Internal(format!("Server error: {e}")))?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

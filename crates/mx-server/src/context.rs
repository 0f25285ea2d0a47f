//! Shared application context.
//!
//! [`AppContext`] is handed to every route handler via Axum state. It is
//! cheap to clone: everything inside sits behind an `Arc`.

use std::sync::Arc;

use mx_core::config::Config;

use crate::service::MovieService;

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub service: Arc<MovieService>,
}

impl AppContext {
    pub fn new(config: Config, service: MovieService) -> Self {
        Self {
            config: Arc::new(config),
            service: Arc::new(service),
        }
    }
}

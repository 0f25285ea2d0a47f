//! mx-tmdb: everything that talks to, or reshapes data from, the TMDB API.
//!
//! - [`models`] -- upstream response shapes.
//! - [`client`] -- the [`MovieApi`] trait and its reqwest implementation.
//! - [`config_cache`] -- time-boxed cache of the image configuration.
//! - [`transform`] -- upstream shapes to UI views.

pub mod client;
pub mod config_cache;
pub mod models;
pub mod transform;

pub use client::{MovieApi, TmdbClient};
pub use config_cache::{Clock, ConfigCache, SystemClock};
pub use models::{RemoteConfiguration, RemoteMovieDetail, RemoteMovieSummary, RemoteSearchPage};
pub use transform::ImageResolver;

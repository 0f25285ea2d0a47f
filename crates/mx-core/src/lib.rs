//! mx-core: shared types for the movie explorer.
//!
//! Holds the error taxonomy every crate funnels into, the configuration
//! model, the UI-facing view types, and the input validators that run at the
//! HTTP boundary before any upstream call is made.

pub mod config;
pub mod error;
pub mod movie;
pub mod validate;

pub use error::{Error, QueryError, Result};
pub use movie::{
    CastMemberView, DisplayConfiguration, DisplayImages, MovieDetailView, SearchPage,
    SearchResultView, TrailerView,
};
pub use validate::SearchQuery;

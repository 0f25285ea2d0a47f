//! The three operations the UI consumes.
//!
//! Each operation makes sure the image configuration is cached before it
//! touches the upstream resource, so the transformer can always resolve
//! image URLs. Inputs are expected to be validated by the caller.

use std::sync::Arc;

use mx_core::config::ImagePresets;
use mx_core::{DisplayConfiguration, MovieDetailView, Result, SearchPage, SearchQuery};
use mx_tmdb::models::RemoteConfiguration;
use mx_tmdb::transform::{self, ImageResolver};
use mx_tmdb::{ConfigCache, MovieApi};

pub struct MovieService {
    api: Arc<dyn MovieApi>,
    cache: Arc<ConfigCache>,
    presets: ImagePresets,
}

impl MovieService {
    pub fn new(api: Arc<dyn MovieApi>, cache: Arc<ConfigCache>, presets: ImagePresets) -> Self {
        Self {
            api,
            cache,
            presets,
        }
    }

    pub fn cache(&self) -> &ConfigCache {
        &self.cache
    }

    async fn ensure_configuration(&self) -> Result<Arc<RemoteConfiguration>> {
        let api = Arc::clone(&self.api);
        self.cache
            .get_or_refresh(|| async move { api.configuration().await })
            .await
    }

    fn images(&self) -> ImageResolver {
        ImageResolver::from_cache(&self.cache, self.presets.clone())
    }

    /// Image configuration trimmed to what the UI needs.
    pub async fn display_configuration(&self) -> Result<DisplayConfiguration> {
        let configuration = self.ensure_configuration().await?;
        Ok(transform::to_display_configuration(&configuration))
    }

    /// One page of search results. Pages past the upstream's `total_pages`
    /// are passed through for the upstream to answer.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchPage> {
        self.ensure_configuration().await?;
        let page = self.api.search_movies(&query.text, query.page).await?;
        tracing::debug!(
            query = %query.text,
            page = query.page,
            results = page.results.len(),
            total_results = page.total_results,
            "Search completed"
        );
        Ok(transform::to_search_page(&page, &self.images()))
    }

    /// Detail view of one movie.
    pub async fn movie_detail(&self, id: u64) -> Result<MovieDetailView> {
        self.ensure_configuration().await?;
        let movie = self.api.movie_details(id).await?;
        Ok(transform::to_movie_detail_view(&movie, &self.images()))
    }

    /// Best-effort cache warm-up; failures are logged and swallowed.
    pub async fn prefetch_configuration(&self) {
        match self.ensure_configuration().await {
            Ok(_) => tracing::info!("Image configuration prefetched"),
            Err(e) => tracing::warn!("Image configuration prefetch failed: {e}"),
        }
    }
}

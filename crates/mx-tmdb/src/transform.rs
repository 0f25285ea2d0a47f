//! Upstream shapes to UI views.
//!
//! All functions are pure given an [`ImageResolver`], which snapshots the
//! configuration cache and the configured size presets.

use std::sync::Arc;

use mx_core::config::ImagePresets;
use mx_core::{
    CastMemberView, DisplayConfiguration, DisplayImages, MovieDetailView, SearchPage,
    SearchResultView, TrailerView,
};

use crate::config_cache::ConfigCache;
use crate::models::{
    RemoteCastMember, RemoteConfiguration, RemoteMovieDetail, RemoteMovieSummary,
    RemoteSearchPage, RemoteVideo,
};

/// Maximum cast members on a detail view.
pub const MAX_CAST: usize = 5;
/// Maximum trailers on a detail view.
pub const MAX_TRAILERS: usize = 3;

const TRAILER_SITE: &str = "YouTube";
const TRAILER_TYPE: &str = "Trailer";

/// Builds absolute image URLs from upstream path fragments.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    configuration: Option<Arc<RemoteConfiguration>>,
    presets: ImagePresets,
}

impl ImageResolver {
    pub fn new(configuration: Option<Arc<RemoteConfiguration>>, presets: ImagePresets) -> Self {
        Self {
            configuration,
            presets,
        }
    }

    /// Snapshot the current cache entry, whatever its age.
    pub fn from_cache(cache: &ConfigCache, presets: ImagePresets) -> Self {
        Self::new(cache.current(), presets)
    }

    /// `secure_base_url + size + path`, or `None` when there is no path or no
    /// configuration yet.
    pub fn resolve(&self, path: Option<&str>, size: &str) -> Option<String> {
        let path = path?;
        let configuration = self.configuration.as_ref()?;
        Some(format!(
            "{}{size}{path}",
            configuration.images.secure_base_url
        ))
    }

    pub fn poster(&self, path: Option<&str>) -> Option<String> {
        self.resolve(path, &self.presets.poster_size)
    }

    pub fn backdrop(&self, path: Option<&str>) -> Option<String> {
        self.resolve(path, &self.presets.backdrop_size)
    }

    pub fn profile(&self, path: Option<&str>) -> Option<String> {
        self.resolve(path, &self.presets.profile_size)
    }
}

pub fn to_search_result_view(movie: &RemoteMovieSummary, images: &ImageResolver) -> SearchResultView {
    SearchResultView {
        id: movie.id,
        title: movie.title.clone(),
        release_date: movie.release_date.clone(),
        overview: movie.overview.clone(),
        poster_url: images.poster(movie.poster_path.as_deref()),
        vote_average: movie.vote_average,
    }
}

pub fn to_search_page(page: &RemoteSearchPage, images: &ImageResolver) -> SearchPage {
    SearchPage {
        page: page.page,
        total_pages: page.total_pages,
        total_results: page.total_results,
        results: page
            .results
            .iter()
            .map(|m| to_search_result_view(m, images))
            .collect(),
    }
}

pub fn to_movie_detail_view(movie: &RemoteMovieDetail, images: &ImageResolver) -> MovieDetailView {
    MovieDetailView {
        id: movie.id,
        title: movie.title.clone(),
        release_date: movie.release_date.clone(),
        overview: movie.overview.clone(),
        poster_url: images.poster(movie.poster_path.as_deref()),
        backdrop_url: images.backdrop(movie.backdrop_path.as_deref()),
        vote_average: movie.vote_average,
        runtime: movie.runtime,
        genres: movie.genres.iter().map(|g| g.name.clone()).collect(),
        cast: movie
            .credits
            .cast
            .iter()
            .take(MAX_CAST)
            .map(|c| to_cast_member_view(c, images))
            .collect(),
        trailers: movie
            .videos
            .results
            .iter()
            .filter(|v| is_youtube_trailer(v))
            .take(MAX_TRAILERS)
            .map(to_trailer_view)
            .collect(),
    }
}

fn to_cast_member_view(member: &RemoteCastMember, images: &ImageResolver) -> CastMemberView {
    CastMemberView {
        id: member.id,
        name: member.name.clone(),
        character: member.character.clone(),
        profile_url: images.profile(member.profile_path.as_deref()),
    }
}

fn is_youtube_trailer(video: &RemoteVideo) -> bool {
    video.site == TRAILER_SITE && video.kind == TRAILER_TYPE
}

fn to_trailer_view(video: &RemoteVideo) -> TrailerView {
    TrailerView {
        key: video.key.clone(),
        site: video.site.clone(),
        kind: video.kind.clone(),
    }
}

pub fn to_display_configuration(configuration: &RemoteConfiguration) -> DisplayConfiguration {
    DisplayConfiguration {
        images: DisplayImages {
            secure_base_url: configuration.images.secure_base_url.clone(),
            poster_sizes: configuration.images.poster_sizes.clone(),
            backdrop_sizes: configuration.images.backdrop_sizes.clone(),
        },
    }
}

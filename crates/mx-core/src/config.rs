//! Application configuration.
//!
//! The top-level [`Config`] is deserialized from TOML. Every section defaults
//! sensibly so an empty file is valid apart from the TMDB access token, which
//! may also come from the `TMDB_READ_ACCESS_TOKEN` environment variable.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable that overrides `tmdb.access_token`.
pub const ACCESS_TOKEN_ENV: &str = "TMDB_READ_ACCESS_TOKEN";

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub tmdb: TmdbConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub images: ImagePresets,
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the built UI; served with an `index.html` fallback.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    /// Fetch the image configuration once at startup (best-effort).
    #[serde(default = "default_true")]
    pub prefetch_configuration: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
            prefetch_configuration: true,
        }
    }
}

/// Upstream TMDB API settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// v4 read access token, sent as `Authorization: Bearer`.
    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub include_adult: bool,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Outbound request pacing. 0 disables it.
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

fn default_api_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_requests_per_second() -> u32 {
    40
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            access_token: None,
            language: default_language(),
            include_adult: false,
            request_timeout_secs: default_request_timeout(),
            requests_per_second: default_requests_per_second(),
        }
    }
}

impl TmdbConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Cache lifetimes, in seconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// How long the upstream image configuration stays fresh.
    #[serde(default = "default_configuration_ttl")]
    pub configuration_ttl_secs: u64,

    /// `Cache-Control: max-age` advertised on search responses.
    #[serde(default = "default_response_max_age")]
    pub search_max_age_secs: u64,

    /// `Cache-Control: max-age` advertised on detail responses.
    #[serde(default = "default_response_max_age")]
    pub detail_max_age_secs: u64,
}

fn default_configuration_ttl() -> u64 {
    24 * 60 * 60
}

fn default_response_max_age() -> u64 {
    60
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            configuration_ttl_secs: default_configuration_ttl(),
            search_max_age_secs: default_response_max_age(),
            detail_max_age_secs: default_response_max_age(),
        }
    }
}

impl CacheConfig {
    pub fn configuration_ttl(&self) -> Duration {
        Duration::from_secs(self.configuration_ttl_secs)
    }
}

/// Size tokens used when building image URLs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImagePresets {
    #[serde(default = "default_poster_size")]
    pub poster_size: String,

    #[serde(default = "default_backdrop_size")]
    pub backdrop_size: String,

    #[serde(default = "default_profile_size")]
    pub profile_size: String,
}

fn default_poster_size() -> String {
    "w500".to_string()
}

fn default_backdrop_size() -> String {
    "w1280".to_string()
}

fn default_profile_size() -> String {
    "w185".to_string()
}

impl Default for ImagePresets {
    fn default() -> Self {
        Self {
            poster_size: default_poster_size(),
            backdrop_size: default_backdrop_size(),
            profile_size: default_profile_size(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Parse a `Config` from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("parse error: {e}")))
    }

    /// Fill in values supplied through the environment.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
            if !token.trim().is_empty() {
                self.tmdb.access_token = Some(token);
            }
        }
    }

    /// The configured access token, if it is present and non-blank.
    pub fn access_token(&self) -> Option<&str> {
        self.tmdb
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }

    /// Reject configurations the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("server.port cannot be 0".into()));
        }

        if self.access_token().is_none() {
            return Err(Error::Config(format!(
                "tmdb.access_token is required (or set {ACCESS_TOKEN_ENV})"
            )));
        }

        if self.tmdb.api_base_url.trim().is_empty() {
            return Err(Error::Config("tmdb.api_base_url cannot be empty".into()));
        }

        if self.cache.configuration_ttl_secs == 0 {
            return Err(Error::Config(
                "cache.configuration_ttl_secs must be positive".into(),
            ));
        }

        let presets = [
            ("images.poster_size", &self.images.poster_size),
            ("images.backdrop_size", &self.images.backdrop_size),
            ("images.profile_size", &self.images.profile_size),
        ];
        for (name, value) in presets {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{name} cannot be empty")));
            }
        }

        if let Some(ref dir) = self.server.static_dir {
            if !dir.exists() {
                tracing::warn!("Static directory does not exist: {:?}", dir);
            }
        }

        Ok(())
    }
}

/// Load configuration from a TOML file, apply environment overrides, and
/// validate it.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    let mut config: Config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;
    config.apply_env_overrides();
    config.validate()?;

    Ok(config)
}

/// Load config from `custom_path`, else the first default location that
/// exists, else built-in defaults plus environment overrides.
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./config.toml",
        "./movie-explorer.toml",
        "~/.config/movie-explorer/config.toml",
        "/etc/movie-explorer/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {}", path.display());
            return load_config(path);
        }
    }

    let mut config = Config::default();
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    fn with_token(mut config: Config) -> Config {
        config.tmdb.access_token = Some("token".into());
        config
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.tmdb.api_base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb.language, "en-US");
        assert!(!config.tmdb.include_adult);
        assert_eq!(config.cache.configuration_ttl(), Duration::from_secs(86_400));
        assert_eq!(config.cache.search_max_age_secs, 60);
        assert_eq!(config.images, ImagePresets::default());
        assert!(config.server.prefetch_configuration);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml(
            r#"
            [tmdb]
            access_token = "abc"
            request_timeout_secs = 5

            [images]
            poster_size = "w342"
            "#,
        )
        .unwrap();
        assert_eq!(config.access_token(), Some("abc"));
        assert_eq!(config.tmdb.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.images.poster_size, "w342");
        assert_eq!(config.images.backdrop_size, "w1280");
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        assert_matches!(Config::from_toml("[server\nport = 1"), Err(Error::Config(_)));
    }

    #[test]
    fn validate_requires_token() {
        assert_matches!(Config::default().validate(), Err(Error::Config(_)));
        assert!(with_token(Config::default()).validate().is_ok());

        let mut blank = Config::default();
        blank.tmdb.access_token = Some("   ".into());
        assert_matches!(blank.validate(), Err(Error::Config(_)));
    }

    #[test]
    fn validate_rejects_zero_port_and_ttl() {
        let mut config = with_token(Config::default());
        config.server.port = 0;
        assert_matches!(config.validate(), Err(Error::Config(_)));

        let mut config = with_token(Config::default());
        config.cache.configuration_ttl_secs = 0;
        assert_matches!(config.validate(), Err(Error::Config(_)));
    }

    #[test]
    fn validate_rejects_empty_preset() {
        let mut config = with_token(Config::default());
        config.images.profile_size = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("images.profile_size"));
    }

    #[test]
    fn load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[tmdb]\naccess_token = \"from-file\""
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.server.port, 9090);
        assert!(config.access_token().is_some());
    }

    #[test]
    fn load_config_parse_error_names_file_once() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();

        let message = load_config(file.path()).unwrap_err().to_string();
        assert!(message.contains(&file.path().display().to_string()));
        assert_eq!(message.matches("Configuration error").count(), 1);
    }

    #[test]
    fn load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/movie-explorer.toml")).unwrap_err();
        assert_matches!(err, Error::Config(_));
    }
}

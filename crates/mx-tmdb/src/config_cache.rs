//! Time-boxed cache of the upstream image configuration.
//!
//! The cache holds at most one [`RemoteConfiguration`] together with the
//! instant it was fetched. A value older than the TTL is refreshed on the
//! next [`ConfigCache::get_or_refresh`]; the new value replaces the old one
//! wholesale. A failed refresh leaves the previous entry untouched and is
//! returned to the caller as-is.
//!
//! Refreshes are single-flight: concurrent callers that find the entry stale
//! queue on an async mutex, and every caller after the first re-checks the
//! entry before fetching, so one stale window costs one upstream call.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use mx_core::Result;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::models::RemoteConfiguration;

/// Source of the current time, injectable for tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// [`Clock`] backed by [`Instant::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry {
    value: Arc<RemoteConfiguration>,
    fetched_at: Instant,
}

pub struct ConfigCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entry: RwLock<Option<CacheEntry>>,
    refresh: tokio::sync::Mutex<()>,
}

impl ConfigCache {
    /// Create an empty cache using the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create an empty cache with a custom clock.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entry: RwLock::new(None),
            refresh: tokio::sync::Mutex::new(()),
        }
    }

    /// The stored value regardless of age, or `None` before the first
    /// successful fetch.
    pub fn current(&self) -> Option<Arc<RemoteConfiguration>> {
        self.entry.read().as_ref().map(|e| Arc::clone(&e.value))
    }

    /// The stored value if it is still within the TTL.
    pub fn fresh(&self) -> Option<Arc<RemoteConfiguration>> {
        let now = self.clock.now();
        self.entry
            .read()
            .as_ref()
            .filter(|e| now.saturating_duration_since(e.fetched_at) < self.ttl)
            .map(|e| Arc::clone(&e.value))
    }

    /// Return the cached configuration, fetching it with `fetch` when the
    /// cache is empty or stale.
    pub async fn get_or_refresh<F, Fut>(&self, fetch: F) -> Result<Arc<RemoteConfiguration>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<RemoteConfiguration>>,
    {
        if let Some(value) = self.fresh() {
            debug!("Image configuration cache hit");
            return Ok(value);
        }

        let _guard = self.refresh.lock().await;

        // Another caller may have refreshed while we waited.
        if let Some(value) = self.fresh() {
            debug!("Image configuration refreshed by a concurrent request");
            return Ok(value);
        }

        let value = Arc::new(fetch().await?);
        let fetched_at = self.clock.now();
        *self.entry.write() = Some(CacheEntry {
            value: Arc::clone(&value),
            fetched_at,
        });
        info!(
            secure_base_url = %value.images.secure_base_url,
            ttl_secs = self.ttl.as_secs(),
            "Image configuration cached"
        );

        Ok(value)
    }
}

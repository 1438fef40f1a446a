//! Lookaside cache for fetched pages.

use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;
use dashmap::DashMap;
use serde::Deserialize;
use serde::Serialize;

use super::FetchedPage;
use super::PageRequest;

/// Cache TTL settings.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use datagrid_lib::remote::CacheConfig;
///
/// let config = CacheConfig::default().with_page_ttl(Duration::from_secs(60));
/// assert!(config.is_enabled());
/// assert!(!CacheConfig::no_cache().is_enabled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL for fetched pages, in seconds.
    ///
    /// Default: 5 minutes
    pub page_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { page_ttl_secs: 300 }
    }
}

impl CacheConfig {
    /// Creates a new cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page TTL.
    pub fn with_page_ttl(mut self, ttl: Duration) -> Self {
        self.page_ttl_secs = ttl.as_secs();
        self
    }

    /// Creates a config with no caching (zero TTL).
    pub fn no_cache() -> Self {
        Self { page_ttl_secs: 0 }
    }

    pub fn page_ttl(&self) -> Duration {
        Duration::from_secs(self.page_ttl_secs)
    }

    pub fn is_enabled(&self) -> bool {
        self.page_ttl_secs > 0
    }
}

/// A cached page with metadata about when it was cached and when it expires.
#[derive(Debug, Clone)]
pub struct CachedPage<R> {
    pub page: FetchedPage<R>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl<R> CachedPage<R> {
    /// Creates a new cached page with a TTL from now.
    pub fn with_ttl(page: FetchedPage<R>, ttl: Duration) -> Self {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero());
        Self {
            page,
            created_at: now,
            expires_at,
        }
    }

    /// Returns `true` if this cached page has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Pages already fetched, keyed by page index and page size.
///
/// The cache belongs to the caller, not the engine: it only short-circuits
/// repeat fetches. Invalidate it whenever the remote query changes (a new
/// server-side sort or filter).
#[derive(Debug)]
pub struct PageCache<R> {
    config: CacheConfig,
    store: DashMap<PageRequest, CachedPage<R>>,
}

impl<R: Clone> PageCache<R> {
    /// Creates a new empty page cache.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            store: DashMap::new(),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Retrieves a page. Never returns an expired page.
    pub fn get(&self, request: &PageRequest) -> Option<FetchedPage<R>> {
        let entry = self.store.get(request)?;

        if entry.is_expired() {
            drop(entry);
            self.store.remove(request);
            None
        } else {
            Some(entry.page.clone())
        }
    }

    /// Stores a page. A disabled cache stores nothing.
    pub fn insert(&self, request: PageRequest, page: FetchedPage<R>) {
        if !self.config.is_enabled() {
            return;
        }
        self.store
            .insert(request, CachedPage::with_ttl(page, self.config.page_ttl()));
    }

    /// Removes one page.
    pub fn invalidate(&self, request: &PageRequest) {
        self.store.remove(request);
    }

    /// Removes all pages.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Removes all expired pages and returns how many were dropped.
    pub fn gc(&self) -> usize {
        let mut removed = 0;
        self.store.retain(|_, cached| {
            if cached.is_expired() {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    /// Returns the number of entries in the cache (including expired ones).
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

//! Page loader with stale-result protection.

use std::marker::PhantomData;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use log::debug;
use log::warn;

use super::CacheConfig;
use super::FetchedPage;
use super::PageCache;
use super::PageRequest;
use super::PageSource;
use crate::error::FetchError;

/// Generation token taken when a load starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Result of [`PageLoader::load`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<R> {
    /// Served from the page cache without fetching.
    Cached(FetchedPage<R>),
    /// Freshly fetched from the source.
    Fetched(FetchedPage<R>),
    /// A newer load started while this one was in flight. The page was
    /// cached but must not replace what the table currently shows.
    Stale { request: PageRequest },
}

impl<R> LoadOutcome<R> {
    /// The page to apply, or `None` for a stale result.
    pub fn into_page(self) -> Option<FetchedPage<R>> {
        match self {
            Self::Cached(page) | Self::Fetched(page) => Some(page),
            Self::Stale { .. } => None,
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale { .. })
    }
}

/// Counts one fetch as in flight until dropped, including when the load
/// future is dropped mid-fetch.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Caller-side helper that fetches pages for a server-paged table.
///
/// Each [`load`](Self::load) takes a new ticket. When a fetch resolves after
/// a newer load has started, its result is reported as
/// [`LoadOutcome::Stale`] so a slow, earlier request can never overwrite the
/// page the user navigated to since.
///
/// # Example
///
/// ```ignore
/// let loader = PageLoader::new(source, CacheConfig::default());
///
/// let request = PageRequest::new(state.page_index(), state.page_size());
/// if let Some(page) = loader.load(request).await?.into_page() {
///     table.dataset_changed(page.total_count());
///     resident = page.into_records();
/// }
/// ```
#[derive(Debug)]
pub struct PageLoader<R, S> {
    source: S,
    cache: PageCache<R>,
    generation: AtomicU64,
    in_flight: AtomicUsize,
    _marker: PhantomData<fn() -> R>,
}

impl<R, S> PageLoader<R, S>
where
    R: Clone + Send + Sync,
    S: PageSource<R>,
{
    pub fn new(source: S, config: CacheConfig) -> Self {
        Self {
            source,
            cache: PageCache::new(config),
            generation: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
            _marker: PhantomData,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &PageCache<R> {
        &self.cache
    }

    /// Start a new generation. Results of older tickets become stale.
    pub fn begin(&self) -> LoadTicket {
        LoadTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns `true` if no load started after `ticket`.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Returns `true` while any fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Load a page from the cache or the source.
    ///
    /// Fetch errors of a stale request are swallowed and reported as
    /// [`LoadOutcome::Stale`]; nobody is waiting for that page any more.
    pub async fn load(&self, request: PageRequest) -> Result<LoadOutcome<R>, FetchError> {
        let ticket = self.begin();

        if let Some(page) = self.cache.get(&request) {
            debug!("Page {} served from cache", request.page_index);
            return Ok(LoadOutcome::Cached(page));
        }

        let result = {
            let _guard = InFlight::enter(&self.in_flight);
            self.source.fetch_page(request).await
        };

        let current = self.is_current(ticket);
        match result {
            Ok(page) => {
                self.cache.insert(request, page.clone());
                if current {
                    debug!(
                        "Page {} fetched: {} records of {}",
                        request.page_index,
                        page.len(),
                        page.total_count()
                    );
                    Ok(LoadOutcome::Fetched(page))
                } else {
                    warn!("Discarding stale result for page {}", request.page_index);
                    Ok(LoadOutcome::Stale { request })
                }
            }
            Err(e) if !current => {
                debug!("Ignoring error of stale request: {}", e);
                Ok(LoadOutcome::Stale { request })
            }
            Err(e) => Err(e),
        }
    }

    /// Make every in-flight load stale without starting a new one.
    pub fn cancel(&self) {
        self.begin();
    }

    /// Drop cached pages and cancel in-flight loads, e.g. after the remote
    /// query changed.
    pub fn invalidate(&self) {
        self.cache.clear();
        self.cancel();
    }
}

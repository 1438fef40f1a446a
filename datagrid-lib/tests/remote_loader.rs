use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use datagrid_lib::error::FetchError;
use datagrid_lib::remote::{
    CacheConfig, FetchedPage, LoadOutcome, PageLoader, PageRequest, PageSource, VecSource,
};

/// Serves 0..total, page 0 slower than the rest. Page 9 always fails.
struct SlowSource {
    total: u32,
    calls: AtomicUsize,
}

impl SlowSource {
    fn new(total: u32) -> Self {
        Self {
            total,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PageSource<u32> for SlowSource {
    async fn fetch_page(&self, request: PageRequest) -> Result<FetchedPage<u32>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = if request.page_index == 0 { 60 } else { 5 };
        tokio::time::sleep(Duration::from_millis(delay)).await;

        if request.page_index == 9 {
            return Err(FetchError::failed(request.page_index, "boom"));
        }

        let start = request.offset() as u32;
        let end = (start + request.page_size as u32).min(self.total);
        Ok(FetchedPage::new((start..end).collect(), self.total as usize))
    }
}

#[tokio::test]
async fn test_fetch_then_cache() {
    let loader = PageLoader::new(SlowSource::new(12), CacheConfig::default());
    let request = PageRequest::new(2, 5);

    let first = loader.load(request).await.unwrap();
    assert!(matches!(first, LoadOutcome::Fetched(_)));
    let page = first.into_page().unwrap();
    assert_eq!(page.records(), &[10, 11]);
    assert_eq!(page.total_count(), 12);

    let second = loader.load(request).await.unwrap();
    assert!(matches!(second, LoadOutcome::Cached(_)));
    assert_eq!(loader.source().calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_disabled_cache_always_fetches() {
    let loader = PageLoader::new(SlowSource::new(12), CacheConfig::no_cache());
    let request = PageRequest::new(1, 5);

    loader.load(request).await.unwrap();
    loader.load(request).await.unwrap();
    assert_eq!(loader.source().calls.load(Ordering::SeqCst), 2);
    assert!(loader.cache().is_empty());
}

#[tokio::test]
async fn test_late_result_of_older_request_is_stale() {
    let loader = PageLoader::new(SlowSource::new(12), CacheConfig::default());

    // page 0 is requested first but resolves last
    let (slow, fast) = tokio::join!(
        loader.load(PageRequest::new(0, 5)),
        loader.load(PageRequest::new(1, 5)),
    );

    let slow = slow.unwrap();
    assert!(slow.is_stale());
    assert!(slow.into_page().is_none());

    let fast = fast.unwrap().into_page().unwrap();
    assert_eq!(fast.records(), &[5, 6, 7, 8, 9]);
    assert!(!loader.is_loading());

    // the stale page was still cached
    let again = loader.load(PageRequest::new(0, 5)).await.unwrap();
    assert!(matches!(again, LoadOutcome::Cached(_)));
}

#[tokio::test]
async fn test_fetch_error_surfaces_when_current() {
    let loader = PageLoader::new(SlowSource::new(100), CacheConfig::default());
    let err = loader.load(PageRequest::new(9, 5)).await.unwrap_err();
    assert_eq!(err.page_index(), 9);
    assert_eq!(err.message(), "boom");
}

#[tokio::test]
async fn test_cancel_makes_in_flight_load_stale() {
    let loader = PageLoader::new(SlowSource::new(12), CacheConfig::default());

    let (outcome, _) = tokio::join!(loader.load(PageRequest::new(0, 5)), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(loader.is_loading());
        loader.cancel();
    });
    assert!(outcome.unwrap().is_stale());
}

#[tokio::test]
async fn test_invalidate_drops_cached_pages() {
    let source = VecSource::new((0..7).collect::<Vec<u32>>());
    let loader = PageLoader::new(source, CacheConfig::default());
    loader.load(PageRequest::new(0, 5)).await.unwrap();
    assert_eq!(loader.cache().len(), 1);

    loader.invalidate();
    assert!(loader.cache().is_empty());

    let outcome = loader.load(PageRequest::new(1, 5)).await.unwrap();
    assert_eq!(outcome.into_page().unwrap().records(), &[5, 6]);
}

#[tokio::test]
async fn test_abandoned_load_is_not_loading() {
    let loader = PageLoader::new(SlowSource::new(12), CacheConfig::default());

    let timed_out = tokio::time::timeout(
        Duration::from_millis(20),
        loader.load(PageRequest::new(0, 5)),
    )
    .await;
    assert!(timed_out.is_err());
    assert!(!loader.is_loading());
    assert!(loader.cache().is_empty());
}

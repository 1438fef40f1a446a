//! Simulated remote data source.

use std::time::Duration;

use async_trait::async_trait;
use datagrid_lib::error::FetchError;
use datagrid_lib::remote::{FetchedPage, PageRequest, PageSource, VecSource};
use log::debug;

/// Serves an in-memory dataset after a fixed delay, standing in for a server.
pub struct DelayedSource<R> {
    inner: VecSource<R>,
    latency: Duration,
}

impl<R> DelayedSource<R> {
    pub fn new(records: Vec<R>, latency_ms: u64) -> Self {
        Self {
            inner: VecSource::new(records),
            latency: Duration::from_millis(latency_ms),
        }
    }
}

#[async_trait]
impl<R: Clone + Send + Sync> PageSource<R> for DelayedSource<R> {
    async fn fetch_page(&self, request: PageRequest) -> Result<FetchedPage<R>, FetchError> {
        debug!(
            "Fetching page {} ({}ms simulated latency)",
            request.page_index,
            self.latency.as_millis()
        );
        tokio::time::sleep(self.latency).await;
        self.inner.fetch_page(request).await
    }
}

//! Remote data source trait.

use async_trait::async_trait;

use super::FetchedPage;
use super::PageRequest;
use crate::error::FetchError;

/// An asynchronous source of pages.
///
/// Transport, retries and authentication are the implementor's business. The
/// engine only ever sees the resolved page.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use datagrid_lib::error::FetchError;
/// use datagrid_lib::remote::{FetchedPage, PageRequest, PageSource};
///
/// struct Numbers(Vec<u32>);
///
/// #[async_trait]
/// impl PageSource<u32> for Numbers {
///     async fn fetch_page(&self, request: PageRequest) -> Result<FetchedPage<u32>, FetchError> {
///         let page = self.0.iter().skip(request.offset()).take(request.page_size).copied().collect();
///         Ok(FetchedPage::new(page, self.0.len()))
///     }
/// }
/// ```
#[async_trait]
pub trait PageSource<R>: Send + Sync {
    /// Fetch one page.
    async fn fetch_page(&self, request: PageRequest) -> Result<FetchedPage<R>, FetchError>;
}

/// Serves pages out of an in-memory dataset.
///
/// Handy for tests and demos that want the remote code path without a
/// server.
#[derive(Debug, Clone)]
pub struct VecSource<R> {
    records: Vec<R>,
}

impl<R> VecSource<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl<R: Clone + Send + Sync> PageSource<R> for VecSource<R> {
    async fn fetch_page(&self, request: PageRequest) -> Result<FetchedPage<R>, FetchError> {
        let page = self
            .records
            .iter()
            .skip(request.offset())
            .take(request.page_size)
            .cloned()
            .collect();
        Ok(FetchedPage::new(page, self.records.len()))
    }
}

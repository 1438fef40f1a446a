//! Page request and fetched page types.

/// Which page a caller wants from a remote source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page_index: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size,
        }
    }

    /// Offset of the first requested row.
    pub fn offset(&self) -> usize {
        self.page_index * self.page_size
    }
}

/// A page of records returned by a [`PageSource`](super::PageSource).
///
/// `total_count` is the size of the whole remote dataset, which drives the
/// page count while only this page is resident.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage<R> {
    records: Vec<R>,
    total_count: usize,
}

impl<R> FetchedPage<R> {
    /// Creates a new page with records and the remote total.
    pub fn new(records: Vec<R>, total_count: usize) -> Self {
        Self {
            records,
            total_count,
        }
    }

    /// Returns a reference to the records in this page.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Consumes the page and returns the records.
    pub fn into_records(self) -> Vec<R> {
        self.records
    }

    /// Returns the total record count of the remote dataset.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

//! Remote page fetch errors

/// A [`PageSource`](crate::remote::PageSource) could not produce a page.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Failed to fetch page {page_index}: {message}")]
pub struct FetchError {
    page_index: usize,
    message: String,
}

impl FetchError {
    pub fn failed(page_index: usize, message: impl Into<String>) -> Self {
        Self {
            page_index,
            message: message.into(),
        }
    }

    /// Returns the page index the failed request asked for.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

//! Page state and its clamping transitions.

use std::num::NonZeroUsize;

use log::debug;
use serde::Deserialize;
use serde::Serialize;

/// How the page index is re-derived when the page size changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSizePolicy {
    /// Keep the current page index and clamp it into the new page range.
    #[default]
    PreserveIndex,
    /// Move to the page that contains the first row of the current page.
    PreserveFirstRow,
}

/// Current page index and page size.
///
/// Every transition is total: out-of-range requests are clamped into
/// `[0, page_count - 1]` (or 0 for an empty dataset) instead of failing.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
/// use datagrid_lib::page::{PageSizePolicy, PageState};
///
/// let mut state = PageState::new(NonZeroUsize::new(10).unwrap());
/// state.goto(3, 47);
/// assert_eq!(state.page_index(), 3);
///
/// state.set_page_size(NonZeroUsize::new(25).unwrap(), 47, PageSizePolicy::PreserveIndex);
/// assert_eq!(state.page_index(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page_index: usize,
    page_size: NonZeroUsize,
}

impl PageState {
    /// First page with the given size.
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_index: 0,
            page_size,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Number of pages for `total` records. Zero for an empty dataset.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.get())
    }

    /// Highest valid page index for `total` records.
    pub fn last_index(&self, total: usize) -> usize {
        self.page_count(total).saturating_sub(1)
    }

    /// Offset of the first row on the current page.
    pub fn first_row(&self) -> usize {
        self.page_index * self.page_size.get()
    }

    pub fn can_go_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_go_next(&self, total: usize) -> bool {
        (self.page_index + 1) * self.page_size.get() < total
    }

    /// This state with the page index clamped to `total` records.
    pub fn clamped(self, total: usize) -> Self {
        Self {
            page_index: self.page_index.min(self.last_index(total)),
            page_size: self.page_size,
        }
    }

    /// Jump to a page, clamped. Returns the page actually landed on.
    pub fn goto(&mut self, page_index: usize, total: usize) -> usize {
        let clamped = page_index.min(self.last_index(total));
        if clamped != page_index {
            debug!(
                "Page {} out of range for {} records, clamped to {}",
                page_index, total, clamped
            );
        }
        self.page_index = clamped;
        clamped
    }

    /// Advance one page. Returns `false` on the last page.
    pub fn next(&mut self, total: usize) -> bool {
        if !self.can_go_next(total) {
            self.dataset_changed(total);
            return false;
        }
        self.page_index += 1;
        true
    }

    /// Go back one page. Returns `false` on the first page.
    pub fn previous(&mut self) -> bool {
        if self.page_index == 0 {
            return false;
        }
        self.page_index -= 1;
        true
    }

    /// Change the page size and re-derive the page index.
    pub fn set_page_size(&mut self, page_size: NonZeroUsize, total: usize, policy: PageSizePolicy) {
        let target = match policy {
            PageSizePolicy::PreserveIndex => self.page_index,
            PageSizePolicy::PreserveFirstRow => self.first_row() / page_size.get(),
        };
        debug!(
            "Page size {} -> {} ({:?})",
            self.page_size, page_size, policy
        );
        self.page_size = page_size;
        self.goto(target, total);
    }

    /// Re-clamp after the dataset size changed.
    pub fn dataset_changed(&mut self, total: usize) {
        let clamped = self.clamped(total);
        if clamped.page_index != self.page_index {
            debug!(
                "Dataset now {} records, page {} -> {}",
                total, self.page_index, clamped.page_index
            );
            *self = clamped;
        }
    }
}

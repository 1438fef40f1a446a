//! Derived page view.

use std::ops::Range;

use super::PageState;

/// One page of rows plus the navigation state a renderer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a, T> {
    /// Rows on this page, at most `page_size` of them.
    pub items: &'a [T],
    /// Page index after clamping.
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    /// Total number of records across all pages.
    pub total: usize,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    /// Filler rows that keep a short last page at full height.
    pub padding_rows: usize,
}

impl<'a, T> PageView<'a, T> {
    /// Slice one page out of a fully resident dataset.
    ///
    /// The state is clamped to the dataset first, so a stale page index can
    /// never produce an empty page for a non-empty dataset.
    ///
    /// # Example
    ///
    /// ```
    /// use std::num::NonZeroUsize;
    /// use datagrid_lib::page::{PageState, PageView};
    ///
    /// let rows: Vec<u32> = (0..12).collect();
    /// let mut state = PageState::new(NonZeroUsize::new(5).unwrap());
    /// state.goto(2, rows.len());
    ///
    /// let view = PageView::slice(&rows, &state);
    /// assert_eq!(view.items, &[10, 11]);
    /// assert_eq!(view.padding_rows, 3);
    /// assert!(!view.can_go_next);
    /// ```
    pub fn slice(records: &'a [T], state: &PageState) -> Self {
        let total = records.len();
        let state = state.clamped(total);
        let start = state.first_row().min(total);
        let end = (start + state.page_size()).min(total);
        Self::build(&records[start..end], &state, total)
    }

    /// Wrap a page that was fetched on its own.
    ///
    /// Used for server-side paging, where only the current page is resident
    /// and `total_count` comes from the data source. Extra rows beyond the
    /// page size are ignored.
    pub fn resident(page: &'a [T], state: &PageState, total_count: usize) -> Self {
        let state = state.clamped(total_count);
        let end = page.len().min(state.page_size());
        Self::build(&page[..end], &state, total_count)
    }

    fn build(items: &'a [T], state: &PageState, total: usize) -> Self {
        Self {
            items,
            page_index: state.page_index(),
            page_size: state.page_size(),
            page_count: state.page_count(total),
            total,
            can_go_previous: state.can_go_previous(),
            can_go_next: state.can_go_next(total),
            padding_rows: state.page_size() - items.len(),
        }
    }

    /// Absolute row offsets covered by this page.
    pub fn row_range(&self) -> Range<usize> {
        let start = self.page_index * self.page_size;
        start..start + self.items.len()
    }

    /// "1-5 of 91" style label.
    pub fn range_label(&self) -> String {
        let range = self.row_range();
        if range.is_empty() {
            return format!("0 of {}", self.total);
        }
        format!("{}-{} of {}", range.start + 1, range.end, self.total)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;

    fn state(size: usize, index: usize, total: usize) -> PageState {
        let mut state = PageState::new(NonZeroUsize::new(size).unwrap());
        state.goto(index, total);
        state
    }

    #[test]
    fn test_full_page() {
        let rows: Vec<u32> = (0..12).collect();
        let view = PageView::slice(&rows, &state(5, 1, 12));
        assert_eq!(view.items, &[5, 6, 7, 8, 9]);
        assert!(view.can_go_previous);
        assert!(view.can_go_next);
        assert_eq!(view.padding_rows, 0);
        assert_eq!(view.range_label(), "6-10 of 12");
    }

    #[test]
    fn test_empty_dataset() {
        let rows: Vec<u32> = vec![];
        let view = PageView::slice(&rows, &state(5, 0, 0));
        assert!(view.is_empty());
        assert_eq!(view.page_count, 0);
        assert!(!view.can_go_previous);
        assert!(!view.can_go_next);
        assert_eq!(view.padding_rows, 5);
        assert_eq!(view.range_label(), "0 of 0");
    }

    #[test]
    fn test_stale_index_is_clamped() {
        let rows: Vec<u32> = (0..7).collect();
        let view = PageView::slice(&rows, &state(5, 9, 100));
        assert_eq!(view.page_index, 1);
        assert_eq!(view.items, &[5, 6]);
    }

    #[test]
    fn test_resident_page_uses_remote_total() {
        let page: Vec<u32> = (50..60).collect();
        let view = PageView::resident(&page, &state(10, 5, 200), 200);
        assert_eq!(view.items.len(), 10);
        assert_eq!(view.page_count, 20);
        assert!(view.can_go_next);
        assert_eq!(view.row_range(), 50..60);
    }

    #[test]
    fn test_resident_page_truncates_oversized_fetch() {
        let page: Vec<u32> = (0..8).collect();
        let view = PageView::resident(&page, &state(5, 0, 8), 8);
        assert_eq!(view.items, &[0, 1, 2, 3, 4]);
    }
}

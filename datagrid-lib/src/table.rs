//! Table controller

use std::fmt;
use std::num::NonZeroUsize;

use log::debug;

use crate::column::Column;
use crate::column::ColumnModel;
use crate::config::TableConfig;
use crate::error::ColumnError;
use crate::error::ConfigError;
use crate::export::ExportJob;
use crate::export::export_grid;
use crate::model::Record;
use crate::page::PageSizePolicy;
use crate::page::PageState;
use crate::page::PageView;
use crate::selection::RowIdentity;
use crate::selection::SelectionEngine;
use crate::selection::ToggleAllState;
use crate::sort::SortDescriptor;
use crate::sort::SortIndicator;
use crate::sort::sort_records;

/// Everything needed to render one page of a table.
#[derive(Debug)]
pub struct TableView<'a, R> {
    /// Visible columns in schema order.
    pub columns: Vec<&'a Column<R>>,
    /// Sort indicator per entry of `columns`.
    pub indicators: Vec<SortIndicator>,
    /// Rows of the current page, in sort order.
    pub rows: Vec<&'a R>,
    /// Selection flag per entry of `rows`.
    pub selected: Vec<bool>,
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub total: usize,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    /// Empty rows that keep a short page at full height.
    pub padding_rows: usize,
    /// Width a padding row spans, in columns.
    pub column_span: usize,
    pub toggle_all: ToggleAllState,
    pub selected_count: usize,
}

impl<R> TableView<'_, R> {
    /// "6-10 of 12" style label for the page footer.
    pub fn range_label(&self) -> String {
        let start = self.page_index * self.page_size;
        if self.rows.is_empty() {
            return format!("0 of {}", self.total);
        }
        format!("{}-{} of {}", start + 1, start + self.rows.len(), self.total)
    }
}

/// A data table: column model, sort, pagination and selection in one place.
///
/// The table holds view state only. Records stay with the caller and are
/// passed in whenever a view or an export is derived, so the same table can
/// sit in front of a fully resident dataset or a remote one.
///
/// Call [`dataset_changed`](Self::dataset_changed) whenever the record count
/// changes; navigation clamps against the last count seen.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
/// use datagrid_lib::DataTable;
/// use datagrid_lib::column::{Column, ColumnModel};
/// use datagrid_lib::model::Record;
/// use datagrid_lib::selection::RowIdentity;
///
/// let columns = ColumnModel::new(vec![
///     Column::field("name", "Name"),
///     Column::field("age", "Age"),
/// ]).unwrap();
/// let records: Vec<Record> = (0..12i64)
///     .map(|i| Record::new().set("name", format!("n{i}")).set("age", 50 - i))
///     .collect();
///
/// let page_size = NonZeroUsize::new(5).unwrap();
/// let mut table = DataTable::new(columns, RowIdentity::field("name"), page_size);
/// table.dataset_changed(records.len());
/// table.toggle_sort("age").unwrap();
/// table.next_page();
///
/// let view = table.view(&records);
/// assert_eq!(view.range_label(), "6-10 of 12");
/// assert_eq!(view.rows[0].get_i64("age"), Some(44));
/// ```
pub struct DataTable<R> {
    columns: ColumnModel<R>,
    sort: SortDescriptor,
    page: PageState,
    selection: SelectionEngine<R>,
    policy: PageSizePolicy,
    total: usize,
}

impl<R> Clone for DataTable<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            sort: self.sort.clone(),
            page: self.page,
            selection: self.selection.clone(),
            policy: self.policy,
            total: self.total,
        }
    }
}

impl<R> fmt::Debug for DataTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns)
            .field("sort", &self.sort)
            .field("page", &self.page)
            .field("selected", &self.selection.count())
            .field("policy", &self.policy)
            .field("total", &self.total)
            .finish()
    }
}

impl<R> DataTable<R> {
    pub fn new(columns: ColumnModel<R>, identity: RowIdentity<R>, page_size: NonZeroUsize) -> Self {
        Self {
            columns,
            sort: SortDescriptor::none(),
            page: PageState::new(page_size),
            selection: SelectionEngine::new(identity),
            policy: PageSizePolicy::default(),
            total: 0,
        }
    }

    pub fn with_page_size_policy(mut self, policy: PageSizePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn columns(&self) -> &ColumnModel<R> {
        &self.columns
    }

    pub fn sort(&self) -> &SortDescriptor {
        &self.sort
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    pub fn selection(&self) -> &SelectionEngine<R> {
        &self.selection
    }

    pub fn page_size_policy(&self) -> PageSizePolicy {
        self.policy
    }

    /// Record count last passed to [`dataset_changed`](Self::dataset_changed).
    pub fn total(&self) -> usize {
        self.total
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Show or hide a column. Hiding the sorted column drops the sort.
    pub fn set_column_visible(&mut self, id: &str, visible: bool) -> Result<bool, ColumnError> {
        let changed = self.columns.set_visible(id, visible)?;
        if changed && !visible {
            self.drop_sort_on(id);
        }
        Ok(changed)
    }

    /// Flip a column's visibility and return the new value.
    pub fn toggle_column(&mut self, id: &str) -> Result<bool, ColumnError> {
        let visible = self.columns.toggle_visible(id)?;
        if !visible {
            self.drop_sort_on(id);
        }
        Ok(visible)
    }

    fn drop_sort_on(&mut self, id: &str) {
        if self.sort.column_id() == Some(id) {
            debug!("Sorted column '{}' hidden, clearing sort", id);
            self.sort.clear();
        }
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Header click: cycle the sort on a column.
    ///
    /// Unknown, hidden and unsortable columns are rejected and leave the
    /// current sort alone.
    pub fn toggle_sort(&mut self, id: &str) -> Result<SortDescriptor, ColumnError> {
        self.columns.sort_target(id)?;
        self.sort.toggle(id);
        Ok(self.sort.clone())
    }

    pub fn clear_sort(&mut self) {
        self.sort.clear();
    }

    pub fn sort_indicator(&self, id: &str) -> SortIndicator {
        self.sort.indicator(id)
    }

    /// All records in the current sort order.
    pub fn sorted<'a>(&self, records: &'a [R]) -> Vec<&'a R> {
        sort_records(records, &self.sort, &self.columns)
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// The record count changed; re-clamp the page.
    pub fn dataset_changed(&mut self, total: usize) {
        self.total = total;
        self.page.dataset_changed(total);
    }

    /// Returns `false` when already on the last page.
    pub fn next_page(&mut self) -> bool {
        self.page.next(self.total)
    }

    /// Returns `false` when already on the first page.
    pub fn previous_page(&mut self) -> bool {
        self.page.previous()
    }

    /// Jump to a page, clamped. Returns the page landed on.
    pub fn goto_page(&mut self, page_index: usize) -> usize {
        self.page.goto(page_index, self.total)
    }

    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.page.set_page_size(page_size, self.total, self.policy);
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn toggle_row(&mut self, record: &R) -> bool {
        self.selection.toggle(record)
    }

    pub fn select_row(&mut self, record: &R) -> bool {
        self.selection.select(record)
    }

    pub fn deselect_row(&mut self, record: &R) -> bool {
        self.selection.deselect(record)
    }

    /// Shift-click on `record`, using the current sort order.
    pub fn range_select(&mut self, record: &R, records: &[R], extend: bool) -> usize {
        let displayed = sort_records(records, &self.sort, &self.columns);
        self.selection.range_select(record, &displayed, extend)
    }

    /// Toggle-all checkbox: select the whole dataset unless it already is.
    pub fn toggle_all(&mut self, records: &[R]) -> ToggleAllState {
        if self.selection.is_all_selected(records) && !records.is_empty() {
            self.selection.deselect_all();
        } else {
            self.selection.select_all(records);
        }
        self.selection.toggle_all_state(records)
    }

    pub fn select_all(&mut self, records: &[R]) {
        self.selection.select_all(records);
    }

    pub fn deselect_all(&mut self) {
        self.selection.deselect_all();
    }

    pub fn is_selected(&self, record: &R) -> bool {
        self.selection.is_selected(record)
    }

    /// Selected records in dataset order.
    pub fn selected<'a>(&self, records: &'a [R]) -> Vec<&'a R> {
        self.selection.selected_in(records)
    }

    // -------------------------------------------------------------------------
    // Views
    // -------------------------------------------------------------------------

    /// Sort, then cut out the current page.
    ///
    /// If `records` is not the length last passed to `dataset_changed`, the
    /// table takes the new length first and the stored page is re-clamped, so
    /// later navigation starts from the page that was shown.
    pub fn view<'a>(&'a mut self, records: &'a [R]) -> TableView<'a, R> {
        if records.len() != self.total {
            debug!(
                "Dataset length {} differs from {}, re-clamping page",
                records.len(),
                self.total
            );
            self.dataset_changed(records.len());
        }

        let this: &'a Self = self;
        let sorted = this.sorted(records);
        let page = PageView::slice(&sorted, &this.page);
        let rows = page.items.to_vec();
        let toggle_all = this.selection.toggle_all_state(records);
        this.build_view(rows, &page, toggle_all)
    }

    /// View of a page that was fetched on its own.
    ///
    /// The page is shown in the order the source returned it; ordering is the
    /// source's business when paging is manual.
    pub fn view_resident<'a>(&'a self, page: &'a [R], total_count: usize) -> TableView<'a, R> {
        let page = PageView::resident(page, &self.page, total_count);
        let rows: Vec<&R> = page.items.iter().collect();
        let toggle_all = if self.selection.count() == 0 {
            ToggleAllState::Unchecked
        } else {
            ToggleAllState::Indeterminate
        };
        self.build_view(rows, &page, toggle_all)
    }

    fn build_view<'a, T>(
        &'a self,
        rows: Vec<&'a R>,
        page: &PageView<'_, T>,
        toggle_all: ToggleAllState,
    ) -> TableView<'a, R> {
        let columns = self.columns.visible_columns();
        let indicators = columns.iter().map(|c| self.sort.indicator(c.id())).collect();
        let selected = rows.iter().map(|r| self.selection.is_selected(r)).collect();

        TableView {
            column_span: columns.len(),
            columns,
            indicators,
            selected,
            rows,
            page_index: page.page_index,
            page_size: page.page_size,
            page_count: page.page_count,
            total: page.total,
            can_go_previous: page.can_go_previous,
            can_go_next: page.can_go_next,
            padding_rows: page.padding_rows,
            toggle_all,
            selected_count: self.selection.count(),
        }
    }

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------

    /// Export every record, not just the page, in the current sort order and
    /// through the visible columns.
    pub fn export(&self, records: &[R], title: impl Into<String>) -> ExportJob {
        let sorted = self.sorted(records);
        let columns = self.columns.visible_columns();
        let grid = export_grid(sorted.iter().copied(), &columns);
        debug!("Exported {} rows x {} columns", grid.height(), grid.width());
        ExportJob::new(title, grid)
    }
}

impl DataTable<Record> {
    /// Build a [`Record`] table from a config.
    pub fn from_config(
        config: &TableConfig,
        identity: RowIdentity<Record>,
    ) -> Result<Self, ConfigError> {
        let columns = ColumnModel::new(config.record_columns())?;
        let table = Self::new(columns, identity, config.page_size()?);
        Ok(table.with_page_size_policy(config.page_size_policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    fn table() -> DataTable<Record> {
        let columns = ColumnModel::new(vec![
            Column::field("name", "Name"),
            Column::field("age", "Age"),
        ])
        .unwrap();
        DataTable::new(columns, RowIdentity::field("name"), NonZeroUsize::new(5).unwrap())
    }

    fn records(n: i64) -> Vec<Record> {
        (0..n)
            .map(|i| Record::new().set("name", format!("n{i:02}")).set("age", i % 4))
            .collect()
    }

    #[test]
    fn test_hiding_sorted_column_clears_sort() {
        let mut table = table();
        table.toggle_sort("age").unwrap();
        assert!(table.sort().is_active());

        assert_eq!(table.toggle_column("age"), Ok(false));
        assert!(!table.sort().is_active());
        assert_eq!(
            table.toggle_sort("age").unwrap_err(),
            ColumnError::hidden("age")
        );
    }

    #[test]
    fn test_hiding_other_column_keeps_sort() {
        let mut table = table();
        table.toggle_sort("name").unwrap();
        table.set_column_visible("age", false).unwrap();
        assert_eq!(table.sort().column_id(), Some("name"));
    }

    #[test]
    fn test_view_is_sorted_then_paged() {
        let mut table = table();
        let records = records(12);
        table.dataset_changed(records.len());
        table.toggle_sort("age").unwrap();
        table.toggle_sort("age").unwrap();
        table.goto_page(2);

        let view = table.view(&records);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.padding_rows, 3);
        assert_eq!(view.column_span, 2);
        // age desc, ties keep dataset order
        let names: Vec<_> = view.rows.iter().map(|r| r.get_string("name").unwrap()).collect();
        assert_eq!(names, vec!["n04", "n08"]);
        assert!(view.indicators[1].active);
        assert!(!view.can_go_next);
    }

    #[test]
    fn test_view_clamps_stale_page() {
        let mut table = table();
        table.dataset_changed(50);
        table.goto_page(9);

        let records = records(7);
        let view = table.view(&records);
        assert_eq!(view.page_index, 1);
        assert_eq!(view.rows.len(), 2);

        assert_eq!(table.page().page_index(), 1);
        assert!(table.previous_page());
        assert_eq!(table.page().page_index(), 0);
    }

    #[test]
    fn test_toggle_all_after_stale_selection() {
        let mut table = table();
        let records = records(3);
        table.toggle_row(&records[0]);

        // Row 0 left the dataset without a reset
        let remaining = &records[1..];
        assert_eq!(table.toggle_all(remaining), ToggleAllState::Checked);
        assert_eq!(table.selection().count(), 2);
        assert_eq!(table.toggle_all(remaining), ToggleAllState::Unchecked);
    }

    #[test]
    fn test_clone_without_clone_records() {
        struct Row(u32);

        let columns = ColumnModel::new(vec![
            Column::new("n", "N").accessor(|r: &Row| Some(Value::from(r.0))),
        ])
        .unwrap();
        let identity = RowIdentity::new(|r: &Row| r.0.to_string());
        let mut table = DataTable::new(columns, identity, NonZeroUsize::new(2).unwrap());
        let rows = [Row(1), Row(2), Row(3)];
        table.toggle_row(&rows[0]);

        let mut copy = table.clone();
        copy.toggle_all(&rows);
        assert_eq!(table.selection().count(), 1);
        assert_eq!(copy.selection().count(), 3);
    }

    #[test]
    fn test_toggle_all_flips() {
        let mut table = table();
        let records = records(3);
        assert_eq!(table.toggle_all(&records), ToggleAllState::Checked);
        assert_eq!(table.toggle_all(&records), ToggleAllState::Unchecked);
        table.toggle_row(&records[0]);
        assert_eq!(table.toggle_all(&records), ToggleAllState::Checked);
    }

    #[test]
    fn test_export_uses_sort_and_visible_columns() {
        let mut table = table();
        let records = records(3);
        table.toggle_sort("name").unwrap();
        table.toggle_sort("name").unwrap();
        table.set_column_visible("age", false).unwrap();

        let job = table.export(&records, "People");
        assert_eq!(job.grid.header, vec!["Name"]);
        assert_eq!(job.grid.rows[0][0].as_str(), Some("n02"));
        assert_eq!(job.grid.height(), 3);
    }

    #[test]
    fn test_from_config() {
        let config = TableConfig::from_toml_str(
            r#"
            page_size = 3
            [[columns]]
            field = "name"
            "#,
        )
        .unwrap();
        let table = DataTable::from_config(&config, RowIdentity::field("name")).unwrap();
        assert_eq!(table.page().page_size(), 3);

        let err = DataTable::from_config(&TableConfig::default(), RowIdentity::field("name"));
        assert!(matches!(err, Err(ConfigError::Schema(ColumnError::EmptySchema))));
    }
}

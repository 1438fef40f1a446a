//! Row selection over a full dataset.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::debug;

use super::Selection;
use crate::model::Record;

/// Caller-supplied row identity strategy.
///
/// Must be deterministic and give logically identical records the same id.
/// This is a precondition; the engine does not check it.
pub struct RowIdentity<R>(Arc<dyn Fn(&R) -> String + Send + Sync>);

impl<R> RowIdentity<R> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Identity of one record.
    pub fn id_of(&self, record: &R) -> String {
        (self.0)(record)
    }
}

impl RowIdentity<Record> {
    /// Use a record field's text as the identity.
    pub fn field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(move |record: &Record| {
            record.get(&field).map(|v| v.to_text()).unwrap_or_default()
        })
    }

    /// Join several fields' text into one identity.
    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        Self::new(move |record: &Record| {
            fields
                .iter()
                .map(|f| record.get(f).map(|v| v.to_text()).unwrap_or_default())
                .collect::<Vec<_>>()
                .join("\u{1f}")
        })
    }
}

impl<R> Clone for RowIdentity<R> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<R> fmt::Debug for RowIdentity<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RowIdentity")
    }
}

/// State of a toggle-all checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAllState {
    Unchecked,
    Indeterminate,
    Checked,
}

/// Tracks which records are selected, independent of sort and pagination.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::Record;
/// use datagrid_lib::selection::{RowIdentity, SelectionEngine, ToggleAllState};
///
/// let records: Vec<Record> = (0..3).map(|i| Record::new().set("id", i as i64)).collect();
/// let mut selection = SelectionEngine::new(RowIdentity::field("id"));
///
/// selection.select_all(&records);
/// selection.toggle(&records[1]);
/// assert_eq!(selection.count(), 2);
/// assert_eq!(selection.toggle_all_state(&records), ToggleAllState::Indeterminate);
/// ```
pub struct SelectionEngine<R> {
    identity: RowIdentity<R>,
    selection: Selection,
}

impl<R> Clone for SelectionEngine<R> {
    fn clone(&self) -> Self {
        Self {
            identity: self.identity.clone(),
            selection: self.selection.clone(),
        }
    }
}

impl<R> fmt::Debug for SelectionEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionEngine")
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl<R> SelectionEngine<R> {
    /// Empty selection with the given identity strategy.
    pub fn new(identity: RowIdentity<R>) -> Self {
        Self {
            identity,
            selection: Selection::new(),
        }
    }

    pub fn identity(&self) -> &RowIdentity<R> {
        &self.identity
    }

    /// The underlying id set.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Select every record of the dataset, not just one page.
    ///
    /// The selection becomes exactly the dataset's ids; ids of records no
    /// longer in `records` are dropped.
    pub fn select_all(&mut self, records: &[R]) {
        let identity = &self.identity;
        self.selection.select_all(records.iter().map(|r| identity.id_of(r)));
        debug!("Selected all {} rows", self.selection.len());
    }

    /// Clear the selection.
    pub fn deselect_all(&mut self) {
        let dropped = self.selection.clear();
        debug!("Deselected {} rows", dropped);
    }

    /// Clear the selection after a bulk action completes.
    pub fn reset(&mut self) {
        self.deselect_all();
    }

    /// Flip one record. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, record: &R) -> bool {
        let id = self.identity.id_of(record);
        self.selection.toggle(&id)
    }

    /// Select one record. Returns `true` if it was not already selected.
    pub fn select(&mut self, record: &R) -> bool {
        let id = self.identity.id_of(record);
        self.selection.select(&id)
    }

    /// Deselect one record. Returns `true` if it was selected.
    pub fn deselect(&mut self, record: &R) -> bool {
        let id = self.identity.id_of(record);
        self.selection.deselect(&id)
    }

    /// Shift-click: select from the last toggled row to `record`, in the
    /// order rows are currently displayed.
    pub fn range_select(&mut self, record: &R, displayed: &[&R], extend: bool) -> usize {
        let target = self.identity.id_of(record);
        let ordered: Vec<String> = displayed.iter().map(|r| self.identity.id_of(r)).collect();
        self.selection.range_select(&target, &ordered, extend)
    }

    pub fn is_selected(&self, record: &R) -> bool {
        self.selection.is_selected(&self.identity.id_of(record))
    }

    /// Number of selected identities.
    pub fn count(&self) -> usize {
        self.selection.len()
    }

    /// `true` iff every record of `records` is selected and nothing else is.
    ///
    /// Records sharing an identity count once.
    pub fn is_all_selected(&self, records: &[R]) -> bool {
        let ids: HashSet<String> = records.iter().map(|r| self.identity.id_of(r)).collect();
        self.selection.len() == ids.len() && ids.iter().all(|id| self.selection.is_selected(id))
    }

    /// Checkbox state for a toggle-all control over `records`.
    ///
    /// An empty dataset is always unchecked.
    pub fn toggle_all_state(&self, records: &[R]) -> ToggleAllState {
        if records.is_empty() || self.selection.is_empty() {
            ToggleAllState::Unchecked
        } else if self.is_all_selected(records) {
            ToggleAllState::Checked
        } else {
            ToggleAllState::Indeterminate
        }
    }

    /// Selected ids in sorted order.
    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.selected()
    }

    /// Selected records in dataset order, e.g. for a bulk action.
    pub fn selected_in<'a>(&self, records: &'a [R]) -> Vec<&'a R> {
        records.iter().filter(|r| self.is_selected(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: i64) -> Vec<Record> {
        (0..n)
            .map(|i| Record::new().set("id", i).set("name", format!("row {i}")))
            .collect()
    }

    fn engine() -> SelectionEngine<Record> {
        SelectionEngine::new(RowIdentity::field("id"))
    }

    #[test]
    fn test_select_all_then_deselect_one() {
        let records = records(5);
        let mut selection = engine();
        selection.select_all(&records);
        assert!(selection.is_all_selected(&records));
        assert_eq!(selection.toggle_all_state(&records), ToggleAllState::Checked);

        assert!(selection.deselect(&records[2]));
        assert_eq!(selection.count(), 4);
        assert!(!selection.is_all_selected(&records));
        assert_eq!(
            selection.toggle_all_state(&records),
            ToggleAllState::Indeterminate
        );
    }

    #[test]
    fn test_select_all_replaces_stale_ids() {
        let records = records(3);
        let mut selection = engine();
        selection.toggle(&Record::new().set("id", 99i64));
        assert_eq!(selection.count(), 1);

        selection.select_all(&records);
        assert_eq!(selection.count(), 3);
        assert!(selection.is_all_selected(&records));
        assert_eq!(selection.toggle_all_state(&records), ToggleAllState::Checked);
    }

    #[test]
    fn test_clone_without_clone_records() {
        struct Row(u32);

        let rows = [Row(1), Row(2)];
        let mut selection = SelectionEngine::new(RowIdentity::new(|r: &Row| r.0.to_string()));
        selection.toggle(&rows[0]);

        let mut copy = selection.clone();
        copy.toggle(&rows[1]);
        assert_eq!(selection.count(), 1);
        assert_eq!(copy.count(), 2);
        assert!(format!("{selection:?}").starts_with("SelectionEngine"));
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let records = records(3);
        let mut selection = engine();
        selection.toggle(&records[0]);
        let before = selection.selected_ids();
        assert!(selection.toggle(&records[1]));
        assert!(!selection.toggle(&records[1]));
        assert_eq!(selection.selected_ids(), before);
    }

    #[test]
    fn test_identical_records_collapse() {
        let a = Record::new().set("id", 7i64).set("name", "first");
        let b = Record::new().set("id", 7i64).set("name", "copy");
        let mut selection = engine();
        selection.select(&a);
        assert!(selection.is_selected(&b));
        assert!(!selection.select(&b));
        assert_eq!(selection.count(), 1);
        assert!(selection.is_all_selected(&[a, b]));
    }

    #[test]
    fn test_selected_in_keeps_dataset_order() {
        let records = records(4);
        let mut selection = engine();
        selection.toggle(&records[3]);
        selection.toggle(&records[1]);
        let picked: Vec<_> = selection
            .selected_in(&records)
            .iter()
            .map(|r| r.get_i64("id").unwrap())
            .collect();
        assert_eq!(picked, vec![1, 3]);
    }

    #[test]
    fn test_reset_clears() {
        let records = records(2);
        let mut selection = engine();
        selection.select_all(&records);
        selection.reset();
        assert_eq!(selection.count(), 0);
        assert_eq!(selection.toggle_all_state(&records), ToggleAllState::Unchecked);
    }

    #[test]
    fn test_composite_identity() {
        let identity = RowIdentity::fields(["first", "last"]);
        let a = Record::new().set("first", "Ada").set("last", "Lovelace");
        let b = Record::new().set("first", "Ada").set("last", "Byron");
        assert_ne!(identity.id_of(&a), identity.id_of(&b));
    }

    #[test]
    fn test_range_select_in_display_order() {
        let records = records(5);
        let displayed: Vec<&Record> = records.iter().rev().collect();
        let mut selection = engine();
        selection.toggle(&records[4]);
        assert_eq!(selection.range_select(&records[2], &displayed, true), 2);
        assert_eq!(selection.selected_ids(), vec!["2", "3", "4"]);
    }
}

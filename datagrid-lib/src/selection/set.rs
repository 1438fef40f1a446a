//! Id-based selection set.

use std::collections::BTreeSet;

/// Selected row identities plus the range anchor.
///
/// Ids are kept ordered so listings are deterministic. The anchor is the id
/// most recently selected or toggled on its own; a shift-click range runs
/// from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
    anchor: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids in ascending order.
    pub fn selected(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Drop every id and the anchor. Returns how many ids were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.ids.len();
        self.ids.clear();
        self.anchor = None;
        dropped
    }

    /// Returns `true` if `id` was not selected before.
    pub fn select(&mut self, id: &str) -> bool {
        self.anchor = Some(id.to_string());
        self.ids.insert(id.to_string())
    }

    /// Returns `true` if `id` was selected. The anchor is left alone.
    pub fn deselect(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            self.anchor = Some(id.to_string());
            false
        } else {
            self.select(id)
        }
    }

    /// The set becomes exactly `ids`. Anything selected before that is not
    /// in `ids` is dropped, and so is the anchor.
    pub fn select_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
        self.anchor = None;
    }

    /// Select the run of `ordered` between the anchor and `target`, both
    /// ends included.
    ///
    /// With `extend` off, ids outside that run are dropped first. If there is
    /// no anchor, or either end is missing from `ordered`, this falls back to
    /// selecting `target` alone. Returns how many ids were newly selected.
    pub fn range_select(&mut self, target: &str, ordered: &[String], extend: bool) -> usize {
        let ends = self
            .anchor
            .as_deref()
            .and_then(|anchor| ordered.iter().position(|id| id == anchor))
            .zip(ordered.iter().position(|id| id == target));
        let Some((from, to)) = ends else {
            return usize::from(self.select(target));
        };

        let run = &ordered[from.min(to)..=from.max(to)];
        if !extend {
            self.ids.retain(|id| run.contains(id));
        }
        let before = self.ids.len();
        self.ids.extend(run.iter().cloned());
        self.ids.len() - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_toggle_moves_anchor() {
        let mut selection = Selection::new();
        assert!(selection.toggle("a"));
        assert!(selection.toggle("b"));
        assert!(!selection.toggle("a"));
        assert_eq!(selection.selected(), ids(&["b"]));
        assert_eq!(selection.anchor(), Some("a"));
    }

    #[test]
    fn test_range_select_from_anchor() {
        let order = ids(&["a", "b", "c", "d", "e"]);
        let mut selection = Selection::new();
        selection.toggle("b");
        assert_eq!(selection.range_select("d", &order, false), 2);
        assert_eq!(selection.selected(), ids(&["b", "c", "d"]));
        assert_eq!(selection.anchor(), Some("b"));
    }

    #[test]
    fn test_range_select_without_extend_drops_outside() {
        let order = ids(&["a", "b", "c", "d", "e"]);
        let mut selection = Selection::new();
        selection.toggle("e");
        selection.toggle("b");
        assert_eq!(selection.range_select("c", &order, false), 1);
        assert_eq!(selection.selected(), ids(&["b", "c"]));
    }

    #[test]
    fn test_range_select_with_extend_keeps_outside() {
        let order = ids(&["a", "b", "c", "d", "e"]);
        let mut selection = Selection::new();
        selection.toggle("e");
        selection.toggle("b");
        selection.range_select("a", &order, true);
        assert_eq!(selection.selected(), ids(&["a", "b", "e"]));
    }

    #[test]
    fn test_range_select_unknown_anchor_selects_target() {
        let order = ids(&["a", "b"]);
        let mut selection = Selection::new();
        selection.toggle("zz");
        assert_eq!(selection.range_select("b", &order, true), 1);
        assert_eq!(selection.selected(), ids(&["b", "zz"]));
        assert_eq!(selection.anchor(), Some("b"));
    }

    #[test]
    fn test_select_all_replaces_previous_ids() {
        let mut selection = Selection::new();
        selection.toggle("gone");
        selection.toggle("a");
        selection.select_all(["a", "b", "c"]);
        assert_eq!(selection.selected(), ids(&["a", "b", "c"]));
        assert_eq!(selection.anchor(), None);
        assert_eq!(selection.clear(), 3);
        assert!(selection.is_empty());
    }
}

//! Column model: schema order and visibility.

use std::collections::HashSet;

use log::debug;

use super::Column;
use crate::error::ColumnError;

/// The ordered column schema of a table.
///
/// Columns are fixed at construction; only their visibility changes. At least
/// one column is visible at all times: the constructor refuses a schema with
/// none and [`set_visible`](Self::set_visible) refuses to hide the last one.
pub struct ColumnModel<R> {
    columns: Vec<Column<R>>,
}

impl<R> Clone for ColumnModel<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<R> std::fmt::Debug for ColumnModel<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnModel")
            .field("columns", &self.columns)
            .finish()
    }
}

impl<R> ColumnModel<R> {
    /// Create a column model from a schema.
    ///
    /// Fails on an empty schema, duplicate column ids, or a schema whose
    /// columns all start hidden.
    pub fn new(columns: Vec<Column<R>>) -> Result<Self, ColumnError> {
        if columns.is_empty() {
            return Err(ColumnError::EmptySchema);
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.id()) {
                return Err(ColumnError::duplicate(column.id()));
            }
        }

        if !columns.iter().any(Column::is_visible) {
            return Err(ColumnError::last_visible(columns[0].id()));
        }

        Ok(Self { columns })
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// All columns in schema order, hidden ones included.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Number of columns in the schema.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always `false`: a column model has at least one column.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Find a column by id.
    pub fn get(&self, id: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.id() == id)
    }

    /// Schema position of a column.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id() == id)
    }

    /// Visible columns in schema order.
    pub fn visible(&self) -> impl Iterator<Item = &Column<R>> {
        self.columns.iter().filter(|c| c.is_visible())
    }

    /// Visible columns in schema order, collected.
    pub fn visible_columns(&self) -> Vec<&Column<R>> {
        self.visible().collect()
    }

    /// Number of visible columns. Never zero.
    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    /// Returns `true` if the column exists and is visible.
    pub fn is_visible(&self, id: &str) -> bool {
        self.get(id).is_some_and(Column::is_visible)
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    /// Show or hide a column.
    ///
    /// Returns whether anything changed. Hiding the last visible column is
    /// rejected with [`ColumnError::LastVisibleColumn`] and leaves the model
    /// untouched.
    pub fn set_visible(&mut self, id: &str, visible: bool) -> Result<bool, ColumnError> {
        let index = self.position(id).ok_or_else(|| ColumnError::unknown(id))?;

        if self.columns[index].is_visible() == visible {
            return Ok(false);
        }

        if !visible && self.visible_count() == 1 {
            debug!("Refusing to hide last visible column '{}'", id);
            return Err(ColumnError::last_visible(id));
        }

        self.columns[index].set_visible(visible);
        debug!("Column '{}' visible={}", id, visible);
        Ok(true)
    }

    /// Flip a column's visibility and return the new value.
    pub fn toggle_visible(&mut self, id: &str) -> Result<bool, ColumnError> {
        let visible = self.is_visible(id);
        self.set_visible(id, !visible)?;
        Ok(!visible)
    }

    // -------------------------------------------------------------------------
    // Sort targets
    // -------------------------------------------------------------------------

    /// Resolve a column that sorting may target.
    ///
    /// Unknown, hidden and unsortable columns are rejected here so the sort
    /// engine never sees them.
    pub fn sort_target(&self, id: &str) -> Result<&Column<R>, ColumnError> {
        let column = self.get(id).ok_or_else(|| ColumnError::unknown(id))?;
        if !column.is_visible() {
            return Err(ColumnError::hidden(id));
        }
        if !column.is_sortable() {
            return Err(ColumnError::not_sortable(id));
        }
        Ok(column)
    }
}

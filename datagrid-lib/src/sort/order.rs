//! Sort descriptor and its toggle cycle.

use log::debug;
use serde::Deserialize;
use serde::Serialize;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

/// The active sort key of a table.
///
/// At most one column is sorted at a time. [`toggle`](Self::toggle) cycles a
/// column through ascending, descending and unsorted; switching to another
/// column starts over at ascending.
///
/// # Example
///
/// ```
/// use datagrid_lib::sort::{Direction, SortDescriptor};
///
/// let mut sort = SortDescriptor::none();
/// sort.toggle("age");
/// assert_eq!(sort.direction_of("age"), Some(Direction::Asc));
/// sort.toggle("age");
/// assert_eq!(sort.direction_of("age"), Some(Direction::Desc));
/// sort.toggle("age");
/// assert!(!sort.is_active());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortDescriptor {
    column_id: Option<String>,
    direction: Direction,
}

impl SortDescriptor {
    /// No active sort: records keep their input order.
    pub fn none() -> Self {
        Self::default()
    }

    /// Ascending sort on a column.
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: Some(column_id.into()),
            direction: Direction::Asc,
        }
    }

    /// Descending sort on a column.
    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: Some(column_id.into()),
            direction: Direction::Desc,
        }
    }

    pub fn column_id(&self) -> Option<&str> {
        self.column_id.as_deref()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_active(&self) -> bool {
        self.column_id.is_some()
    }

    /// Direction the given column is sorted in, if it is the sort key.
    pub fn direction_of(&self, column_id: &str) -> Option<Direction> {
        match &self.column_id {
            Some(id) if id == column_id => Some(self.direction),
            _ => None,
        }
    }

    /// Advance the toggle cycle for a column.
    ///
    /// none → ascending → descending → none. Toggling a column other than the
    /// current key sorts that column ascending.
    pub fn toggle(&mut self, column_id: &str) {
        match (self.direction_of(column_id), self.direction) {
            (Some(_), Direction::Asc) => self.direction = Direction::Desc,
            (Some(_), Direction::Desc) => self.clear(),
            (None, _) => {
                self.column_id = Some(column_id.to_string());
                self.direction = Direction::Asc;
            }
        }
        debug!(
            "Sort toggled on '{}': {:?}",
            column_id,
            self.direction_of(column_id)
        );
    }

    /// Drop the sort key.
    pub fn clear(&mut self) {
        self.column_id = None;
        self.direction = Direction::Asc;
    }

    /// Header indicator for a column.
    pub fn indicator(&self, column_id: &str) -> SortIndicator {
        match self.direction_of(column_id) {
            Some(direction) => SortIndicator {
                active: true,
                direction,
            },
            None => SortIndicator::default(),
        }
    }
}

/// What a column header shows about sorting.
///
/// Inactive headers report [`Direction::Asc`], the direction the next toggle
/// would apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortIndicator {
    pub active: bool,
    pub direction: Direction,
}

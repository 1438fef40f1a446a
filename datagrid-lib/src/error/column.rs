//! Column model rejections

/// A column operation that was refused.
///
/// Rejections never change state: the column model is exactly as it was
/// before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColumnError {
    /// The schema has no columns at all.
    #[error("Column schema is empty")]
    EmptySchema,

    /// Two columns in the schema share an id.
    #[error("Duplicate column id '{id}'")]
    DuplicateId { id: String },

    /// The schema (or the requested change) would leave no visible column.
    #[error("Column '{id}' is the last visible column")]
    LastVisibleColumn { id: String },

    /// No column with the given id exists.
    #[error("Column '{id}' not found")]
    UnknownColumn { id: String },

    /// The column exists but is hidden.
    #[error("Column '{id}' is hidden")]
    HiddenColumn { id: String },

    /// The column has no accessor or was declared unsortable.
    #[error("Column '{id}' is not sortable")]
    NotSortable { id: String },
}

impl ColumnError {
    /// Creates a new duplicate id error.
    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    /// Creates a new last-visible-column rejection.
    pub fn last_visible(id: impl Into<String>) -> Self {
        Self::LastVisibleColumn { id: id.into() }
    }

    /// Creates a new unknown column error.
    pub fn unknown(id: impl Into<String>) -> Self {
        Self::UnknownColumn { id: id.into() }
    }

    /// Creates a new hidden column error.
    pub fn hidden(id: impl Into<String>) -> Self {
        Self::HiddenColumn { id: id.into() }
    }

    /// Creates a new not-sortable error.
    pub fn not_sortable(id: impl Into<String>) -> Self {
        Self::NotSortable { id: id.into() }
    }

    /// Returns the column id the error refers to, if any.
    pub fn column_id(&self) -> Option<&str> {
        match self {
            Self::EmptySchema => None,
            Self::DuplicateId { id }
            | Self::LastVisibleColumn { id }
            | Self::UnknownColumn { id }
            | Self::HiddenColumn { id }
            | Self::NotSortable { id } => Some(id),
        }
    }
}

//! Column definition

use std::fmt;
use std::sync::Arc;

use crate::model::Record;
use crate::model::Value;

/// Reads one value out of a record.
///
/// Returns `None` when the record has nothing usable for this column (a
/// missing field, a shape the column does not understand).
pub type Accessor<R> = Arc<dyn Fn(&R) -> Option<Value> + Send + Sync>;

/// Horizontal alignment hint for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Column configuration.
///
/// A column has a unique id, a display header, an optional accessor used for
/// sorting and display, and an optional text-extraction function used by
/// export in preference to the accessor. Visibility is the only field that
/// changes after construction, and only through
/// [`ColumnModel`](super::ColumnModel).
///
/// # Examples
///
/// ```
/// use datagrid_lib::column::Column;
/// use datagrid_lib::model::Value;
///
/// struct Person { name: String, age: u32 }
///
/// let columns = vec![
///     Column::new("name", "Name").accessor(|p: &Person| Some(Value::from(p.name.as_str()))),
///     Column::new("age", "Age").accessor(|p: &Person| Some(Value::from(p.age))),
/// ];
/// ```
pub struct Column<R> {
    id: String,
    header: String,
    accessor: Option<Accessor<R>>,
    text: Option<Accessor<R>>,
    visible: bool,
    sortable: bool,
    align: Alignment,
}

impl<R> Column<R> {
    /// Create a column with no accessor.
    ///
    /// Without an accessor the column can be displayed but not sorted, and
    /// exports as empty cells unless a text function is attached.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            accessor: None,
            text: None,
            visible: true,
            sortable: true,
            align: Alignment::Left,
        }
    }

    /// Set the accessor.
    pub fn accessor<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> Option<Value> + Send + Sync + 'static,
    {
        self.accessor = Some(Arc::new(f));
        self
    }

    /// Set the text-extraction function used by export.
    pub fn text<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> Option<Value> + Send + Sync + 'static,
    {
        self.text = Some(Arc::new(f));
        self
    }

    /// Start hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Set the initial visibility.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Refuse sorting on this column.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Set the alignment hint.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn alignment(&self) -> Alignment {
        self.align
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Sorting needs an accessor to extract keys from.
    pub fn is_sortable(&self) -> bool {
        self.sortable && self.accessor.is_some()
    }

    pub fn has_accessor(&self) -> bool {
        self.accessor.is_some()
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Read this column's value from a record through the accessor.
    pub fn value(&self, record: &R) -> Option<Value> {
        self.accessor.as_ref().and_then(|f| f(record))
    }

    /// Read the value written into an exported cell.
    ///
    /// The text function wins when present, then the accessor. `None` means
    /// neither produced anything and the caller should write a placeholder.
    pub fn export_value(&self, record: &R) -> Option<Value> {
        if let Some(text) = &self.text {
            return text(record);
        }
        self.value(record)
    }
}

impl Column<Record> {
    /// Create a column that reads a [`Record`] field.
    ///
    /// The column id is the field name.
    pub fn field(field: impl Into<String>, header: impl Into<String>) -> Self {
        let field = field.into();
        let key = field.clone();
        Column::new(field, header).accessor(move |record: &Record| record.get(&key).cloned())
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            text: self.text.clone(),
            visible: self.visible,
            sortable: self.sortable,
            align: self.align,
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("accessor", &self.accessor.is_some())
            .field("text", &self.text.is_some())
            .field("visible", &self.visible)
            .field("sortable", &self.sortable)
            .field("align", &self.align)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_column_reads_record() {
        let column = Column::field("age", "Age");
        let record = Record::new().set("age", 30i64);
        assert_eq!(column.id(), "age");
        assert_eq!(column.value(&record), Some(Value::Int(30)));
        assert_eq!(column.value(&Record::new()), None);
        assert!(column.is_sortable());
    }

    #[test]
    fn test_text_takes_precedence_on_export() {
        let column = Column::field("age", "Age")
            .text(|r: &Record| r.get_i64("age").map(|a| Value::from(format!("{a} yrs"))));
        let record = Record::new().set("age", 30i64);
        assert_eq!(column.value(&record), Some(Value::Int(30)));
        assert_eq!(column.export_value(&record), Some(Value::from("30 yrs")));
    }

    #[test]
    fn test_column_without_accessor_is_not_sortable() {
        let column: Column<Record> = Column::new("actions", "Actions");
        assert!(!column.is_sortable());
        assert_eq!(column.export_value(&Record::new()), None);
    }
}

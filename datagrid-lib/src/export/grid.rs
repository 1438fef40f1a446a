//! Projection of records through visible columns into a cell grid.

use log::warn;
use serde::Serialize;

use crate::column::Column;
use crate::model::Value;

/// A rectangular grid: one header row plus one row per record.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Grid {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Grid {
    /// Number of columns.
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Number of data rows, header excluded.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// All rows, header first, as cell values.
    pub fn to_rows(&self) -> Vec<Vec<Value>> {
        let header = self.header.iter().map(|h| Value::from(h.as_str())).collect();
        std::iter::once(header).chain(self.rows.iter().cloned()).collect()
    }
}

/// Build the export grid for `records` through `columns`.
///
/// Records are written in the order given. Each cell comes from the column's
/// text function, else its accessor. A cell neither can produce is written as
/// [`Value::Null`] (an empty cell) so one bad column never blocks the rest of
/// the export.
///
/// # Example
///
/// ```
/// use datagrid_lib::column::Column;
/// use datagrid_lib::export::export_grid;
/// use datagrid_lib::model::{Record, Value};
///
/// let columns = vec![Column::field("Name", "Name"), Column::field("Age", "Age")];
/// let records = vec![Record::new().set("Name", "A").set("Age", 1i64)];
///
/// let grid = export_grid(&records, &columns.iter().collect::<Vec<_>>());
/// assert_eq!(
///     grid.to_rows(),
///     vec![
///         vec![Value::from("Name"), Value::from("Age")],
///         vec![Value::from("A"), Value::from(1i64)],
///     ]
/// );
/// ```
pub fn export_grid<'a, R: 'a>(
    records: impl IntoIterator<Item = &'a R>,
    columns: &[&Column<R>],
) -> Grid {
    let header = columns.iter().map(|c| c.header().to_string()).collect();

    let mut placeholders = vec![0usize; columns.len()];
    let rows = records
        .into_iter()
        .map(|record| {
            columns
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    column.export_value(record).unwrap_or_else(|| {
                        placeholders[i] += 1;
                        Value::Null
                    })
                })
                .collect()
        })
        .collect();

    for (column, count) in columns.iter().zip(&placeholders) {
        if *count > 0 {
            warn!(
                "Export column '{}' produced {} empty placeholder cells",
                column.id(),
                count
            );
        }
    }

    Grid { header, rows }
}

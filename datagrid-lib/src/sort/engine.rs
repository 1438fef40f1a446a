//! Stable single-key sort over records.

use log::trace;

use super::Direction;
use super::SortDescriptor;
use crate::column::ColumnModel;
use crate::model::Value;

/// Order records by the descriptor's column.
///
/// Returns references in the new order; the records themselves are never
/// touched. The sort is stable, so records with equal keys keep their input
/// order in both directions. With no active key, or a key the column model
/// would not accept as a sort target, the input order comes back unchanged.
///
/// Keys are extracted once per record through the column accessor. Records
/// the accessor cannot read sort as [`Value::Null`], i.e. first when
/// ascending.
///
/// # Example
///
/// ```
/// use datagrid_lib::column::{Column, ColumnModel};
/// use datagrid_lib::model::Record;
/// use datagrid_lib::sort::{SortDescriptor, sort_records};
///
/// let columns = ColumnModel::new(vec![Column::field("age", "Age")]).unwrap();
/// let records = vec![
///     Record::new().set("age", 40i64),
///     Record::new().set("age", 25i64),
/// ];
///
/// let sorted = sort_records(&records, &SortDescriptor::asc("age"), &columns);
/// assert_eq!(sorted[0].get_i64("age"), Some(25));
/// ```
pub fn sort_records<'a, R>(
    records: &'a [R],
    descriptor: &SortDescriptor,
    columns: &ColumnModel<R>,
) -> Vec<&'a R> {
    let column = match descriptor.column_id() {
        Some(id) => match columns.sort_target(id) {
            Ok(column) => column,
            Err(e) => {
                trace!("Ignoring sort descriptor: {}", e);
                return records.iter().collect();
            }
        },
        None => return records.iter().collect(),
    };

    let mut keyed: Vec<(Value, &R)> = records
        .iter()
        .map(|record| (column.value(record).unwrap_or_default(), record))
        .collect();

    // slice::sort_by is stable
    match descriptor.direction() {
        Direction::Asc => keyed.sort_by(|a, b| a.0.compare(&b.0)),
        Direction::Desc => keyed.sort_by(|a, b| b.0.compare(&a.0)),
    }

    trace!(
        "Sorted {} records by '{}' {:?}",
        keyed.len(),
        column.id(),
        descriptor.direction()
    );
    keyed.into_iter().map(|(_, record)| record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use crate::model::Record;

    fn columns() -> ColumnModel<Record> {
        ColumnModel::new(vec![
            Column::field("name", "Name"),
            Column::field("age", "Age"),
            Column::field("hidden", "Hidden").hidden(),
        ])
        .unwrap()
    }

    fn records() -> Vec<Record> {
        vec![
            Record::new().set("name", "c").set("age", 30i64),
            Record::new().set("name", "a").set("age", 25i64),
            Record::new().set("name", "d").set("age", 30i64),
            Record::new().set("name", "b"),
        ]
    }

    fn names(sorted: &[&Record]) -> Vec<String> {
        sorted
            .iter()
            .map(|r| r.get_string("name").unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_no_descriptor_is_identity() {
        let records = records();
        let sorted = sort_records(&records, &SortDescriptor::none(), &columns());
        assert_eq!(names(&sorted), vec!["c", "a", "d", "b"]);
    }

    #[test]
    fn test_ascending_is_stable_and_nulls_first() {
        let records = records();
        let sorted = sort_records(&records, &SortDescriptor::asc("age"), &columns());
        assert_eq!(names(&sorted), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_descending_keeps_ties_in_input_order() {
        let records = records();
        let sorted = sort_records(&records, &SortDescriptor::desc("age"), &columns());
        assert_eq!(names(&sorted), vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn test_hidden_column_is_ignored() {
        let records = records();
        let sorted = sort_records(&records, &SortDescriptor::asc("hidden"), &columns());
        assert_eq!(names(&sorted), vec!["c", "a", "d", "b"]);
    }
}

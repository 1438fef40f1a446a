//! Column schema and visibility.
//!
//! A [`Column`] says how to read one value out of a record; a
//! [`ColumnModel`] holds the schema in order and owns visibility.
//!
//! # Example
//!
//! ```
//! use datagrid_lib::column::{Column, ColumnModel};
//! use datagrid_lib::model::Record;
//!
//! let mut columns = ColumnModel::new(vec![
//!     Column::field("firstName", "First Name"),
//!     Column::field("age", "Age"),
//! ])
//! .unwrap();
//!
//! columns.set_visible("age", false).unwrap();
//! assert!(columns.set_visible("firstName", false).is_err());
//! ```

mod item;
mod model;

pub use item::{Accessor, Alignment, Column};
pub use model::ColumnModel;

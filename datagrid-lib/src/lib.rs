//! Tabular data engine
//!
//! A synchronous engine behind an interactive data grid. Given a column schema
//! and a collection of records it derives a presentable view (sorted,
//! paginated, restricted to visible columns, annotated with row selection) and
//! serializes the dataset into a rectangular grid for spreadsheet export.
//!
//! The engine never renders, never fetches and never registers listeners. A
//! controller calls into [`DataTable`] (or the individual engines) from its own
//! event handlers and renders whatever view comes back.

pub mod column;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod page;
pub mod remote;
pub mod selection;
pub mod sort;

mod table;

pub use config::TableConfig;
pub use table::*;

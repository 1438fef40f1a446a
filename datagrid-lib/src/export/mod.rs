//! Spreadsheet export.
//!
//! [`export_grid`] projects records through the visible columns into a
//! [`Grid`]; a [`TableWriter`] encodes the resulting [`ExportJob`].

mod grid;
mod job;
mod writer;

pub use grid::{Grid, export_grid};
pub use job::ExportJob;
pub use writer::{CsvWriter, JsonWriter, TableWriter};

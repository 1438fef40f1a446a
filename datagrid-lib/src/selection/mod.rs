//! Row selection.
//!
//! [`Selection`] is the raw id set; [`SelectionEngine`] applies a
//! [`RowIdentity`] strategy to records and answers the questions a renderer
//! asks (is this row selected, is everything selected).

mod engine;
mod set;

pub use engine::{RowIdentity, SelectionEngine, ToggleAllState};
pub use set::Selection;

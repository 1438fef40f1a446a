//! Single-column sorting.
//!
//! [`SortDescriptor`] holds the active key and cycles on toggle;
//! [`sort_records`] applies it as a stable sort.

mod engine;
mod order;

pub use engine::sort_records;
pub use order::{Direction, SortDescriptor, SortIndicator};

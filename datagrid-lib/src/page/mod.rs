//! Pagination.
//!
//! [`PageState`] tracks which page is showing and clamps every navigation
//! request; [`PageView`] is the derived slice handed to the renderer.

mod state;
mod view;

pub use state::{PageSizePolicy, PageState};
pub use view::PageView;

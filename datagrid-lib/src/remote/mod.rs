//! Caller-side helpers for server-paged tables.
//!
//! The core engine has no notion of fetching. These types sit at the edge:
//! a [`PageSource`] produces pages, a [`PageCache`] remembers them and a
//! [`PageLoader`] ties both together with a generation check so stale
//! results are never applied.

mod cache;
mod loader;
mod page;
mod source;

pub use cache::{CacheConfig, CachedPage, PageCache};
pub use loader::{LoadOutcome, LoadTicket, PageLoader};
pub use page::{FetchedPage, PageRequest};
pub use source::{PageSource, VecSource};

//! Error types

mod column;
mod config;
mod export;
mod fetch;

pub use column::*;
pub use config::*;
pub use export::*;
pub use fetch::*;

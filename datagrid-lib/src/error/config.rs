//! Configuration errors

use std::path::PathBuf;

/// Errors raised while loading or validating a [`TableConfig`](crate::TableConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has the wrong shape.
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Page size must be a positive integer.
    #[error("Invalid page size {0}: must be greater than zero")]
    InvalidPageSize(usize),

    /// The column definitions do not form a valid schema.
    #[error("Invalid column schema: {0}")]
    Schema(#[from] super::ColumnError),
}

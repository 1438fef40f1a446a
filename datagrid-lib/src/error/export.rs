//! Export errors

/// Errors raised by a [`TableWriter`](crate::export::TableWriter).
///
/// Building the grid itself never fails; only the encoding and the write to
/// the destination can.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

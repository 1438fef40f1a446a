//! One-shot export job.

use super::Grid;

/// A grid plus the title used to name the exported file.
///
/// Jobs are built, handed to a [`TableWriter`](super::TableWriter) and
/// dropped; nothing about them is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportJob {
    pub title: String,
    pub grid: Grid,
}

impl ExportJob {
    pub fn new(title: impl Into<String>, grid: Grid) -> Self {
        Self {
            title: title.into(),
            grid,
        }
    }

    /// File name without extension: `<title>_EXPORT`.
    ///
    /// Path separators and other characters that are unsafe in file names
    /// are replaced with `_`. An empty title yields plain `EXPORT`.
    pub fn file_stem(&self) -> String {
        let title: String = self
            .title
            .trim()
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        if title.is_empty() {
            "EXPORT".to_string()
        } else {
            format!("{title}_EXPORT")
        }
    }

    /// File name with the given extension.
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.file_stem(), extension)
    }
}

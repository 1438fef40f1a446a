//! Tabular file writers.

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use log::debug;

use super::ExportJob;
use crate::error::ExportError;

/// Encodes an [`ExportJob`] into bytes.
///
/// The engine only produces the grid; a writer owns the file format and the
/// destination.
pub trait TableWriter {
    /// File extension, without the dot.
    fn extension(&self) -> &'static str;

    /// Encode the job into `out`.
    fn write(&self, job: &ExportJob, out: &mut dyn Write) -> Result<(), ExportError>;

    /// Write the job into `dir` as `<title>_EXPORT.<extension>`.
    ///
    /// Returns the path written.
    fn write_to_dir(&self, job: &ExportJob, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(job.file_name(self.extension()));
        let mut out = BufWriter::new(File::create(&path)?);
        self.write(job, &mut out)?;
        out.flush()?;
        debug!(
            "Exported {} rows x {} columns to {}",
            job.grid.height(),
            job.grid.width(),
            path.display()
        );
        Ok(path)
    }
}

/// Comma-separated values, header row first.
#[derive(Debug, Clone, Copy)]
pub struct CsvWriter {
    delimiter: u8,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use another field delimiter, e.g. `b'\t'`.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl TableWriter for CsvWriter {
    fn extension(&self) -> &'static str {
        if self.delimiter == b'\t' { "tsv" } else { "csv" }
    }

    fn write(&self, job: &ExportJob, out: &mut dyn Write) -> Result<(), ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(out);
        writer.write_record(&job.grid.header)?;
        for row in &job.grid.rows {
            writer.write_record(row.iter().map(|cell| cell.to_text()))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// JSON array of rows, header row first. Cells keep their JSON types.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter {
    pretty: bool,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

impl TableWriter for JsonWriter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn write(&self, job: &ExportJob, out: &mut dyn Write) -> Result<(), ExportError> {
        let rows = job.grid.to_rows();
        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, &rows)?;
        } else {
            serde_json::to_writer(&mut *out, &rows)?;
        }
        Ok(())
    }
}

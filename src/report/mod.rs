//! # Report Sink
//!
//! Persistence of [`PatientSummary`] records as JSON.
//!
//! [`JsonSink`] writes to any [`Write`] target. [`JsonFileSink`] writes through a
//! temporary file in the destination directory and renames it into place, so a
//! failed run never leaves a truncated report behind.

mod error;

pub use error::ReportError;

use log::debug;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::metrics::PatientSummary;

/// Destination for analysis summaries
pub trait ReportSink {
    /// Write one summary
    fn write_summary(&mut self, summary: &PatientSummary) -> Result<(), ReportError>;
}

/// Writes summaries as JSON to a [`Write`] target
pub struct JsonSink<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonSink<W> {
    /// Compact JSON, one document per summary
    pub fn new(writer: W) -> Self {
        Self { writer, pretty: false }
    }

    /// Indented JSON
    pub fn pretty(writer: W) -> Self {
        Self { writer, pretty: true }
    }

    /// Return the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn write_summary(&mut self, summary: &PatientSummary) -> Result<(), ReportError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, summary)?;
        } else {
            serde_json::to_writer(&mut self.writer, summary)?;
        }
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes each summary to a file, replacing it atomically
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    /// Sink targeting `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Destination path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for JsonFileSink {
    fn write_summary(&mut self, summary: &PatientSummary) -> Result<(), ReportError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let temp_file = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(temp_file.as_file());
            serde_json::to_writer(&mut writer, summary)?;
            writer.flush()?;
        }
        temp_file.persist(&self.path)?;

        debug!("Wrote summary to {}", self.path.display());
        Ok(())
    }
}

/// Default report path for an input recording: same stem, `.json` extension
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("json")
}

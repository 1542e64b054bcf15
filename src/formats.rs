//! Output writers: a JSON array or JSON Lines, to a file or any writer.

use crate::model::Harvested;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Output format selector for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One pretty-printed JSON array.
    Json,
    /// One compact JSON object per line.
    JsonLines,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::JsonLines => "jsonl",
        }
    }
}

/// Errors from the output writers.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Failed to write output: {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write `records` to `out` in `format`.
pub fn write_records<W: Write>(
    records: &[Harvested],
    format: OutputFormat,
    mut out: W,
) -> Result<(), FormatError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, records)?;
            writeln!(out)?;
        }
        OutputFormat::JsonLines => {
            for record in records {
                serde_json::to_writer(&mut out, record)?;
                writeln!(out)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write `records` to it.
pub fn write_records_to_path(
    records: &[Harvested],
    format: OutputFormat,
    path: &Path,
) -> Result<(), FormatError> {
    let f = File::create(path).map_err(|e| FormatError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_records(records, format, BufWriter::new(f))
}

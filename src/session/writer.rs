//! CSV row writer
//!
//! Writes the `x,y,z` header on creation and one `\r\n`-terminated row per
//! reading, flushing after every row so a killed process loses at most the
//! line in flight.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, ResultExt};
use crate::types::{Reading, CSV_HEADER, ROW_TERMINATOR};

/// Row writer over any byte sink
pub struct CsvRowWriter<W: Write> {
    inner: W,
    rows_written: u64,
}

impl CsvRowWriter<BufWriter<File>> {
    /// Create (or truncate) the output file, creating missing parent directories
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create output directory {:?}", parent))?;
            }
        }

        let file = File::create(path)
            .with_context(|| format!("Failed to create output file {:?}", path))?;
        tracing::info!("Writing readings to {:?}", path);

        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> CsvRowWriter<W> {
    /// Wrap a sink and write the header
    pub fn new(mut inner: W) -> Result<Self> {
        write!(inner, "{}{}", CSV_HEADER, ROW_TERMINATOR)?;
        inner.flush()?;
        Ok(Self {
            inner,
            rows_written: 0,
        })
    }

    /// Append one reading and flush
    pub fn write_reading(&mut self, reading: &Reading) -> Result<()> {
        write!(self.inner, "{}{}", reading.to_csv_row(), ROW_TERMINATOR)?;
        self.inner.flush()?;
        self.rows_written += 1;
        Ok(())
    }

    /// Data rows written so far (header excluded)
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Flush any buffered bytes
    pub fn flush(&mut self) -> Result<()> {
        Ok(self.inner.flush()?)
    }

    /// Unwrap the sink
    pub fn into_inner(self) -> W {
        self.inner
    }
}

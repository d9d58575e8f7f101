//! Backend module for device input
//!
//! The acquisition loop reads lines through the [`LineSource`] trait, so the
//! same loop runs against a serial device or a captured text file.
//!
//! # Components
//!
//! - [`LineSource`] - Blocking line reads with timeout/end-of-stream outcomes
//! - [`ReaderSource`] - Line splitter over any `std::io::Read`
//! - [`SerialLineSource`] - Serial port input via the `serialport` crate
//! - [`list_ports`] - Enumerate available serial ports
//!
//! # Example
//!
//! ```ignore
//! use imulog::backend::{LineRead, LineSource, SerialLineSource};
//! use imulog::config::AcquisitionConfig;
//!
//! let config = AcquisitionConfig::default();
//! let mut source = SerialLineSource::open(&config)?;
//!
//! while let LineRead::Line(bytes) = source.read_line()? {
//!     println!("{}", String::from_utf8_lossy(&bytes));
//! }
//! ```

pub mod reader_source;
pub mod serial;
pub mod source_trait;

pub use reader_source::ReaderSource;
pub use serial::{list_ports, DetectedPort, SerialLineSource};
pub use source_trait::{LineRead, LineSource, SourceStats};

#[cfg(test)]
pub use source_trait::MockLineSource;

use crate::error::{Result, ResultExt};
use std::fs::File;
use std::path::Path;

/// Open a captured text file as a line source
pub fn open_replay(path: impl AsRef<Path>) -> Result<ReaderSource<File>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open replay file {:?}", path))?;
    tracing::info!("Replaying device output from {:?}", path);
    Ok(ReaderSource::new(path.display().to_string(), file))
}

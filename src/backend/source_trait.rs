//! LineSource trait for unified line input
//!
//! This module provides a common trait for everything the acquisition loop can
//! read device lines from: a real serial port, or a captured text stream for
//! replay and tests.

use crate::error::Result;

/// Result of one blocking line read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRead {
    /// Raw bytes of one line, terminator included when present
    Line(Vec<u8>),
    /// No complete line arrived within the read timeout
    TimedOut,
    /// The stream ended (device gone or capture exhausted)
    EndOfStream,
}

/// Statistics for line reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceStats {
    /// Complete lines delivered
    pub lines_received: u64,
    /// Bytes delivered, terminators included
    pub bytes_received: u64,
    /// Reads that timed out
    pub timeouts: u64,
}

impl SourceStats {
    /// Record a delivered line
    pub fn record_line(&mut self, bytes: usize) {
        self.lines_received += 1;
        self.bytes_received += bytes as u64;
    }

    /// Record a read timeout
    pub fn record_timeout(&mut self) {
        self.timeouts += 1;
    }
}

/// Unified interface for line-oriented device input
///
/// Implementations must be `Send` so a source can be moved to another thread
/// if a caller wants to.
#[cfg_attr(test, mockall::automock)]
pub trait LineSource: Send {
    /// Block until one line, a timeout, or end of stream
    ///
    /// Partial data received before a timeout is kept and completed by the
    /// next call. I/O errors other than timeouts are returned as errors.
    fn read_line(&mut self) -> Result<LineRead>;

    /// Human readable name of the source (port name or file path)
    fn name(&self) -> String;

    /// Get read statistics
    fn stats(&self) -> SourceStats;
}

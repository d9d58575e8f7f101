//! Console progress lines
//!
//! These are the user-facing lines printed on stdout during a run. Diagnostic
//! logging goes through `tracing` to stderr and is separate from this.

use std::fmt::Display;
use std::io::Write;

use crate::error::Result;
use crate::types::Reading;

/// Writes the run's progress lines to a sink (stdout in the binary)
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn started(&mut self, source: &str) -> Result<()> {
        writeln!(self.out, "Logging data from {}...", source)?;
        Ok(())
    }

    pub fn logged(&mut self, reading: &Reading) -> Result<()> {
        writeln!(self.out, "Logged: {}", reading)?;
        Ok(())
    }

    pub fn skipped(&mut self, line: &str, error: &impl Display) -> Result<()> {
        writeln!(self.out, "Skipping invalid line: {} ({})", line, error)?;
        Ok(())
    }

    pub fn completed(&mut self) -> Result<()> {
        writeln!(self.out, "Logging completed.")?;
        self.out.flush()?;
        Ok(())
    }

    /// Unwrap the sink
    pub fn into_inner(self) -> W {
        self.out
    }
}

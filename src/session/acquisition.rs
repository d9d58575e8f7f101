//! The acquisition loop
//!
//! One [`AcquisitionSession`] owns a line source, the CSV writer and the
//! console for the length of a run. Each received line is classified and
//! either written as a row, reported as skipped, or ignored when blank. The
//! elapsed time is checked before every read, so a run lasts the configured
//! duration plus however long the next line takes to arrive.
//!
//! Dropping the session closes the port and the output file, whether the
//! run completed, failed, or never started.

use std::fs::File;
use std::io::{BufWriter, Stdout, Write};
use std::time::Instant;

use crate::backend::{LineRead, LineSource, ReaderSource, SerialLineSource};
use crate::config::{AcquisitionConfig, StallPolicy};
use crate::error::{LoggerError, Result};
use crate::parser::{classify, LineOutcome};

use super::console::ConsoleReporter;
use super::types::{SessionState, SessionSummary, StopReason};
use super::writer::CsvRowWriter;

/// Session reading from the serial port into a CSV file
pub type SerialSession = AcquisitionSession<SerialLineSource, BufWriter<File>, Stdout>;

/// Session replaying a captured file into a CSV file
pub type ReplaySession = AcquisitionSession<ReaderSource<File>, BufWriter<File>, Stdout>;

/// A single acquisition run
pub struct AcquisitionSession<S: LineSource, W: Write, C: Write> {
    config: AcquisitionConfig,
    source: S,
    writer: CsvRowWriter<W>,
    console: ConsoleReporter<C>,
    state: SessionState,
    skipped: u64,
    empty: u64,
}

impl SerialSession {
    /// Open the serial port, then the output file
    ///
    /// Either failure is fatal. If the file cannot be created the port is
    /// closed again before the error is returned.
    pub fn open(config: AcquisitionConfig) -> Result<Self> {
        config.validate()?;
        let source = SerialLineSource::open(&config)?;
        Self::with_source(config, source)
    }
}

impl<S: LineSource> AcquisitionSession<S, BufWriter<File>, Stdout> {
    /// Create the output file for an already open source and report to stdout
    pub fn with_source(config: AcquisitionConfig, source: S) -> Result<Self> {
        config.validate()?;
        let writer = CsvRowWriter::create(&config.output_path)?;
        Ok(Self::new(
            config,
            source,
            writer,
            ConsoleReporter::new(std::io::stdout()),
        ))
    }
}

impl<S: LineSource, W: Write, C: Write> AcquisitionSession<S, W, C> {
    /// Assemble a session from already open parts
    pub fn new(
        config: AcquisitionConfig,
        source: S,
        writer: CsvRowWriter<W>,
        console: ConsoleReporter<C>,
    ) -> Self {
        Self {
            config,
            source,
            writer,
            console,
            state: SessionState::Running,
            skipped: 0,
            empty: 0,
        }
    }

    /// Get current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run until the duration elapses or the stream ends
    ///
    /// I/O errors from the source, the file or the console abort the run.
    pub fn run(&mut self) -> Result<SessionSummary> {
        let duration = self.config.duration();
        let source_name = self.source.name();

        self.console.started(&source_name)?;
        tracing::info!(
            source = %source_name,
            duration = ?duration,
            stall_policy = self.config.stall_policy.display_name(),
            "Acquisition started"
        );

        let started_at = chrono::Utc::now();
        let start = Instant::now();

        let stop_reason = loop {
            if start.elapsed() > duration {
                break StopReason::DurationElapsed;
            }

            match self.source.read_line()? {
                LineRead::Line(bytes) => self.handle_line(&bytes)?,
                LineRead::TimedOut => self.handle_timeout()?,
                LineRead::EndOfStream => {
                    tracing::info!("{} reached end of input", source_name);
                    break StopReason::EndOfStream;
                }
            }
        };

        self.writer.flush()?;
        self.state = SessionState::Done;
        self.console.completed()?;

        let summary = SessionSummary {
            source: source_name,
            started_at,
            elapsed: start.elapsed(),
            rows_written: self.writer.rows_written(),
            lines_skipped: self.skipped,
            empty_lines: self.empty,
            timeouts: self.source.stats().timeouts,
            bytes_received: self.source.stats().bytes_received,
            stop_reason,
        };

        tracing::info!(
            state = self.state.display_name(),
            lines = summary.lines_processed(),
            rows = summary.rows_written,
            skipped = summary.lines_skipped,
            elapsed = ?summary.elapsed,
            reason = ?summary.stop_reason,
            "Acquisition finished"
        );

        Ok(summary)
    }

    fn handle_line(&mut self, bytes: &[u8]) -> Result<()> {
        match classify(bytes) {
            LineOutcome::Empty => {
                self.empty += 1;
            }
            LineOutcome::Reading(reading) => {
                self.writer.write_reading(&reading)?;
                self.console.logged(&reading)?;
            }
            LineOutcome::Invalid { line, error } => {
                self.skipped += 1;
                tracing::debug!(kind = error.kind(), "Rejected line {:?}", line);
                self.console.skipped(&line, &error)?;
            }
        }
        Ok(())
    }

    fn handle_timeout(&mut self) -> Result<()> {
        // Without a configured timeout the driver's day-long timeout just restarts
        let Some(waited) = self.config.read_timeout() else {
            tracing::debug!("Read timeout with no timeout configured, still waiting");
            return Ok(());
        };

        match self.config.stall_policy {
            StallPolicy::Wait => {
                tracing::warn!("No data from {} for {:?}", self.source.name(), waited);
                Ok(())
            }
            StallPolicy::Abort => Err(LoggerError::Stalled { waited }),
        }
    }

    /// Tear the session down into its parts
    pub fn into_parts(self) -> (S, CsvRowWriter<W>, ConsoleReporter<C>) {
        (self.source, self.writer, self.console)
    }
}

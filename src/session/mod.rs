//! Acquisition session module
//!
//! This module owns a run from start to finish: reading lines from a source,
//! writing readings to CSV, printing progress, and summarising the run.
//!
//! # Features
//!
//! - Timed acquisition with the duration re-checked before every read
//! - Per-line skip on malformed input, with the reason reported
//! - Row-by-row flushed CSV output with an `x,y,z` header
//! - Optional JSON summary saved next to the CSV

pub mod acquisition;
pub mod console;
pub mod types;
pub mod writer;

pub use acquisition::{AcquisitionSession, ReplaySession, SerialSession};
pub use console::ConsoleReporter;
pub use types::{SessionReport, SessionState, SessionSummary, StopReason};
pub use writer::CsvRowWriter;

//! Session data types

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::config::AcquisitionConfig;
use crate::error::{LoggerError, Result};

/// State of an acquisition session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// Reading, parsing and writing lines
    #[default]
    Running,
    /// Run finished, resources released
    Done,
}

impl SessionState {
    /// Check if still running
    pub fn is_running(&self) -> bool {
        matches!(self, SessionState::Running)
    }

    /// Display name for the state
    pub fn display_name(&self) -> &'static str {
        match self {
            SessionState::Running => "Running",
            SessionState::Done => "Done",
        }
    }
}

/// Why a session ended normally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The configured duration elapsed
    DurationElapsed,
    /// A replayed capture ran out of lines
    EndOfStream,
}

/// Counters collected over one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Port name or replay file
    pub source: String,
    /// Wall-clock start of the loop
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// Time spent in the loop
    pub elapsed: Duration,
    /// Data rows written (header excluded)
    pub rows_written: u64,
    /// Lines rejected with a skip message
    pub lines_skipped: u64,
    /// Blank lines ignored
    pub empty_lines: u64,
    /// Read timeouts seen
    pub timeouts: u64,
    /// Raw bytes received from the source
    pub bytes_received: u64,
    /// How the run ended
    pub stop_reason: StopReason,
}

impl SessionSummary {
    /// Lines that produced either a row or a skip message
    pub fn lines_processed(&self) -> u64 {
        self.rows_written + self.lines_skipped
    }
}

/// Summary plus the configuration it ran with, saved next to the CSV
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub config: AcquisitionConfig,
    pub summary: SessionSummary,
}

impl SessionReport {
    pub fn new(config: AcquisitionConfig, summary: SessionSummary) -> Self {
        Self { config, summary }
    }

    /// Save report to a file (JSON format)
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LoggerError::Serialization(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load report from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| LoggerError::Serialization(e.to_string()))
    }
}

//! Run-time behaviour knobs and command line overrides
//!
//! # Main Types
//!
//! - [`StallPolicy`] - What to do when the device stays silent past the read timeout
//! - [`ConfigOverrides`] - Values supplied on the command line, layered over the config file

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Serial timeout used when no read timeout is configured.
///
/// The driver needs a finite value; a timeout this long is retried silently,
/// so in practice the loop waits for the next line forever.
pub const INDEFINITE_READ_TIMEOUT: Duration = Duration::from_secs(60 * 60 * 24);

/// Reaction to a read timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StallPolicy {
    /// Log a heartbeat warning and keep waiting (the duration check still runs)
    #[default]
    Wait,
    /// End the run with [`crate::error::LoggerError::Stalled`]
    Abort,
}

impl StallPolicy {
    /// Display name for the policy
    pub fn display_name(&self) -> &'static str {
        match self {
            StallPolicy::Wait => "wait",
            StallPolicy::Abort => "abort",
        }
    }
}

/// Values given on the command line; `None` leaves the lower layer untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub port: Option<String>,
    pub baud_rate: Option<u32>,
    pub output_path: Option<PathBuf>,
    pub duration_seconds: Option<f64>,
    pub read_timeout_ms: Option<u64>,
    pub stall_policy: Option<StallPolicy>,
    pub write_summary: bool,
}

impl ConfigOverrides {
    /// Check whether any override is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

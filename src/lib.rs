//! # imulog: serial accelerometer logger
//!
//! Reads `X: <x> Y: <y> Z: <z>` lines from a serial device and records the
//! readings to a CSV file for a fixed wall-clock duration.
//!
//! ## Architecture
//!
//! - **Backend**: line sources (serial port via `serialport`, or a replay file)
//! - **Parser**: turns one raw line into a reading or a typed rejection
//! - **Session**: the timed acquisition loop, CSV writer and console output
//! - **Config**: defaults, TOML config file and command line overrides
//!
//! ## Example
//!
//! ```ignore
//! use imulog::{AcquisitionConfig, SerialSession};
//!
//! let config = AcquisitionConfig {
//!     port: "/dev/ttyUSB0".to_string(),
//!     duration_seconds: 60.0,
//!     ..Default::default()
//! };
//!
//! let mut session = SerialSession::open(config)?;
//! let summary = session.run()?;
//! println!("{} rows written", summary.rows_written);
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod parser;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use backend::{LineRead, LineSource, ReaderSource, SerialLineSource};
pub use config::{AcquisitionConfig, ConfigOverrides, StallPolicy};
pub use error::{LineError, LoggerError, Result};
pub use parser::{classify, parse_line, LineOutcome};
pub use session::{AcquisitionSession, SessionState, SessionSummary, SerialSession, StopReason};
pub use types::Reading;

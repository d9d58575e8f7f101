//! Error handling for imulog
//!
//! Two tiers of errors exist:
//!
//! - [`LoggerError`] is fatal. Failing to open the port or the output file,
//!   an I/O error mid-run, or a stall under [`crate::config::StallPolicy::Abort`]
//!   all end the run.
//! - [`LineError`] is recoverable. It describes why a single input line could
//!   not be turned into a reading; the acquisition loop reports it and moves on.

use std::num::ParseFloatError;
use std::time::Duration;
use thiserror::Error;

/// Main error type for imulog operations
#[derive(Error, Debug)]
pub enum LoggerError {
    /// Errors raised while opening or configuring the serial port
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// Errors related to configuration loading/validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed configuration file
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The device produced no line within the read timeout
    #[error("No data received from device for {waited:?}")]
    Stalled { waited: Duration },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<LoggerError>,
    },
}

impl LoggerError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        LoggerError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for imulog operations
pub type Result<T> = std::result::Result<T, LoggerError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<LoggerError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}

/// Reason a single input line was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineError {
    /// The line is not valid UTF-8
    #[error("invalid UTF-8 at byte {valid_up_to}")]
    Decode { valid_up_to: usize },

    /// Fewer tokens than the x/y/z layout needs
    #[error("expected at least 6 tokens, found {found}")]
    TokenCount { found: usize },

    /// A value token is not a number
    #[error("could not parse token {position} ({token:?}) as a number: {source}")]
    NumericParse {
        position: usize,
        token: String,
        #[source]
        source: ParseFloatError,
    },
}

impl LineError {
    /// Short name of the failure kind, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            LineError::Decode { .. } => "decode",
            LineError::TokenCount { .. } => "token_count",
            LineError::NumericParse { .. } => "numeric_parse",
        }
    }
}

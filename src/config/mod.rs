//! Configuration module for imulog
//!
//! An [`AcquisitionConfig`] is assembled once at process start and handed to
//! the acquisition session. Values are layered, lowest precedence first:
//!
//! 1. Built-in defaults ([`AcquisitionConfig::default`])
//! 2. A TOML config file (explicit `--config`, otherwise the per-user file if present)
//! 3. Command line overrides ([`ConfigOverrides`])
//!
//! # Config File Location
//!
//! The per-user config file lives in the platform config directory:
//! - **Linux**: `~/.config/imulog/config.toml`
//! - **macOS**: `~/Library/Application Support/imulog/config.toml`
//! - **Windows**: `%APPDATA%\imulog\config.toml`
//!
//! # Example
//!
//! ```toml
//! port = "/dev/ttyACM0"
//! baud_rate = 115200
//! output_path = "./run1.csv"
//! duration_seconds = 60.0
//! read_timeout_ms = 2000
//! stall_policy = "abort"
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application identifier for config directories
pub const APP_ID: &str = "imulog";

/// Config filename inside the app config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Default serial port
pub const DEFAULT_PORT: &str = "COM9";

/// Default baud rate
pub const DEFAULT_BAUD_RATE: u32 = 1_000_000;

/// Default CSV output path
pub const DEFAULT_OUTPUT_PATH: &str = "./IMUDatasets/InnerRail_4_16G.csv";

/// Default run length (15 minutes)
pub const DEFAULT_DURATION_SECONDS: f64 = 15.0 * 60.0;

/// Path of the per-user config file, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID).join(CONFIG_FILE))
}

/// Everything a run needs to know
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionConfig {
    /// Serial device identifier (`COM9`, `/dev/ttyUSB0`, ...)
    pub port: String,

    /// Serial baud rate
    pub baud_rate: u32,

    /// CSV file to create
    pub output_path: PathBuf,

    /// Wall-clock budget for the run, in seconds
    pub duration_seconds: f64,

    /// Per-read timeout; `None` waits indefinitely for the next line
    pub read_timeout_ms: Option<u64>,

    /// What a read timeout does to the run
    pub stall_policy: StallPolicy,

    /// Write `<output>.session.json` after a completed run
    pub write_summary: bool,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            duration_seconds: DEFAULT_DURATION_SECONDS,
            read_timeout_ms: None,
            stall_policy: StallPolicy::default(),
            write_summary: false,
        }
    }
}

impl AcquisitionConfig {
    /// Load a config file from disk
    ///
    /// Missing keys fall back to their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| LoggerError::from(e).with_context(format!("{:?}", path)))?;
        Ok(config)
    }

    /// Load the per-user config file if it exists, defaults otherwise
    pub fn load_user_or_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => {
                tracing::debug!("Loading user config from {:?}", path);
                Self::load(path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Save the config as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    LoggerError::Config(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| LoggerError::Serialization(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| {
            LoggerError::Config(format!("Failed to write config file {:?}: {}", path, e))
        })
    }

    /// Apply command line overrides on top of this config
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(ref port) = overrides.port {
            self.port = port.clone();
        }
        if let Some(baud_rate) = overrides.baud_rate {
            self.baud_rate = baud_rate;
        }
        if let Some(ref output_path) = overrides.output_path {
            self.output_path = output_path.clone();
        }
        if let Some(duration_seconds) = overrides.duration_seconds {
            self.duration_seconds = duration_seconds;
        }
        if let Some(read_timeout_ms) = overrides.read_timeout_ms {
            self.read_timeout_ms = Some(read_timeout_ms);
        }
        if let Some(stall_policy) = overrides.stall_policy {
            self.stall_policy = stall_policy;
        }
        if overrides.write_summary {
            self.write_summary = true;
        }
        self
    }

    /// Check the values a run cannot start without
    pub fn validate(&self) -> Result<()> {
        if self.port.trim().is_empty() {
            return Err(LoggerError::Config("port must not be empty".to_string()));
        }
        if self.baud_rate == 0 {
            return Err(LoggerError::Config(
                "baud rate must be positive".to_string(),
            ));
        }
        if !self.duration_seconds.is_finite() || self.duration_seconds <= 0.0 {
            return Err(LoggerError::Config(format!(
                "duration must be a positive number of seconds, got {}",
                self.duration_seconds
            )));
        }
        if Duration::try_from_secs_f64(self.duration_seconds).is_err() {
            return Err(LoggerError::Config(format!(
                "duration of {} seconds is too long",
                self.duration_seconds
            )));
        }
        if self.read_timeout_ms == Some(0) {
            return Err(LoggerError::Config(
                "read timeout must be at least 1 ms".to_string(),
            ));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(LoggerError::Config(
                "output path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Run length as a [`Duration`]
    ///
    /// Only meaningful after [`validate`](Self::validate) succeeded.
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration_seconds)
    }

    /// Configured read timeout, if any
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }

    /// Timeout handed to the serial driver
    pub fn port_timeout(&self) -> Duration {
        self.read_timeout().unwrap_or(INDEFINITE_READ_TIMEOUT)
    }

    /// Path of the JSON session summary written next to the CSV
    pub fn summary_path(&self) -> PathBuf {
        let mut name = self
            .output_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".session.json");
        self.output_path.with_file_name(name)
    }
}

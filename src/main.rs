//! imulog - Main Entry Point
//!
//! Records x/y/z readings from a serial device into a CSV file for a fixed
//! duration.

use anyhow::Context;
use clap::Parser;
use imulog::{
    backend::{list_ports, open_replay},
    config::{AcquisitionConfig, ConfigOverrides, StallPolicy},
    session::{ReplaySession, SerialSession, SessionReport, SessionSummary},
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Log filter used when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "info,imulog=debug";

#[derive(Parser, Debug)]
#[command(name = "imulog", version, about = "Log accelerometer readings from a serial device to CSV")]
struct Cli {
    /// TOML config file (defaults to the per-user config file if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Serial port, e.g. COM9 or /dev/ttyUSB0
    #[arg(short, long)]
    port: Option<String>,

    /// Serial baud rate
    #[arg(short, long)]
    baud_rate: Option<u32>,

    /// CSV file to write
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Run length in seconds
    #[arg(short, long, value_name = "SECONDS")]
    duration: Option<f64>,

    /// Give up waiting for a line after this many milliseconds
    #[arg(long, value_name = "MS")]
    read_timeout_ms: Option<u64>,

    /// End the run with an error when a read times out
    #[arg(long)]
    abort_on_stall: bool,

    /// Write a JSON session summary next to the CSV
    #[arg(long)]
    summary: bool,

    /// Read device output from a captured text file instead of a serial port
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// List available serial ports and exit
    #[arg(long)]
    list_ports: bool,

    /// Write the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    save_config: Option<PathBuf>,

    /// Also write logs to a daily rotated file in this directory
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            port: self.port.clone(),
            baud_rate: self.baud_rate,
            output_path: self.output.clone(),
            duration_seconds: self.duration,
            read_timeout_ms: self.read_timeout_ms,
            stall_policy: self.abort_on_stall.then_some(StallPolicy::Abort),
            write_summary: self.summary,
        }
    }

    fn load_config(&self) -> imulog::Result<AcquisitionConfig> {
        let base = match self.config {
            Some(ref path) => AcquisitionConfig::load(path)?,
            None => AcquisitionConfig::load_user_or_default()?,
        };

        let overrides = self.overrides();
        if !overrides.is_empty() {
            tracing::debug!(?overrides, "Applying command line overrides");
        }
        Ok(base.with_overrides(&overrides))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for the progress lines
    let (file_layer, _guard) = match cli.log_dir {
        Some(ref dir) => {
            let appender = tracing_appender::rolling::daily(dir, "imulog.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    if let Err(e) = run(&cli) {
        tracing::error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if cli.list_ports {
        let ports = list_ports()?;
        if ports.is_empty() {
            println!("No serial ports found");
        }
        for port in ports {
            println!("{}", port);
        }
        return Ok(());
    }

    let config = cli.load_config().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    if let Some(ref path) = cli.save_config {
        config.save(path)?;
        tracing::info!("Saved configuration to {:?}", path);
        return Ok(());
    }

    tracing::debug!(?config, "Effective configuration");

    let summary = match cli.replay {
        Some(ref path) => {
            let source = open_replay(path)?;
            ReplaySession::with_source(config.clone(), source)?.run()?
        }
        None => SerialSession::open(config.clone())?.run()?,
    };

    if config.write_summary {
        write_summary(&config, summary)?;
    }

    Ok(())
}

fn write_summary(config: &AcquisitionConfig, summary: SessionSummary) -> anyhow::Result<()> {
    let path = config.summary_path();
    SessionReport::new(config.clone(), summary)
        .save(&path)
        .with_context(|| format!("Failed to write session summary {:?}", path))?;
    tracing::info!("Session summary written to {:?}", path);
    Ok(())
}

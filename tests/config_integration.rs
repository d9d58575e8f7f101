//! Integration tests for configuration layering
//!
//! Defaults, config file and command line overrides combine into the config
//! a session runs with.

mod common;

use common::builders::ConfigBuilder;
use imulog::config::{AcquisitionConfig, ConfigOverrides, StallPolicy};
use imulog::LoggerError;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[test]
fn test_file_then_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("imulog.toml");
    std::fs::write(
        &path,
        r#"
        port = "/dev/ttyACM0"
        baud_rate = 115200
        output_path = "bench/run.csv"
        read_timeout_ms = 1500
        "#,
    )
    .unwrap();

    let overrides = ConfigOverrides {
        baud_rate: Some(921_600),
        stall_policy: Some(StallPolicy::Abort),
        ..Default::default()
    };
    let config = AcquisitionConfig::load(&path)
        .unwrap()
        .with_overrides(&overrides);

    assert_eq!(config.port, "/dev/ttyACM0");
    assert_eq!(config.baud_rate, 921_600);
    assert_eq!(config.output_path, PathBuf::from("bench/run.csv"));
    assert_eq!(config.read_timeout(), Some(Duration::from_millis(1500)));
    assert_eq!(config.stall_policy, StallPolicy::Abort);
    // Not in the file, not overridden
    assert_eq!(config.duration_seconds, 900.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_saved_config_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.toml");

    let config = AcquisitionConfig::default().with_overrides(&ConfigOverrides {
        port: Some("COM3".to_string()),
        duration_seconds: Some(12.5),
        write_summary: true,
        ..Default::default()
    });
    config.save(&path).unwrap();

    assert_eq!(AcquisitionConfig::load(&path).unwrap(), config);
}

#[test]
fn test_unknown_stall_policy_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "stall_policy = \"retry\"\n").unwrap();

    let err = AcquisitionConfig::load(&path).unwrap_err();
    assert!(matches!(err, LoggerError::WithContext { .. }));
    assert!(err.to_string().contains("bad.toml"));
}

#[test]
fn test_config_builder_produces_valid_config() {
    let config = ConfigBuilder::new(Path::new("/tmp/x"))
        .duration(2.0)
        .read_timeout_ms(10)
        .build();

    assert_eq!(config.output_path, PathBuf::from("/tmp/x/out.csv"));
    assert_eq!(config.duration_seconds, 2.0);
    assert_eq!(config.read_timeout_ms, Some(10));
    assert!(config.validate().is_ok());
}

//! Test data builders for creating test objects

use imulog::config::{AcquisitionConfig, StallPolicy};
use std::path::{Path, PathBuf};

/// Builder for creating test configs that write into a temp directory
pub struct ConfigBuilder {
    config: AcquisitionConfig,
}

impl ConfigBuilder {
    pub fn new(dir: &Path) -> Self {
        Self {
            config: AcquisitionConfig {
                port: "test-device".to_string(),
                output_path: dir.join("out.csv"),
                duration_seconds: 60.0,
                ..Default::default()
            },
        }
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.config.duration_seconds = seconds;
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = Some(ms);
        self
    }

    pub fn stall_policy(mut self, policy: StallPolicy) -> Self {
        self.config.stall_policy = policy;
        self
    }

    pub fn build(self) -> AcquisitionConfig {
        self.config
    }
}

//! Harness configuration
//!
//! The defaults mirror the constants the exercise suite was originally run
//! with; a TOML file or CLI flags can override any of them.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{HarnessError, Result};

/// HMAC secret shared with the service under test.
pub const DEFAULT_SIGNING_SECRET: &str =
    "d1f8a9b3c5e7f2a4d6c8b0e5f3a7d2c1b5e8f3a6d9c2b7e4f1a8d3c6b9e5f2a1";

/// Deliberately mismatched key used by the tampered-signature scenario.
pub const DEFAULT_TAMPER_SECRET: &str = "wrong-secret-key-for-mitm-attack";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Base URL of the service under test.
    pub base_url: String,
    /// Default credential signing key.
    pub signing_secret: String,
    /// Alternate key for the wrong-signature scenario.
    pub tamper_secret: String,
    /// Courtesy delay between scenarios, in milliseconds.
    pub pause_ms: u64,
    /// Plain-text mirror of every console line, recreated each run.
    pub log_file: PathBuf,
    /// Optional JSON run report destination.
    pub report_file: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            signing_secret: DEFAULT_SIGNING_SECRET.to_string(),
            tamper_secret: DEFAULT_TAMPER_SECRET.to_string(),
            pause_ms: 500,
            log_file: PathBuf::from("logs/authz_exercises.log"),
            report_file: None,
        }
    }
}

impl HarnessConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| HarnessError::Configuration(format!("{}: {e}", path.display())))
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

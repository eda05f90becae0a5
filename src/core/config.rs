//! Engine knobs. All optional; `EngineConfig::default()` is what most hosts want.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::error::PrefsError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Where private staging files go. `None` = the OS temp dir.
    pub staging_dir: Option<PathBuf>,
    /// File name prefix for staging files.
    pub temp_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            staging_dir: None,
            temp_prefix: "tmp-media".to_string(),
        }
    }
}

impl EngineConfig {
    /// Read from a JSON file; missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, PrefsError> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.staging_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

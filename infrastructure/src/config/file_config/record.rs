//! Run record configuration from TOML (`[record]` section)

use serde::{Deserialize, Serialize};

/// Where finished runs are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRecordConfig {
    /// Write a run directory after each run
    pub enabled: bool,
    /// Parent directory of the `run_<timestamp>` directories
    pub dir: String,
}

impl Default for FileRecordConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: "logs".to_string(),
        }
    }
}

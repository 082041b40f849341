//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod gateway;
mod models;
mod output;
mod record;

pub use gateway::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, FileGatewayConfig};
pub use models::FileModelsConfig;
pub use output::FileOutputConfig;
pub use record::FileRecordConfig;

use debate_application::PipelineConfig;
use debate_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Role-based model selection
    pub models: FileModelsConfig,
    /// HTTP gateway settings
    pub gateway: FileGatewayConfig,
    /// Run record settings
    pub record: FileRecordConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks empty model names, the gateway section and the resolved
    /// participant count.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.models.validate());
        issues.extend(self.gateway.validate());
        issues.extend(self.pipeline_config().validate());
        issues
    }

    /// Pipeline configuration with file overrides applied to the defaults
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new(self.models.to_model_config())
    }
}

//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished run is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every pass, discrepancy and gate decision, then the answer
    Full,
    /// Only the final answer (default)
    #[default]
    Answer,
    /// The whole run as JSON
    Json,
}

//! Role-based model configuration from TOML (`[models]` section)

use debate_domain::{ConfigIssue, ConfigIssueCode, Model, ModelConfig};
use serde::{Deserialize, Serialize};

/// Role-based model configuration from TOML
///
/// Every field is optional; unset roles keep their built-in default.
///
/// # Example
///
/// ```toml
/// [models]
/// participants = ["google/gemini-2.5-flash-lite", "anthropic/claude-3-haiku", "openai/gpt-4o-mini"]
/// critic = "deepseek/deepseek-v3.2"        # Discrepancy detection
/// agreement = "openai/gpt-4o-mini"         # Re-affirmation classifier
/// synthesizer = "deepseek/deepseek-v3.2"   # Final answer
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Models that answer the question and debate
    pub participants: Option<Vec<String>>,
    /// Model that lists discrepancies
    pub critic: Option<String>,
    /// Model that classifies trivial agreement
    pub agreement: Option<String>,
    /// Model that writes the final answer
    pub synthesizer: Option<String>,
}

impl FileModelsConfig {
    /// Parse a single model string, collecting issues for empty names.
    fn parse_single_model(field: &str, value: Option<&String>) -> (Option<Model>, Vec<ConfigIssue>) {
        match value {
            None => (None, Vec::new()),
            Some(s) if s.trim().is_empty() => (None, vec![empty_name(field)]),
            Some(s) => (Some(Model::from(s.trim())), Vec::new()),
        }
    }

    pub fn parse_participants(&self) -> (Option<Vec<Model>>, Vec<ConfigIssue>) {
        let Some(strings) = self.participants.as_ref() else {
            return (None, Vec::new());
        };

        let mut issues = Vec::new();
        let mut models = Vec::new();
        for (i, s) in strings.iter().enumerate() {
            if s.trim().is_empty() {
                issues.push(empty_name(&format!("participants[{}]", i)));
            } else {
                models.push(Model::from(s.trim()));
            }
        }
        (Some(models), issues)
    }

    pub fn parse_critic(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("critic", self.critic.as_ref())
    }

    pub fn parse_agreement(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("agreement", self.agreement.as_ref())
    }

    pub fn parse_synthesizer(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("synthesizer", self.synthesizer.as_ref())
    }

    /// Overlay the configured roles onto the defaults
    pub fn to_model_config(&self) -> ModelConfig {
        let mut config = ModelConfig::default();
        if let (Some(participants), _) = self.parse_participants() {
            config = config.with_participants(participants);
        }
        if let (Some(critic), _) = self.parse_critic() {
            config = config.with_critic(critic);
        }
        if let (Some(agreement), _) = self.parse_agreement() {
            config = config.with_agreement(agreement);
        }
        if let (Some(synthesizer), _) = self.parse_synthesizer() {
            config = config.with_synthesizer(synthesizer);
        }
        config
    }

    /// All issues from every role
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.parse_participants().1);
        issues.extend(self.parse_critic().1);
        issues.extend(self.parse_agreement().1);
        issues.extend(self.parse_synthesizer().1);
        issues
    }
}

fn empty_name(field: &str) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::EmptyModelName {
            field: format!("models.{}", field),
        },
        format!("models.{}: model name cannot be empty", field),
    )
}

//! Pipeline configuration.
//!
//! [`PipelineConfig`] is built once at startup and shared read-only by every
//! use case of a run.

use debate_domain::{ConfigIssue, ConfigIssueCode, Model, ModelConfig, Severity};

/// Configuration for a debate run
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    models: ModelConfig,
}

impl PipelineConfig {
    pub fn new(models: ModelConfig) -> Self {
        Self { models }
    }

    pub fn models(&self) -> &ModelConfig {
        &self.models
    }

    pub fn participants(&self) -> &[Model] {
        &self.models.participants
    }

    /// Collect every issue with the model roles.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (i, model) in self.models.participants.iter().enumerate() {
            check_model_name(&mut issues, &format!("models.participants[{}]", i), model);
        }
        check_model_name(&mut issues, "models.critic", &self.models.critic);
        check_model_name(&mut issues, "models.agreement", &self.models.agreement);
        check_model_name(&mut issues, "models.synthesizer", &self.models.synthesizer);

        let count = self.models.participants.len();
        if count < 2 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::TooFewParticipants { count },
                format!(
                    "{} participant(s) configured; discrepancies need at least two models",
                    count
                ),
            ));
        }

        issues
    }

    /// Whether any issue is fatal
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}

fn check_model_name(issues: &mut Vec<ConfigIssue>, field: &str, model: &Model) {
    if model.as_str().trim().is_empty() {
        issues.push(ConfigIssue::error(
            ConfigIssueCode::EmptyModelName {
                field: field.to_string(),
            },
            format!("{} must not be empty", field),
        ));
    }
}

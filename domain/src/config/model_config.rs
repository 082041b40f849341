//! Role-based model configuration.
//!
//! [`ModelConfig`] names which model plays each part in a debate. It is a
//! static value object: built once at startup and shared read-only.

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Role-based model configuration.
///
/// - **Participants**: answer the question and take part in debate rounds
/// - **Critic**: compares responses and names discrepancies
/// - **Agreement**: classifies debate replies as bare re-affirmations
/// - **Synthesizer**: writes the final answer
///
/// # Example
///
/// ```
/// use debate_domain::{Model, ModelConfig};
///
/// let config = ModelConfig::default()
///     .with_critic(Model::Gpt4oMini)
///     .with_participants(vec![Model::ClaudeHaiku3, Model::DeepSeekV32]);
///
/// assert_eq!(config.critic, Model::Gpt4oMini);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub participants: Vec<Model>,
    pub critic: Model,
    pub agreement: Model,
    pub synthesizer: Model,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            participants: Model::default_participants(),
            critic: Model::default_critic(),
            agreement: Model::default_agreement(),
            synthesizer: Model::default_synthesizer(),
        }
    }
}

impl ModelConfig {
    /// Replace the participants, dropping repeated identifiers (first wins)
    pub fn with_participants(mut self, models: Vec<Model>) -> Self {
        let mut unique: Vec<Model> = Vec::with_capacity(models.len());
        for model in models {
            if !unique.contains(&model) {
                unique.push(model);
            }
        }
        self.participants = unique;
        self
    }

    pub fn with_critic(mut self, model: Model) -> Self {
        self.critic = model;
        self
    }

    pub fn with_agreement(mut self, model: Model) -> Self {
        self.agreement = model;
        self
    }

    pub fn with_synthesizer(mut self, model: Model) -> Self {
        self.synthesizer = model;
        self
    }
}

//! Debate round use case
//!
//! Re-prompts every participant with the claims it missed, then folds
//! bare re-affirmations back into the participant's prior answer.

use super::dispatch::fan_out;
use crate::ports::model_gateway::ModelGateway;
use crate::ports::progress::ProgressNotifier;
use debate_domain::{
    Evaluation, Model, ModelCallResult, Phase, PromptTemplate, ResponseSet,
    parse_agreement_verdict,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Builds and runs one targeted re-prompt round
pub struct DebateRoundBuilder<G: ModelGateway + 'static> {
    gateway: Arc<G>,
    agreement: Model,
}

impl<G: ModelGateway + 'static> DebateRoundBuilder<G> {
    pub fn new(gateway: Arc<G>, agreement: Model) -> Self {
        Self { gateway, agreement }
    }

    /// Prompt for one model: its prior answer plus the claims it missed
    pub fn prompt_for(
        model: &Model,
        question: &str,
        prior: &ResponseSet,
        evaluation: &Evaluation,
    ) -> String {
        let missed: Vec<&str> = evaluation
            .missed_by(model.as_str())
            .map(|d| d.claim.as_str())
            .collect();
        PromptTemplate::debate(question, prior.get(model).unwrap_or_default(), &missed)
    }

    /// Run debate round `round` and return the new response set.
    ///
    /// A successful reply the agreement classifier labels a trivial
    /// agreement is replaced by the model's prior answer verbatim.
    pub async fn build_round(
        &self,
        models: &[Model],
        question: &str,
        prior: &ResponseSet,
        evaluation: &Evaluation,
        round: usize,
        progress: &dyn ProgressNotifier,
    ) -> ResponseSet {
        info!("Debate round {}: re-prompting {} models", round, models.len());

        fan_out(models, &Phase::Debate { round }, progress, |model| {
            let gateway = Arc::clone(&self.gateway);
            let agreement = self.agreement.clone();
            let prompt = Self::prompt_for(&model, question, prior, evaluation);
            let prior_answer = prior.get(&model).unwrap_or_default().to_string();

            async move {
                match gateway.call(&model, &prompt).await {
                    ModelCallResult::Ok { text, .. } => {
                        if is_agreement(gateway.as_ref(), &agreement, &text).await {
                            info!("Model {} re-affirmed its previous answer", model);
                            ModelCallResult::ok(model, prior_answer)
                        } else {
                            ModelCallResult::ok(model, text)
                        }
                    }
                    failed => failed,
                }
            }
        })
        .await
    }
}

/// Ask the agreement classifier whether `reply` is a bare re-affirmation.
///
/// Any classifier failure counts as "not an agreement".
pub async fn is_agreement<G: ModelGateway + ?Sized>(
    gateway: &G,
    agreement: &Model,
    reply: &str,
) -> bool {
    match gateway.call(agreement, &PromptTemplate::agreement(reply)).await {
        ModelCallResult::Ok { text, .. } => parse_agreement_verdict(&text),
        ModelCallResult::Failed { kind, message, .. } => {
            debug!("Agreement check failed ({}): {}", kind, message);
            false
        }
    }
}

//! Discrepancy evaluation use case
//!
//! Asks the critic model to compare one round's responses and normalizes
//! its verdict into an [`Evaluation`].

use crate::ports::model_gateway::ModelGateway;
use debate_domain::util::truncate_str;
use debate_domain::{
    Evaluation, Model, ModelCallResult, PromptTemplate, ResponseSet, parse_critic_verdict,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs the critic over a response set
pub struct DiscrepancyEvaluator<G: ModelGateway + 'static> {
    gateway: Arc<G>,
    critic: Model,
}

impl<G: ModelGateway + 'static> DiscrepancyEvaluator<G> {
    pub fn new(gateway: Arc<G>, critic: Model) -> Self {
        Self { gateway, critic }
    }

    /// Evaluate `responses`, carrying claim ids forward from `previous`.
    ///
    /// Never fails: an unreachable critic or an unparseable reply yields
    /// [`Evaluation::consensus`].
    pub async fn evaluate(
        &self,
        responses: &ResponseSet,
        previous: Option<&Evaluation>,
    ) -> Evaluation {
        let prompt = PromptTemplate::critic(responses, previous);
        debug!("Critic prompt for {} responses ({} chars)", responses.len(), prompt.len());

        let raw = match self.gateway.call(&self.critic, &prompt).await {
            ModelCallResult::Ok { text, .. } => text,
            ModelCallResult::Failed { kind, message, .. } => {
                warn!("Critic {} failed ({}): {}", self.critic, kind, message);
                return Evaluation::consensus();
            }
        };

        let verdict = match parse_critic_verdict(&raw) {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!("Failed to parse critic output: {}", e);
                debug!(
                    "Raw critic output (first 500 chars): {}",
                    truncate_str(&raw, 500)
                );
                return Evaluation::consensus();
            }
        };

        let claimed_consensus = verdict.consensus_reached;
        let evaluation = Evaluation::from_verdict(verdict);
        if claimed_consensus != evaluation.consensus_reached() {
            info!(
                "Critic reported consensus_reached={}, corrected to {} ({} discrepancies)",
                claimed_consensus,
                evaluation.consensus_reached(),
                evaluation.discrepancy_count()
            );
        }

        evaluation
    }
}

//! Synthesis use case
//!
//! Turns the final response set into one answer, in consensus or
//! divergence mode.

use crate::ports::model_gateway::ModelGateway;
use debate_domain::{Discrepancy, Model, PromptTemplate, ResponseSet, Synthesis, SynthesisMode};
use std::sync::Arc;
use tracing::{info, warn};

/// Writes the final answer with the synthesizer model
pub struct Synthesizer<G: ModelGateway + 'static> {
    gateway: Arc<G>,
    model: Model,
}

impl<G: ModelGateway + 'static> Synthesizer<G> {
    pub fn new(gateway: Arc<G>, model: Model) -> Self {
        Self { gateway, model }
    }

    /// Merge converged responses into one authoritative answer
    pub async fn synthesize_consensus(&self, question: &str, responses: &ResponseSet) -> String {
        let prompt = PromptTemplate::consensus_synthesis(question, responses);
        self.generate(&prompt).await
    }

    /// Present unresolved disagreement and its trade-offs
    pub async fn synthesize_divergence(
        &self,
        question: &str,
        responses: &ResponseSet,
        discrepancies: &[Discrepancy],
    ) -> String {
        let prompt = PromptTemplate::divergence_synthesis(question, responses, discrepancies);
        self.generate(&prompt).await
    }

    /// Dispatch on `mode`; `discrepancies` is only used for divergence
    pub async fn synthesize(
        &self,
        mode: SynthesisMode,
        question: &str,
        responses: &ResponseSet,
        discrepancies: &[Discrepancy],
    ) -> Synthesis {
        info!("Synthesizing final answer ({} mode) with {}", mode, self.model);
        let answer = match mode {
            SynthesisMode::Consensus => self.synthesize_consensus(question, responses).await,
            SynthesisMode::Divergence => {
                self.synthesize_divergence(question, responses, discrepancies)
                    .await
            }
        };
        Synthesis { mode, answer }
    }

    async fn generate(&self, prompt: &str) -> String {
        let result = self.gateway.call(&self.model, prompt).await;
        if !result.is_ok() {
            warn!("Synthesizer {} failed, returning error text as answer", self.model);
        }
        result.into_response_text()
    }
}

//! Run pipeline use case
//!
//! Orchestrates a full debate run: initial fan-out, critic passes, gated
//! debate rounds and the final synthesis.

use super::debate_round::DebateRoundBuilder;
use super::dispatch::Dispatcher;
use super::evaluate::DiscrepancyEvaluator;
use super::synthesize::Synthesizer;
use crate::config::PipelineConfig;
use crate::ports::model_gateway::ModelGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::run_recorder::{NoRunRecorder, RunRecorder};
use debate_domain::{
    Evaluation, PassRecord, Phase, PipelineRun, PipelineState, PromptTemplate, Question,
    Transition,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that prevent a run from starting
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No participant models configured")]
    NoModels,

    #[error("Question must not be empty")]
    EmptyQuestion,
}

/// Use case for running one debate
pub struct RunPipelineUseCase<G: ModelGateway + 'static> {
    config: PipelineConfig,
    dispatcher: Dispatcher<G>,
    evaluator: DiscrepancyEvaluator<G>,
    debate: DebateRoundBuilder<G>,
    synthesizer: Synthesizer<G>,
    recorder: Arc<dyn RunRecorder>,
}

impl<G: ModelGateway + 'static> RunPipelineUseCase<G> {
    pub fn new(gateway: Arc<G>, config: PipelineConfig) -> Self {
        let models = config.models().clone();
        Self {
            dispatcher: Dispatcher::new(Arc::clone(&gateway)),
            evaluator: DiscrepancyEvaluator::new(Arc::clone(&gateway), models.critic),
            debate: DebateRoundBuilder::new(Arc::clone(&gateway), models.agreement),
            synthesizer: Synthesizer::new(gateway, models.synthesizer),
            recorder: Arc::new(NoRunRecorder),
            config,
        }
    }

    /// Persist every finished run through `recorder`
    pub fn with_recorder(mut self, recorder: Arc<dyn RunRecorder>) -> Self {
        self.recorder = recorder;
        self
    }

    /// Run the pipeline and return only the final answer
    pub async fn run_pipeline(&self, prompt: &str) -> Result<String, PipelineError> {
        let run = self.execute(prompt).await?;
        Ok(run.answer().to_string())
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, prompt: &str) -> Result<PipelineRun, PipelineError> {
        self.execute_with_progress(prompt, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        prompt: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<PipelineRun, PipelineError> {
        let question = Question::new(prompt).map_err(|_| PipelineError::EmptyQuestion)?;
        let participants = self.config.participants();
        if participants.is_empty() {
            return Err(PipelineError::NoModels);
        }

        info!("Starting debate with {} models", participants.len());
        let mut builder = PipelineRun::builder(question.clone());

        let mut responses = self
            .dispatcher
            .run_all(
                participants,
                &PromptTemplate::initial_query(question.content()),
                &Phase::Initial,
                progress,
            )
            .await;
        if responses.success_count() == 0 {
            warn!("Every participant failed; continuing with error texts");
        }

        let mut state = PipelineState::Initial;
        let mut previous: Option<Evaluation> = None;

        loop {
            let pass = state.pass_index();
            let critique = Phase::Critique { pass };
            progress.on_phase_start(&critique, 1);
            let evaluation = self.evaluator.evaluate(&responses, previous.as_ref()).await;
            progress.on_phase_complete(&critique);
            progress.on_evaluation(pass, &evaluation);

            info!(
                "Pass {}: consensus={}, {} discrepancies",
                pass,
                evaluation.consensus_reached(),
                evaluation.discrepancy_count()
            );
            for d in evaluation.discrepancies() {
                debug!("  [{}] {} (missing: {:?})", d.claim_id, d.claim, d.models_missing_claim);
            }

            let resolved_claims = previous
                .as_ref()
                .map(|prev| evaluation.resolved_since(prev))
                .unwrap_or_default();
            for claim in &resolved_claims {
                info!("Resolved since pass {}: {}", pass - 1, claim);
            }

            let decision = state.transition(&evaluation);
            info!("Gate {}: {} ({})", decision.gate, decision.route, decision.reason);
            progress.on_gate(&decision);

            builder.push_pass(PassRecord {
                pass,
                responses: responses.clone(),
                evaluation: evaluation.clone(),
                resolved_claims,
                gate: decision.clone(),
            });

            match decision.transition {
                Transition::Synthesize { mode } => {
                    progress.on_phase_start(&Phase::Synthesis, 1);
                    let synthesis = self
                        .synthesizer
                        .synthesize(
                            mode,
                            question.content(),
                            &responses,
                            evaluation.discrepancies(),
                        )
                        .await;
                    progress.on_phase_complete(&Phase::Synthesis);

                    let run = builder.finish(synthesis);
                    info!(
                        "Run finished in {:.2}s after {} debate round(s)",
                        run.elapsed_secs(),
                        run.debate_rounds()
                    );
                    self.recorder.record(&run);
                    return Ok(run);
                }
                Transition::Debate { next } => {
                    responses = self
                        .debate
                        .build_round(
                            participants,
                            question.content(),
                            &responses,
                            &evaluation,
                            next.pass_index(),
                            progress,
                        )
                        .await;
                    previous = Some(evaluation);
                    state = next;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::scripted_gateway::{Scripted, ScriptedGateway};
    use debate_domain::{Model, ModelConfig, Route, SynthesisMode};
    use std::sync::Mutex;

    const AGREEMENT: &str = "test/agreement";

    fn config() -> PipelineConfig {
        PipelineConfig::new(
            ModelConfig::default()
                .with_participants(vec![
                    Model::GeminiFlashLite25,
                    Model::ClaudeHaiku3,
                    Model::Gpt4oMini,
                ])
                .with_agreement(Model::from(AGREEMENT)),
        )
    }

    /// Critic reply with `n` distinct discrepancies, each missed by claude
    fn verdict(n: usize) -> Scripted {
        let discrepancies: Vec<String> = (0..n)
            .map(|i| {
                format!(
                    r#"{{"claim": "claim number {}", "models_with_claim": ["openai/gpt-4o-mini"], "models_missing_claim": ["anthropic/claude-3-haiku"]}}"#,
                    i
                )
            })
            .collect();
        Scripted::text(format!(
            r#"{{"consensus_reached": {}, "discrepancies": [{}]}}"#,
            n == 0,
            discrepancies.join(",")
        ))
    }

    fn gateway(critic: Vec<Scripted>) -> Arc<ScriptedGateway> {
        Arc::new(
            ScriptedGateway::new()
                .always(&Model::GeminiFlashLite25, Scripted::text("gemini answer"))
                .always(&Model::ClaudeHaiku3, Scripted::text("claude answer"))
                .always(&Model::Gpt4oMini, Scripted::text("gpt answer"))
                .always(&Model::from(AGREEMENT), Scripted::text("false"))
                .script(&Model::DeepSeekV32, critic)
                .always(&Model::DeepSeekV32, Scripted::text("synthesized")),
        )
    }

    struct RecordingRecorder {
        runs: Mutex<Vec<PipelineRun>>,
    }

    impl RunRecorder for RecordingRecorder {
        fn record(&self, run: &PipelineRun) {
            self.runs.lock().unwrap().push(run.clone());
        }
    }

    #[tokio::test]
    async fn test_fast_path_skips_debate() {
        let gateway = gateway(vec![verdict(0)]);
        let use_case = RunPipelineUseCase::new(Arc::clone(&gateway), config());

        let run = use_case.execute("What is 2+2?").await.unwrap();

        assert_eq!(run.debate_rounds(), 0);
        assert_eq!(run.mode(), SynthesisMode::Consensus);
        assert_eq!(run.passes()[0].gate.route, Route::FastPathConsensus);
        assert_eq!(run.answer(), "synthesized");
        // initial responses went straight to the synthesizer
        let prompts = gateway.prompts_for(&Model::DeepSeekV32);
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].contains("gemini answer"));
        assert_eq!(gateway.call_count(&Model::ClaudeHaiku3), 1);
    }

    #[tokio::test]
    async fn test_circuit_breaker_stops_after_one_round() {
        let gateway = gateway(vec![verdict(3), verdict(4)]);
        let use_case = RunPipelineUseCase::new(Arc::clone(&gateway), config());

        let run = use_case.execute("q").await.unwrap();

        assert_eq!(run.debate_rounds(), 1);
        assert_eq!(run.mode(), SynthesisMode::Divergence);
        let gate = &run.passes()[1].gate;
        assert_eq!(gate.route, Route::CircuitBreakerTriggered);
        assert_eq!(gate.reason, "Discrepancies did not decrease (4 >= 3)");
        // initial + one debate round
        assert_eq!(gateway.call_count(&Model::ClaudeHaiku3), 2);
        let synthesis_prompt = gateway.prompts_for(&Model::DeepSeekV32).pop().unwrap();
        assert!(synthesis_prompt.contains("REMAINING DISCREPANCIES:\n- claim number 0"));
    }

    #[tokio::test]
    async fn test_progress_runs_both_rounds_to_consensus() {
        let gateway = gateway(vec![verdict(3), verdict(1), verdict(0)]);
        let use_case = RunPipelineUseCase::new(Arc::clone(&gateway), config());

        let run = use_case.execute("q").await.unwrap();

        assert_eq!(run.debate_rounds(), 2);
        assert_eq!(run.mode(), SynthesisMode::Consensus);
        let routes: Vec<Route> = run.passes().iter().map(|p| p.gate.route).collect();
        assert_eq!(
            routes,
            vec![
                Route::ProceedToDebate1,
                Route::ProceedToDebate2,
                Route::ConsensusAfterDebate2
            ]
        );
        // claim number 1 and 2 vanished between pass 0 and pass 1
        assert_eq!(
            run.passes()[1].resolved_claims,
            vec!["claim number 1".to_string(), "claim number 2".to_string()]
        );
        assert_eq!(run.passes()[2].resolved_claims, vec!["claim number 0".to_string()]);
    }

    #[tokio::test]
    async fn test_divergence_after_second_round() {
        let gateway = gateway(vec![verdict(3), verdict(2), verdict(2)]);
        let use_case = RunPipelineUseCase::new(Arc::clone(&gateway), config());

        let run = use_case.execute("q").await.unwrap();

        assert_eq!(run.passes().len(), 3);
        assert_eq!(run.passes()[2].gate.route, Route::FinalDivergence);
        assert_eq!(run.mode(), SynthesisMode::Divergence);
        assert_eq!(gateway.call_count(&Model::Gpt4oMini), 3);
    }

    #[tokio::test]
    async fn test_agreement_folds_into_prior_answer() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .script(&Model::ClaudeHaiku3, vec![Scripted::text("claude answer")])
                .always(&Model::ClaudeHaiku3, Scripted::text("I agree with myself."))
                .always(&Model::Gpt4oMini, Scripted::text("gpt answer"))
                .always(&Model::from(AGREEMENT), Scripted::text("true"))
                .script(&Model::DeepSeekV32, vec![verdict(1), verdict(0)])
                .always(&Model::DeepSeekV32, Scripted::text("synthesized")),
        );
        let config = PipelineConfig::new(
            ModelConfig::default()
                .with_participants(vec![Model::ClaudeHaiku3, Model::Gpt4oMini])
                .with_agreement(Model::from(AGREEMENT)),
        );
        let use_case = RunPipelineUseCase::new(gateway, config);

        let run = use_case.execute("q").await.unwrap();

        let round_one = &run.passes()[1].responses;
        assert_eq!(round_one.get(&Model::ClaudeHaiku3), Some("claude answer"));
        assert_eq!(run.passes()[1].gate.route, Route::ConsensusAfterDebate1);
    }

    #[tokio::test]
    async fn test_critic_failure_takes_fast_path() {
        let gateway = gateway(vec![Scripted::timeout()]);
        let use_case = RunPipelineUseCase::new(gateway, config());

        let run = use_case.execute("q").await.unwrap();

        assert_eq!(run.passes()[0].gate.route, Route::FastPathConsensus);
    }

    #[tokio::test]
    async fn test_all_participants_failing_still_synthesizes() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .always(&Model::GeminiFlashLite25, Scripted::timeout())
                .always(&Model::ClaudeHaiku3, Scripted::timeout())
                .always(&Model::Gpt4oMini, Scripted::timeout())
                .script(&Model::DeepSeekV32, vec![verdict(0)])
                .always(&Model::DeepSeekV32, Scripted::text("nothing to go on")),
        );
        let use_case = RunPipelineUseCase::new(gateway, config());

        let run = use_case.execute("q").await.unwrap();

        let initial = run.initial_responses().unwrap();
        assert_eq!(initial.len(), 3);
        assert_eq!(initial.failures().count(), 3);
        assert_eq!(run.answer(), "nothing to go on");
    }

    #[tokio::test]
    async fn test_recorder_receives_finished_run() {
        let recorder = Arc::new(RecordingRecorder {
            runs: Mutex::new(Vec::new()),
        });
        let use_case = RunPipelineUseCase::new(gateway(vec![verdict(0)]), config())
            .with_recorder(recorder.clone());

        let answer = use_case.run_pipeline("q").await.unwrap();

        assert_eq!(answer, "synthesized");
        let runs = recorder.runs.lock().unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].question().content(), "q");
    }

    #[tokio::test]
    async fn test_rejects_empty_question_and_no_models() {
        let use_case = RunPipelineUseCase::new(gateway(vec![]), config());
        assert!(matches!(
            use_case.execute("   ").await,
            Err(PipelineError::EmptyQuestion)
        ));

        let empty = PipelineConfig::new(ModelConfig::default().with_participants(vec![]));
        let use_case = RunPipelineUseCase::new(gateway(vec![]), empty);
        assert!(matches!(use_case.execute("q").await, Err(PipelineError::NoModels)));
    }
}

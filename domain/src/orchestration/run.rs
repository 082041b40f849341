//! The record of one pipeline run.
//!
//! A run is assembled pass by pass through [`PipelineRunBuilder`] and frozen
//! into a [`PipelineRun`] once the synthesis is known. Nothing mutates a
//! finished run.

use super::state::{GateDecision, SynthesisMode};
use crate::core::question::Question;
use crate::debate::evaluation::Evaluation;
use crate::debate::response_set::ResponseSet;
use serde::{Deserialize, Serialize};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Progress phase of a run, used for notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Fan-out of the question to every participant
    Initial,
    /// Critic evaluation of the given pass
    Critique { pass: usize },
    /// Targeted re-prompts of the given round
    Debate { round: usize },
    /// Final answer generation
    Synthesis,
}

impl Phase {
    pub fn display_name(&self) -> String {
        match self {
            Phase::Initial => "Initial Responses".to_string(),
            Phase::Critique { pass } => format!("Critic Pass {}", pass),
            Phase::Debate { round } => format!("Debate Round {}", round),
            Phase::Synthesis => "Synthesis".to_string(),
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One evaluation pass: the responses, their evaluation and the gate taken
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassRecord {
    /// 0 for the initial responses, 1 and 2 for debate rounds
    pub pass: usize,
    pub responses: ResponseSet,
    pub evaluation: Evaluation,
    /// Claims open in the previous pass that no longer appear
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resolved_claims: Vec<String>,
    pub gate: GateDecision,
}

/// The terminal answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synthesis {
    pub mode: SynthesisMode,
    pub answer: String,
}

/// A complete, immutable run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRun {
    question: Question,
    started_at_ms: u64,
    finished_at_ms: u64,
    elapsed_secs: f64,
    passes: Vec<PassRecord>,
    synthesis: Synthesis,
}

impl PipelineRun {
    pub fn builder(question: Question) -> PipelineRunBuilder {
        PipelineRunBuilder::new(question)
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Start time, milliseconds since the Unix epoch
    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    /// End time, milliseconds since the Unix epoch
    pub fn finished_at_ms(&self) -> u64 {
        self.finished_at_ms
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn passes(&self) -> &[PassRecord] {
        &self.passes
    }

    /// Number of debate rounds that actually ran
    pub fn debate_rounds(&self) -> usize {
        self.passes.len().saturating_sub(1)
    }

    pub fn synthesis(&self) -> &Synthesis {
        &self.synthesis
    }

    pub fn answer(&self) -> &str {
        &self.synthesis.answer
    }

    pub fn mode(&self) -> SynthesisMode {
        self.synthesis.mode
    }

    pub fn initial_responses(&self) -> Option<&ResponseSet> {
        self.passes.first().map(|p| &p.responses)
    }
}

/// Accumulates passes while a run is in flight
#[derive(Debug)]
pub struct PipelineRunBuilder {
    question: Question,
    started_at_ms: u64,
    started: Instant,
    passes: Vec<PassRecord>,
}

impl PipelineRunBuilder {
    pub fn new(question: Question) -> Self {
        Self {
            question,
            started_at_ms: current_timestamp(),
            started: Instant::now(),
            passes: Vec::new(),
        }
    }

    pub fn push_pass(&mut self, pass: PassRecord) {
        self.passes.push(pass);
    }

    /// Record the synthesis and freeze the run
    pub fn finish(self, synthesis: Synthesis) -> PipelineRun {
        PipelineRun {
            question: self.question,
            started_at_ms: self.started_at_ms,
            finished_at_ms: current_timestamp(),
            elapsed_secs: self.started.elapsed().as_secs_f64(),
            passes: self.passes,
            synthesis,
        }
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

//! Bounded debate state machine.
//!
//! ```text
//! Initial ──Gate0──▶ consensus ─────────────────────────▶ SynthesizeConsensus
//!    │                no: baseline = |d|
//!    ▼
//! Debate1 ──Gate1──▶ consensus ─────────────────────────▶ SynthesizeConsensus
//!    │               |d| >= baseline (circuit breaker) ─▶ SynthesizeDivergence
//!    ▼               0 < |d| < baseline
//! Debate2 ──Gate2──▶ consensus ─────────────────────────▶ SynthesizeConsensus
//!                    otherwise ─────────────────────────▶ SynthesizeDivergence
//! ```
//!
//! [`PipelineState::transition`] is pure: it looks only at the current state
//! and the evaluation of the pass just completed. `Debate2` has no debate
//! successor, so no sequence of evaluations can produce a fourth pass.

use crate::debate::evaluation::Evaluation;
use serde::{Deserialize, Serialize};

/// Maximum number of re-prompt rounds in one run
pub const MAX_DEBATE_ROUNDS: usize = 2;

/// Maximum number of evaluation passes in one run
pub const MAX_EVALUATION_PASSES: usize = MAX_DEBATE_ROUNDS + 1;

/// A non-terminal state: the pass whose evaluation is about to be gated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PipelineState {
    /// Initial responses, evaluation pass 0
    Initial,
    /// After debate round 1, evaluation pass 1
    #[serde(rename = "debate_1")]
    Debate1 { baseline: usize },
    /// After debate round 2, evaluation pass 2
    #[serde(rename = "debate_2")]
    Debate2 { baseline: usize },
}

/// Final answer mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisMode {
    Consensus,
    Divergence,
}

impl SynthesisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SynthesisMode::Consensus => "consensus",
            SynthesisMode::Divergence => "divergence",
        }
    }
}

impl std::fmt::Display for SynthesisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a gate sends the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "to", rename_all = "snake_case")]
pub enum Transition {
    /// Run another debate round, then evaluate in the given state
    Debate { next: PipelineState },
    /// Stop and synthesize
    Synthesize { mode: SynthesisMode },
}

/// Named route taken at a gate, recorded for audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    FastPathConsensus,
    #[serde(rename = "proceed_to_debate_1")]
    ProceedToDebate1,
    #[serde(rename = "consensus_after_debate_1")]
    ConsensusAfterDebate1,
    CircuitBreakerTriggered,
    #[serde(rename = "proceed_to_debate_2")]
    ProceedToDebate2,
    #[serde(rename = "consensus_after_debate_2")]
    ConsensusAfterDebate2,
    FinalDivergence,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::FastPathConsensus => "fast_path_consensus",
            Route::ProceedToDebate1 => "proceed_to_debate_1",
            Route::ConsensusAfterDebate1 => "consensus_after_debate_1",
            Route::CircuitBreakerTriggered => "circuit_breaker_triggered",
            Route::ProceedToDebate2 => "proceed_to_debate_2",
            Route::ConsensusAfterDebate2 => "consensus_after_debate_2",
            Route::FinalDivergence => "final_divergence",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateDecision {
    /// Gate number, equal to the evaluation pass it follows (0, 1 or 2)
    pub gate: usize,
    pub route: Route,
    /// Human-readable explanation for the audit record
    pub reason: String,
    pub transition: Transition,
}

impl GateDecision {
    fn new(gate: usize, route: Route, reason: impl Into<String>, transition: Transition) -> Self {
        Self {
            gate,
            route,
            reason: reason.into(),
            transition,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.transition, Transition::Synthesize { .. })
    }
}

impl PipelineState {
    /// Evaluation pass number gated in this state
    pub fn pass_index(&self) -> usize {
        match self {
            PipelineState::Initial => 0,
            PipelineState::Debate1 { .. } => 1,
            PipelineState::Debate2 { .. } => 2,
        }
    }


    /// Apply this state's gate to the evaluation of its pass.
    pub fn transition(&self, evaluation: &Evaluation) -> GateDecision {
        let count = evaluation.discrepancy_count();
        let consensus = evaluation.consensus_reached();

        match *self {
            PipelineState::Initial => {
                if consensus {
                    GateDecision::new(
                        0,
                        Route::FastPathConsensus,
                        "Consensus reached at Pass 0, skipping debates",
                        Transition::Synthesize {
                            mode: SynthesisMode::Consensus,
                        },
                    )
                } else {
                    GateDecision::new(
                        0,
                        Route::ProceedToDebate1,
                        format!("No consensus, {} discrepancies detected", count),
                        Transition::Debate {
                            next: PipelineState::Debate1 { baseline: count },
                        },
                    )
                }
            }
            PipelineState::Debate1 { baseline } => {
                if consensus {
                    GateDecision::new(
                        1,
                        Route::ConsensusAfterDebate1,
                        "Models converged after Debate 1",
                        Transition::Synthesize {
                            mode: SynthesisMode::Consensus,
                        },
                    )
                } else if count >= baseline {
                    GateDecision::new(
                        1,
                        Route::CircuitBreakerTriggered,
                        format!(
                            "Discrepancies did not decrease ({} >= {})",
                            count, baseline
                        ),
                        Transition::Synthesize {
                            mode: SynthesisMode::Divergence,
                        },
                    )
                } else {
                    GateDecision::new(
                        1,
                        Route::ProceedToDebate2,
                        format!("Progress detected: {} < {} discrepancies", count, baseline),
                        Transition::Debate {
                            next: PipelineState::Debate2 { baseline },
                        },
                    )
                }
            }
            PipelineState::Debate2 { .. } => {
                if consensus {
                    GateDecision::new(
                        2,
                        Route::ConsensusAfterDebate2,
                        "Models converged after Debate 2",
                        Transition::Synthesize {
                            mode: SynthesisMode::Consensus,
                        },
                    )
                } else {
                    GateDecision::new(
                        2,
                        Route::FinalDivergence,
                        format!(
                            "Models could not reach consensus after {} debate rounds",
                            MAX_DEBATE_ROUNDS
                        ),
                        Transition::Synthesize {
                            mode: SynthesisMode::Divergence,
                        },
                    )
                }
            }
        }
    }
}

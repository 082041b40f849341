//! Debate orchestration domain
//!
//! The gated state machine that bounds a run and the immutable record the
//! run leaves behind.

pub mod run;
pub mod state;

pub use run::{PassRecord, Phase, PipelineRun, PipelineRunBuilder, Synthesis};
pub use state::{
    GateDecision, MAX_DEBATE_ROUNDS, MAX_EVALUATION_PASSES, PipelineState, Route, SynthesisMode,
    Transition,
};

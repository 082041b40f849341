//! Application layer for debate-quorum
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use ports::{
    model_gateway::ModelGateway,
    progress::{NoProgress, ProgressNotifier},
    run_recorder::{NoRunRecorder, RunRecorder},
};
pub use use_cases::debate_round::{DebateRoundBuilder, is_agreement};
pub use use_cases::dispatch::Dispatcher;
pub use use_cases::evaluate::DiscrepancyEvaluator;
pub use use_cases::run_pipeline::{PipelineError, RunPipelineUseCase};
pub use use_cases::synthesize::Synthesizer;

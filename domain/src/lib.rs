//! Domain layer for debate-quorum
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Debate
//!
//! Several participant models answer the same question. A critic model lists
//! the material discrepancies between their answers, and each participant is
//! re-prompted with the claims it missed:
//!
//! - **Discrepancy**: a claim some models make and others miss
//! - **Evaluation**: one critic pass, consensus iff no discrepancies survive
//!
//! ## Orchestration
//!
//! - **Gate**: a pure transition from one pass's evaluation to the next step
//! - **Circuit breaker**: stop debating once discrepancies stop decreasing
//! - **Synthesis**: consensus or divergence, chosen by the final gate

pub mod config;
pub mod core;
pub mod debate;
pub mod orchestration;
pub mod prompt;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, ModelConfig, OutputFormat, Severity};
pub use core::{error::DomainError, model::Model, question::Question};
pub use debate::{
    CLAIM_ID_MAX_LEN, CallFailureKind, CriticDiscrepancy, CriticVerdict, Discrepancy, Evaluation,
    ModelCallResult, ResponseSet, derive_claim_id, error_text, is_error_text,
    parse_agreement_verdict, parse_critic_verdict, strip_markdown_fences,
};
pub use orchestration::{
    GateDecision, MAX_DEBATE_ROUNDS, MAX_EVALUATION_PASSES, PassRecord, Phase, PipelineRun,
    PipelineRunBuilder, PipelineState, Route, SynthesisMode, Synthesis, Transition,
};
pub use prompt::PromptTemplate;

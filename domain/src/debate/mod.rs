//! Debate domain: call outcomes, response snapshots, discrepancies and
//! their evaluation.
//!
//! ```text
//! ModelCallResult ──collect──▶ ResponseSet ──critic──▶ CriticVerdict
//!                                                         │ normalize
//!                                                         ▼
//!                              Discrepancy[] ◀──────── Evaluation
//! ```

pub mod discrepancy;
pub mod evaluation;
pub mod outcome;
pub mod parsing;
pub mod response_set;

pub use discrepancy::{CLAIM_ID_MAX_LEN, Discrepancy, derive_claim_id};
pub use evaluation::{CriticDiscrepancy, CriticVerdict, Evaluation};
pub use outcome::{CallFailureKind, ModelCallResult, error_text, is_error_text};
pub use parsing::{parse_agreement_verdict, parse_critic_verdict, strip_markdown_fences};
pub use response_set::ResponseSet;

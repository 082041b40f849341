//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: model identifiers and the default role assignments
//! - [`question::Question`]: a validated question to pose to the participants
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod question;

//! Error types for the OpenRouter adapter

use thiserror::Error;

/// Errors that prevent the gateway from being constructed.
///
/// Individual calls never return these: per-call failures are reported as
/// [`ModelCallResult::Failed`](debate_domain::ModelCallResult::Failed).
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("No API key found: set ${env_var} or gateway.api_key")]
    MissingApiKey { env_var: String },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

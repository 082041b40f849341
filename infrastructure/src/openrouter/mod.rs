//! OpenRouter adapter
//!
//! Implements [`ModelGateway`](debate_application::ModelGateway) over the
//! OpenAI-compatible chat-completions HTTP API that OpenRouter exposes.
//! Each call is one POST with a single user message, bounded by the
//! configured timeout, and never retried.

pub mod error;
pub mod gateway;
pub mod protocol;

pub use error::GatewayError;
pub use gateway::{GatewayConfig, OpenRouterGateway};

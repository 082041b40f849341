//! Model gateway port
//!
//! Defines the interface for sending one prompt to one model.

use async_trait::async_trait;
use debate_domain::{Model, ModelCallResult};

/// Gateway for model communication
///
/// This port defines how the application layer talks to model endpoints.
/// Implementations (adapters) live in the infrastructure layer.
///
/// A call never fails in the `Result` sense: timeouts, HTTP errors, transport
/// errors and malformed bodies all come back as [`ModelCallResult::Failed`].
/// The timeout is enforced by the implementation.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send a single prompt and wait for the complete reply
    async fn call(&self, model: &Model, prompt: &str) -> ModelCallResult;
}

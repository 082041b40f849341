//! Infrastructure layer for debate-quorum
//!
//! This crate contains adapters that implement the ports defined in the application layer.
//!
//! - [`openrouter`]: HTTP model gateway for OpenRouter-compatible endpoints
//! - [`config`]: layered TOML / environment configuration
//! - [`logging`]: the JSON run record

pub mod config;
pub mod logging;
pub mod openrouter;

pub use config::{ConfigLoader, FileConfig};
pub use logging::{JsonRunRecorder, RecordError};
pub use openrouter::{GatewayConfig, GatewayError, OpenRouterGateway};

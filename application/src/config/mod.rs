//! Application-level configuration.
//!
//! - [`PipelineConfig`]: model roles shared by every use case of a run

pub mod pipeline_config;

pub use pipeline_config::PipelineConfig;

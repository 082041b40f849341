//! Use cases (application services)

pub mod debate_round;
pub mod dispatch;
pub mod evaluate;
pub mod run_pipeline;
pub mod synthesize;

#[cfg(test)]
pub(crate) mod scripted_gateway;

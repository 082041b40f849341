//! Port for the structured run record.
//!
//! This is separate from `tracing`-based operation logs: tracing carries
//! diagnostic messages, while a [`RunRecorder`] persists the complete
//! [`PipelineRun`] (every response set, evaluation and gate decision) in a
//! machine-readable form for later audit.

use debate_domain::PipelineRun;

/// Port for persisting finished runs.
///
/// `record` is synchronous and non-fallible: implementations log their own
/// failures and never disturb the caller.
pub trait RunRecorder: Send + Sync {
    /// Persist a finished run.
    fn record(&self, run: &PipelineRun);
}

/// No-op implementation for tests and when recording is disabled.
pub struct NoRunRecorder;

impl RunRecorder for NoRunRecorder {
    fn record(&self, _run: &PipelineRun) {}
}

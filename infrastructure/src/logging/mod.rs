//! Logging infrastructure: the structured run record.
//!
//! Provides [`JsonRunRecorder`], a directory-per-run JSON writer that
//! implements the [`RunRecorder`](debate_application::RunRecorder) port.

mod run_record;

pub use run_record::{JsonRunRecorder, RecordError, flow_document};

//! JSON run-record writer.
//!
//! Every finished run gets its own directory under the record root:
//!
//! ```text
//! logs/run_2026-02-27_18-40-17/
//!   flow.json              metadata, critic passes, gate decisions, synthesis
//!   initial_responses.json
//!   debate_round_1.json    only when round 1 ran
//!   debate_round_2.json    only when round 2 ran
//!   final_synthesis.json
//! ```
//!
//! `flow.json` carries no full response texts; those live in the per-round
//! files keyed by model.

use chrono::{DateTime, Local};
use debate_application::RunRecorder;
use debate_domain::{PassRecord, PipelineRun};
use serde_json::{Map, Value, json};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{info, warn};

/// Errors while writing a run directory
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Writes each run as a directory of pretty-printed JSON files
pub struct JsonRunRecorder {
    root: PathBuf,
    last_run_dir: Mutex<Option<PathBuf>>,
}

impl JsonRunRecorder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            last_run_dir: Mutex::new(None),
        }
    }

    /// Directory written by the most recent successful `record`
    pub fn last_run_dir(&self) -> Option<PathBuf> {
        self.last_run_dir.lock().ok().and_then(|dir| dir.clone())
    }

    /// Write the run directory and return its path
    pub fn write(&self, run: &PipelineRun) -> Result<PathBuf, RecordError> {
        let dir = self.allocate_run_dir(run.started_at_ms())?;

        write_json(&dir.join("flow.json"), &flow_document(run))?;

        for pass in run.passes() {
            let file = match pass.pass {
                0 => "initial_responses.json".to_string(),
                n => format!("debate_round_{}.json", n),
            };
            write_json(&dir.join(file), &serde_json::to_value(&pass.responses)?)?;
        }

        write_json(
            &dir.join("final_synthesis.json"),
            &serde_json::to_value(run.synthesis())?,
        )?;

        Ok(dir)
    }

    /// Create `run_<timestamp>`, suffixing `_2`, `_3`, ... on collision
    fn allocate_run_dir(&self, started_at_ms: u64) -> Result<PathBuf, RecordError> {
        std::fs::create_dir_all(&self.root)?;
        let base = format!("run_{}", local_time(started_at_ms).format("%Y-%m-%d_%H-%M-%S"));

        let mut candidate = self.root.join(&base);
        let mut n = 2;
        loop {
            match std::fs::create_dir(&candidate) {
                Ok(()) => return Ok(candidate),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    candidate = self.root.join(format!("{}_{}", base, n));
                    n += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl RunRecorder for JsonRunRecorder {
    fn record(&self, run: &PipelineRun) {
        match self.write(run) {
            Ok(dir) => {
                info!("Run record written to {}", dir.display());
                if let Ok(mut last) = self.last_run_dir.lock() {
                    *last = Some(dir);
                }
            }
            Err(e) => warn!("Could not write run record under {}: {}", self.root.display(), e),
        }
    }
}

/// Build the `flow.json` document for a run
pub fn flow_document(run: &PipelineRun) -> Value {
    let mut flow = Map::new();

    let total = (run.elapsed_secs() * 100.0).round() / 100.0;
    flow.insert(
        "metadata".to_string(),
        json!({
            "timestamp_start": local_time(run.started_at_ms()).to_rfc3339(),
            "timestamp_end": local_time(run.finished_at_ms()).to_rfc3339(),
            "total_time_seconds": total,
            "prompt": run.question().content(),
        }),
    );

    for pass in run.passes() {
        flow.insert(format!("critic_pass_{}", pass.pass), critic_pass_entry(pass));
        flow.insert(
            format!("gate_{}_decision", pass.gate.gate),
            json!({
                "route": pass.gate.route.as_str(),
                "reason": pass.gate.reason,
            }),
        );
    }

    flow.insert(
        "final_synthesis".to_string(),
        json!({
            "mode": run.mode().as_str(),
            "answer": run.answer(),
        }),
    );

    Value::Object(flow)
}

fn critic_pass_entry(pass: &PassRecord) -> Value {
    let discrepancies: Vec<Value> = pass
        .evaluation
        .discrepancies()
        .iter()
        .map(|d| {
            let mut entry = json!({
                "claim": d.claim,
                "models_with_claim": d.models_with_claim,
                "models_missing_claim": d.models_missing_claim,
            });
            if let (Some(confidence), Value::Object(map)) = (d.confidence, &mut entry) {
                map.insert("confidence".to_string(), json!(confidence));
            }
            entry
        })
        .collect();

    let mut entry = json!({
        "consensus_reached": pass.evaluation.consensus_reached(),
        "discrepancies_count": pass.evaluation.discrepancy_count(),
        "discrepancies": discrepancies,
    });
    if !pass.resolved_claims.is_empty()
        && let Value::Object(map) = &mut entry
    {
        map.insert("resolved_claims".to_string(), json!(pass.resolved_claims));
    }
    entry
}

fn local_time(ms: u64) -> DateTime<Local> {
    DateTime::from_timestamp_millis(ms as i64)
        .unwrap_or_default()
        .with_timezone(&Local)
}

fn write_json(path: &Path, value: &Value) -> Result<(), RecordError> {
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::{
        Discrepancy, Evaluation, Model, PipelineState, Question, ResponseSet, Synthesis,
        SynthesisMode,
    };

    fn responses(text: &str) -> ResponseSet {
        let mut set = ResponseSet::new();
        set.insert(Model::ClaudeHaiku3, text);
        set.insert(Model::Gpt4oMini, "other");
        set
    }

    fn pass(
        state: PipelineState,
        evaluation: Evaluation,
        previous: Option<&Evaluation>,
        text: &str,
    ) -> PassRecord {
        let gate = state.transition(&evaluation);
        PassRecord {
            pass: state.pass_index(),
            responses: responses(text),
            resolved_claims: previous
                .map(|p| evaluation.resolved_since(p))
                .unwrap_or_default(),
            evaluation,
            gate,
        }
    }

    /// A run with one debate round ending in consensus
    fn two_pass_run() -> PipelineRun {
        let disagreement = Evaluation::from_discrepancies(vec![
            Discrepancy::new("Uses a mutex", ["openai/gpt-4o-mini"], ["anthropic/claude-3-haiku"])
                .with_confidence(0.9),
        ]);
        let agreement = Evaluation::consensus();

        let mut builder = PipelineRun::builder(Question::new("How to share state?").unwrap());
        builder.push_pass(pass(PipelineState::Initial, disagreement.clone(), None, "initial"));
        builder.push_pass(pass(
            PipelineState::Debate1 { baseline: 1 },
            agreement,
            Some(&disagreement),
            "revised",
        ));
        builder.finish(Synthesis {
            mode: SynthesisMode::Consensus,
            answer: "Use a mutex.".to_string(),
        })
    }

    #[test]
    fn test_flow_document_layout() {
        let flow = flow_document(&two_pass_run());

        assert_eq!(flow["metadata"]["prompt"], "How to share state?");
        assert!(flow["metadata"]["total_time_seconds"].is_number());

        let pass0 = &flow["critic_pass_0"];
        assert_eq!(pass0["consensus_reached"], false);
        assert_eq!(pass0["discrepancies_count"], 1);
        assert_eq!(pass0["discrepancies"][0]["claim"], "Uses a mutex");
        assert_eq!(pass0["discrepancies"][0]["confidence"], 0.9);
        assert!(pass0.get("resolved_claims").is_none());

        assert_eq!(flow["gate_0_decision"]["route"], "proceed_to_debate_1");
        assert_eq!(flow["critic_pass_1"]["resolved_claims"], json!(["Uses a mutex"]));
        assert_eq!(flow["gate_1_decision"]["route"], "consensus_after_debate_1");
        assert!(flow.get("critic_pass_2").is_none());
        assert_eq!(flow["final_synthesis"]["mode"], "consensus");
        assert_eq!(flow["final_synthesis"]["answer"], "Use a mutex.");
    }

    #[test]
    fn test_confidence_omitted_when_absent() {
        let eval = Evaluation::from_discrepancies(vec![Discrepancy::new("x", ["a"], ["b"])]);
        let entry = critic_pass_entry(&pass(PipelineState::Initial, eval, None, "t"));
        assert!(entry["discrepancies"][0].get("confidence").is_none());
    }

    #[test]
    fn test_write_creates_run_directory() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = JsonRunRecorder::new(dir.path());

        recorder.record(&two_pass_run());

        let run_dir = recorder.last_run_dir().unwrap();
        let name = run_dir.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("run_"));
        assert!(run_dir.join("flow.json").exists());
        assert!(run_dir.join("debate_round_1.json").exists());
        assert!(!run_dir.join("debate_round_2.json").exists());

        let initial: Value = serde_json::from_str(
            &std::fs::read_to_string(run_dir.join("initial_responses.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(initial["anthropic/claude-3-haiku"], "initial");

        let synthesis: Value = serde_json::from_str(
            &std::fs::read_to_string(run_dir.join("final_synthesis.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(synthesis, json!({"mode": "consensus", "answer": "Use a mutex."}));
    }

    #[test]
    fn test_same_second_runs_get_distinct_directories() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = JsonRunRecorder::new(dir.path());
        let run = two_pass_run();

        let first = recorder.write(&run).unwrap();
        let second = recorder.write(&run).unwrap();

        assert_ne!(first, second);
        assert!(second.to_string_lossy().ends_with("_2"));
    }

    #[test]
    fn test_unwritable_root_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();
        let recorder = JsonRunRecorder::new(&file);

        recorder.record(&two_pass_run());

        assert!(recorder.last_run_dir().is_none());
    }
}

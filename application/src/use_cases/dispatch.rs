//! Concurrent fan-out of one prompt to many models
//!
//! Every model gets its own task; the round waits for all of them and
//! collects exactly one outcome per model, failed or not.

use crate::ports::model_gateway::ModelGateway;
use crate::ports::progress::ProgressNotifier;
use debate_domain::{CallFailureKind, Model, ModelCallResult, Phase, ResponseSet};
use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};

/// Spawn `task` once per distinct model and gather every outcome.
///
/// A task that panics or is aborted is recorded as an
/// [`CallFailureKind::Exception`] failure for its model; no other task is
/// affected. Latency is bounded by the slowest task.
pub(crate) async fn fan_out<F, Fut>(
    models: &[Model],
    phase: &Phase,
    progress: &dyn ProgressNotifier,
    task: F,
) -> ResponseSet
where
    F: Fn(Model) -> Fut,
    Fut: Future<Output = ModelCallResult> + Send + 'static,
{
    let mut distinct: Vec<&Model> = Vec::with_capacity(models.len());
    for model in models {
        if !distinct.contains(&model) {
            distinct.push(model);
        }
    }

    progress.on_phase_start(phase, distinct.len());

    let mut pending: FuturesUnordered<_> = distinct
        .into_iter()
        .map(|model| {
            let handle = tokio::spawn(task(model.clone()));
            let model = model.clone();
            async move { (model, handle.await) }
        })
        .collect();

    let mut results = Vec::new();
    while let Some((model, joined)) = pending.next().await {
        let result = match joined {
            Ok(result) => result,
            Err(e) => {
                warn!("Task for {} did not complete: {}", model, e);
                ModelCallResult::failed(model.clone(), CallFailureKind::Exception, e.to_string())
            }
        };

        match &result {
            ModelCallResult::Ok { .. } => info!("Model {} responded successfully", model),
            ModelCallResult::Failed { kind, message, .. } => {
                warn!("Model {} failed ({}): {}", model, kind, message)
            }
        }
        progress.on_task_complete(phase, &model, result.is_ok());
        results.push(result);
    }

    progress.on_phase_complete(phase);
    results.into_iter().collect()
}

/// Sends the same prompt to every model concurrently
pub struct Dispatcher<G: ModelGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: ModelGateway + 'static> Dispatcher<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Run one call per model and collect a [`ResponseSet`] keyed by model
    pub async fn run_all(
        &self,
        models: &[Model],
        prompt: &str,
        phase: &Phase,
        progress: &dyn ProgressNotifier,
    ) -> ResponseSet {
        let prompt: Arc<str> = Arc::from(prompt);
        fan_out(models, phase, progress, |model| {
            let gateway = Arc::clone(&self.gateway);
            let prompt = Arc::clone(&prompt);
            async move { gateway.call(&model, &prompt).await }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use crate::use_cases::scripted_gateway::{Scripted, ScriptedGateway};
    use debate_domain::is_error_text;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    fn three_models() -> Vec<Model> {
        vec![Model::GeminiFlashLite25, Model::ClaudeHaiku3, Model::Gpt4oMini]
    }

    #[tokio::test]
    async fn test_failures_become_error_entries() {
        let gateway = ScriptedGateway::new()
            .script(&Model::GeminiFlashLite25, vec![Scripted::text("alpha")])
            .script(&Model::ClaudeHaiku3, vec![Scripted::timeout()])
            .script(
                &Model::Gpt4oMini,
                vec![Scripted::Fail(
                    CallFailureKind::HttpError,
                    "HTTP 500: boom".to_string(),
                )],
            );
        let dispatcher = Dispatcher::new(Arc::new(gateway));

        let set = dispatcher
            .run_all(&three_models(), "q", &Phase::Initial, &NoProgress)
            .await;

        assert_eq!(set.len(), 3);
        assert_eq!(set.get(&Model::GeminiFlashLite25), Some("alpha"));
        assert_eq!(
            set.get(&Model::ClaudeHaiku3),
            Some("ERROR (timeout): Request timed out after 30 seconds.")
        );
        assert_eq!(
            set.get(&Model::Gpt4oMini),
            Some("ERROR (http_error): HTTP 500: boom")
        );
        assert_eq!(set.failures().count(), 2);
    }

    #[tokio::test]
    async fn test_panicking_task_is_isolated() {
        let gateway = ScriptedGateway::new()
            .script(&Model::GeminiFlashLite25, vec![Scripted::Panic])
            .script(&Model::ClaudeHaiku3, vec![Scripted::text("fine")]);
        let dispatcher = Dispatcher::new(Arc::new(gateway));

        let set = dispatcher
            .run_all(
                &[Model::GeminiFlashLite25, Model::ClaudeHaiku3],
                "q",
                &Phase::Initial,
                &NoProgress,
            )
            .await;

        let failed = set.get(&Model::GeminiFlashLite25).unwrap();
        assert!(failed.starts_with("ERROR (exception): "));
        assert!(is_error_text(failed));
        assert_eq!(set.get(&Model::ClaudeHaiku3), Some("fine"));
    }

    #[tokio::test]
    async fn test_latency_is_max_not_sum() {
        let gateway = ScriptedGateway::new()
            .script(
                &Model::GeminiFlashLite25,
                vec![Scripted::after(200, Scripted::text("a"))],
            )
            .script(
                &Model::ClaudeHaiku3,
                vec![Scripted::after(200, Scripted::text("b"))],
            )
            .script(
                &Model::Gpt4oMini,
                vec![Scripted::after(200, Scripted::text("c"))],
            );
        let dispatcher = Dispatcher::new(Arc::new(gateway));

        let start = Instant::now();
        let set = dispatcher
            .run_all(&three_models(), "q", &Phase::Initial, &NoProgress)
            .await;
        let elapsed = start.elapsed();

        assert_eq!(set.success_count(), 3);
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_millis(550), "took {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_duplicate_models_dispatched_once() {
        let gateway = Arc::new(ScriptedGateway::new());
        let dispatcher = Dispatcher::new(Arc::clone(&gateway));

        let set = dispatcher
            .run_all(
                &[Model::Gpt4oMini, Model::Gpt4oMini],
                "q",
                &Phase::Initial,
                &NoProgress,
            )
            .await;

        assert_eq!(set.len(), 1);
        assert_eq!(gateway.call_count(&Model::Gpt4oMini), 1);
    }

    struct CountingProgress {
        events: Mutex<Vec<String>>,
    }

    impl ProgressNotifier for CountingProgress {
        fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("start {} {}", phase, total_tasks));
        }

        fn on_task_complete(&self, _phase: &Phase, model: &Model, success: bool) {
            self.events
                .lock()
                .unwrap()
                .push(format!("done {} {}", model, success));
        }

        fn on_phase_complete(&self, phase: &Phase) {
            self.events.lock().unwrap().push(format!("end {}", phase));
        }
    }

    #[tokio::test]
    async fn test_progress_reports_every_task() {
        let gateway = ScriptedGateway::new().script(&Model::ClaudeHaiku3, vec![Scripted::timeout()]);
        let dispatcher = Dispatcher::new(Arc::new(gateway));
        let progress = CountingProgress {
            events: Mutex::new(Vec::new()),
        };

        dispatcher
            .run_all(&three_models(), "q", &Phase::Initial, &progress)
            .await;

        let events = progress.events.lock().unwrap();
        assert_eq!(events.first().map(String::as_str), Some("start Initial Responses 3"));
        assert_eq!(events.last().map(String::as_str), Some("end Initial Responses"));
        assert!(events.contains(&"done anthropic/claude-3-haiku false".to_string()));
        assert_eq!(events.iter().filter(|e| e.starts_with("done")).count(), 3);
    }
}

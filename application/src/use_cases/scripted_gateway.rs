//! Scripted model gateway shared by the use-case tests.

use crate::ports::model_gateway::ModelGateway;
use async_trait::async_trait;
use debate_domain::{CallFailureKind, Model, ModelCallResult};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// One scripted reply
#[derive(Debug, Clone)]
pub(crate) enum Scripted {
    Text(String),
    Fail(CallFailureKind, String),
    Panic,
    Delayed(Duration, Box<Scripted>),
}

impl Scripted {
    pub(crate) fn text(s: impl Into<String>) -> Self {
        Scripted::Text(s.into())
    }

    pub(crate) fn timeout() -> Self {
        Scripted::Fail(
            CallFailureKind::Timeout,
            "Request timed out after 30 seconds.".to_string(),
        )
    }

    pub(crate) fn after(ms: u64, reply: Scripted) -> Self {
        Scripted::Delayed(Duration::from_millis(ms), Box::new(reply))
    }
}

/// Gateway that replays per-model queues and records every prompt
pub(crate) struct ScriptedGateway {
    queues: Mutex<HashMap<String, VecDeque<Scripted>>>,
    /// Reply used once a model's queue is empty
    sticky: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedGateway {
    pub(crate) fn new() -> Self {
        Self {
            queues: Mutex::new(HashMap::new()),
            sticky: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue replies for a model, consumed in order
    pub(crate) fn script(self, model: &Model, replies: Vec<Scripted>) -> Self {
        self.queues
            .lock()
            .unwrap()
            .entry(model.to_string())
            .or_default()
            .extend(replies);
        self
    }

    /// Reply given whenever the model's queue is exhausted
    pub(crate) fn always(self, model: &Model, reply: Scripted) -> Self {
        self.sticky.lock().unwrap().insert(model.to_string(), reply);
        self
    }

    /// Prompts sent to the given model, in call order
    pub(crate) fn prompts_for(&self, model: &Model) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == model.as_str())
            .map(|(_, p)| p.clone())
            .collect()
    }

    pub(crate) fn call_count(&self, model: &Model) -> usize {
        self.prompts_for(model).len()
    }

    fn next_reply(&self, model: &Model) -> Scripted {
        if let Some(reply) = self
            .queues
            .lock()
            .unwrap()
            .get_mut(model.as_str())
            .and_then(VecDeque::pop_front)
        {
            return reply;
        }
        self.sticky
            .lock()
            .unwrap()
            .get(model.as_str())
            .cloned()
            .unwrap_or_else(|| Scripted::text("(default response)"))
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    async fn call(&self, model: &Model, prompt: &str) -> ModelCallResult {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));

        let mut reply = self.next_reply(model);
        loop {
            match reply {
                Scripted::Text(text) => return ModelCallResult::ok(model.clone(), text),
                Scripted::Fail(kind, message) => {
                    return ModelCallResult::failed(model.clone(), kind, message);
                }
                Scripted::Panic => panic!("scripted panic for {}", model),
                Scripted::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    reply = *inner;
                }
            }
        }
    }
}

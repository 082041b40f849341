//! One round's snapshot of model → response text.

use super::outcome::{ModelCallResult, is_error_text};
use crate::core::model::Model;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Responses gathered in one round, keyed and ordered by model identifier.
///
/// Holds exactly one entry per model dispatched in the round; failed calls
/// are present as normalized error strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet {
    entries: BTreeMap<Model, String>,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a response, replacing any previous entry for the model
    pub fn insert(&mut self, model: Model, text: impl Into<String>) {
        self.entries.insert(model, text.into());
    }

    pub fn get(&self, model: &Model) -> Option<&str> {
        self.entries.get(model).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Model, &str)> {
        self.entries.iter().map(|(m, t)| (m, t.as_str()))
    }

    /// Entries whose text is a normalized error string
    pub fn failures(&self) -> impl Iterator<Item = (&Model, &str)> {
        self.iter().filter(|(_, text)| is_error_text(text))
    }

    pub fn success_count(&self) -> usize {
        self.len() - self.failures().count()
    }
}

impl FromIterator<ModelCallResult> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = ModelCallResult>>(iter: I) -> Self {
        let mut set = ResponseSet::new();
        for result in iter {
            let model = result.model().clone();
            set.insert(model, result.into_response_text());
        }
        set
    }
}

impl FromIterator<(Model, String)> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = (Model, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::outcome::CallFailureKind;

    #[test]
    fn test_collect_from_results_keeps_failures() {
        let set: ResponseSet = vec![
            ModelCallResult::ok(Model::Gpt4oMini, "Paris"),
            ModelCallResult::failed(Model::ClaudeHaiku3, CallFailureKind::HttpError, "HTTP 502"),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(&Model::Gpt4oMini), Some("Paris"));
        assert_eq!(
            set.get(&Model::ClaudeHaiku3),
            Some("ERROR (http_error): HTTP 502")
        );
        assert_eq!(set.success_count(), 1);
    }

    #[test]
    fn test_iteration_is_ordered_by_identifier() {
        let set: ResponseSet = vec![
            (Model::Gpt4oMini, "c".to_string()),
            (Model::ClaudeHaiku3, "a".to_string()),
            (Model::GeminiFlashLite25, "b".to_string()),
        ]
        .into_iter()
        .collect();

        let order: Vec<&str> = set.models().map(Model::as_str).collect();
        assert_eq!(
            order,
            vec![
                "anthropic/claude-3-haiku",
                "google/gemini-2.5-flash-lite",
                "openai/gpt-4o-mini"
            ]
        );
    }

    #[test]
    fn test_serializes_as_object() {
        let mut set = ResponseSet::new();
        set.insert(Model::Gpt4oMini, "yes");
        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(value["openai/gpt-4o-mini"], "yes");
    }
}

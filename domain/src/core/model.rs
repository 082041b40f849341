//! Model value object representing an LLM endpoint identifier

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A model reachable through the gateway (Value Object)
///
/// Identifiers follow the `vendor/model` convention of OpenAI-compatible
/// routers. The well-known variants are the defaults for each debate role;
/// anything else is carried as [`Model::Custom`].
#[derive(Debug, Clone)]
pub enum Model {
    GeminiFlashLite25,
    ClaudeHaiku3,
    Gpt4oMini,
    DeepSeekV32,
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::GeminiFlashLite25 => "google/gemini-2.5-flash-lite",
            Model::ClaudeHaiku3 => "anthropic/claude-3-haiku",
            Model::Gpt4oMini => "openai/gpt-4o-mini",
            Model::DeepSeekV32 => "deepseek/deepseek-v3.2",
            Model::Custom(s) => s,
        }
    }

    /// Models that answer the question and take part in debate rounds
    pub fn default_participants() -> Vec<Model> {
        vec![Model::GeminiFlashLite25, Model::ClaudeHaiku3, Model::Gpt4oMini]
    }

    /// Model that compares responses and names discrepancies
    pub fn default_critic() -> Model {
        Model::DeepSeekV32
    }

    /// Cheap classifier deciding whether a debate reply is a bare re-affirmation
    pub fn default_agreement() -> Model {
        Model::Gpt4oMini
    }

    /// Model that writes the final answer
    pub fn default_synthesizer() -> Model {
        Model::DeepSeekV32
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "google/gemini-2.5-flash-lite" => Model::GeminiFlashLite25,
            "anthropic/claude-3-haiku" => Model::ClaudeHaiku3,
            "openai/gpt-4o-mini" => Model::Gpt4oMini,
            "deepseek/deepseek-v3.2" => Model::DeepSeekV32,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

// Identity is the identifier string: a `Custom` spelling of a well-known id
// is the same model, and response sets are ordered by identifier.
impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Model {}

impl Hash for Model {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialOrd for Model {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Model {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for model in Model::default_participants() {
            let s = model.to_string();
            let parsed: Model = s.parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_custom_model() {
        let model = Model::from("mistralai/mistral-large");
        assert_eq!(model, Model::Custom("mistralai/mistral-large".to_string()));
        assert_eq!(model.as_str(), "mistralai/mistral-large");
    }

    #[test]
    fn test_known_and_custom_compare_by_identifier() {
        let custom_same = Model::Custom("openai/gpt-4o-mini".to_string());
        assert_eq!(Model::Gpt4oMini.cmp(&custom_same), Ordering::Equal);
        assert_eq!(Model::Gpt4oMini, custom_same);
        assert!(Model::ClaudeHaiku3 < Model::GeminiFlashLite25);
    }

    #[test]
    fn test_custom_spelling_shares_hash_and_map_slot() {
        use std::collections::{BTreeMap, HashSet};

        let custom_same = Model::Custom("openai/gpt-4o-mini".to_string());
        let set: HashSet<Model> = [Model::Gpt4oMini, custom_same.clone()].into_iter().collect();
        assert_eq!(set.len(), 1);

        let mut map = BTreeMap::new();
        map.insert(Model::Gpt4oMini, "first");
        map.insert(custom_same.clone(), "second");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&Model::Gpt4oMini), Some(&"second"));
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&Model::DeepSeekV32).unwrap();
        assert_eq!(json, "\"deepseek/deepseek-v3.2\"");
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Model::DeepSeekV32);
    }
}

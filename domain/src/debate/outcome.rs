//! Tagged outcome of a single model call.
//!
//! A failed call is a value, not an error: callers inspect it and substitute
//! a normalized error string for the model's response.

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Why a model call produced no usable text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallFailureKind {
    /// The per-call deadline elapsed
    Timeout,
    /// The endpoint answered with a non-2xx status
    HttpError,
    /// Connection, TLS or other transport-level failure
    TransportError,
    /// The body lacked the expected text field or was not JSON
    MalformedResponse,
    /// The call task panicked or was aborted before settling
    Exception,
}

impl CallFailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallFailureKind::Timeout => "timeout",
            CallFailureKind::HttpError => "http_error",
            CallFailureKind::TransportError => "transport_error",
            CallFailureKind::MalformedResponse => "malformed_response",
            CallFailureKind::Exception => "exception",
        }
    }
}

impl std::fmt::Display for CallFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one gateway call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModelCallResult {
    Ok {
        model: Model,
        text: String,
    },
    Failed {
        model: Model,
        kind: CallFailureKind,
        message: String,
    },
}

impl ModelCallResult {
    pub fn ok(model: Model, text: impl Into<String>) -> Self {
        ModelCallResult::Ok {
            model,
            text: text.into(),
        }
    }

    pub fn failed(model: Model, kind: CallFailureKind, message: impl Into<String>) -> Self {
        ModelCallResult::Failed {
            model,
            kind,
            message: message.into(),
        }
    }

    pub fn model(&self) -> &Model {
        match self {
            ModelCallResult::Ok { model, .. } | ModelCallResult::Failed { model, .. } => model,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ModelCallResult::Ok { .. })
    }

    /// The text to place in a [`ResponseSet`](super::response_set::ResponseSet):
    /// raw output on success, `ERROR (<kind>): <message>` on failure.
    pub fn into_response_text(self) -> String {
        match self {
            ModelCallResult::Ok { text, .. } => text,
            ModelCallResult::Failed { kind, message, .. } => error_text(kind, &message),
        }
    }
}

/// Format the normalized error string substituted for a failed response
pub fn error_text(kind: CallFailureKind, message: &str) -> String {
    format!("ERROR ({}): {}", kind, message)
}

/// Whether a response text is a normalized error rather than model output
pub fn is_error_text(text: &str) -> bool {
    text.starts_with("ERROR (") && text.contains("): ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_keeps_raw_text() {
        let result = ModelCallResult::ok(Model::Gpt4oMini, "  42  ");
        assert!(result.is_ok());
        assert_eq!(result.into_response_text(), "  42  ");
    }

    #[test]
    fn test_failed_normalizes_to_error_text() {
        let result = ModelCallResult::failed(
            Model::ClaudeHaiku3,
            CallFailureKind::Timeout,
            "Request timed out after 30 seconds.",
        );
        assert_eq!(result.model(), &Model::ClaudeHaiku3);
        let text = result.into_response_text();
        assert_eq!(text, "ERROR (timeout): Request timed out after 30 seconds.");
        assert!(is_error_text(&text));
    }

    #[test]
    fn test_is_error_text_ignores_prose() {
        assert!(!is_error_text("ERROR handling in Rust uses Result"));
        assert!(is_error_text("ERROR (exception): task panicked"));
    }
}

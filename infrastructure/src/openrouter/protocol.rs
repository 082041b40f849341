//! Chat-completions wire types and pure response handling

use serde::{Deserialize, Serialize};

/// Maximum number of characters of an error body kept in messages
pub const ERROR_BODY_MAX_CHARS: usize = 300;

/// Request body for `POST {base_url}/chat/completions`
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> ChatRequest<'a> {
    /// Single user-turn request
    pub fn user(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Endpoint URL for a base URL, tolerating a trailing slash
pub fn completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

/// Pull `choices[0].message.content` out of a response body.
///
/// The error string is the message for a `malformed_response` failure.
pub fn extract_content(body: &str) -> Result<String, String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| format!("Malformed response payload: {}", e))?;

    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| "Malformed response payload: no choices".to_string())?
        .message
        .content
        .ok_or_else(|| "Malformed response payload: missing message content".to_string())
}

/// Message for a non-2xx response: status code plus the start of the body
pub fn http_error_message(status: u16, body: &str) -> String {
    let snippet: String = body.chars().take(ERROR_BODY_MAX_CHARS).collect();
    format!("HTTP {}: {}", status, snippet)
}

/// Message for a call that exceeded the timeout
pub fn timeout_message(secs: u64) -> String {
    format!("Request timed out after {} seconds.", secs)
}

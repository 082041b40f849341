//! Parsing of free-form model output into structured verdicts.
//!
//! Pure text handling, no I/O.
//!
//! | Function | Input | Output |
//! |----------|-------|--------|
//! | [`parse_critic_verdict`] | Critic reply (JSON, maybe fenced) | [`CriticVerdict`] |
//! | [`parse_agreement_verdict`] | Classifier reply | `true` / `false` |

use super::evaluation::CriticVerdict;
use crate::core::error::DomainError;

/// Remove a surrounding markdown code fence (```` ``` ```` or ```` ```json ````).
pub fn strip_markdown_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string ("json", "JSON", ...) up to the first newline
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };
    body.trim_end().trim_end_matches("```").trim()
}

/// Parse the critic's reply into a [`CriticVerdict`].
///
/// Accepts raw JSON, fenced JSON, or JSON embedded in surrounding prose
/// (the outermost `{ ... }` span is tried as a fallback).
pub fn parse_critic_verdict(raw: &str) -> Result<CriticVerdict, DomainError> {
    let cleaned = strip_markdown_fences(raw);

    let direct = serde_json::from_str::<CriticVerdict>(cleaned);
    let first_error = match direct {
        Ok(verdict) => return Ok(verdict),
        Err(e) => e,
    };

    if let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}')) {
        if start < end {
            if let Ok(verdict) = serde_json::from_str::<CriticVerdict>(&cleaned[start..=end]) {
                return Ok(verdict);
            }
        }
    }

    Err(DomainError::MalformedEvaluation(first_error.to_string()))
}

/// Whether the agreement classifier answered "true".
///
/// Anything other than a bare `true` (case-insensitive, surrounding
/// whitespace ignored) counts as "not a trivial agreement".
pub fn parse_agreement_verdict(reply: &str) -> bool {
    reply.trim().eq_ignore_ascii_case("true")
}

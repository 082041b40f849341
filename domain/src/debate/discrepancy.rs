//! Discrepancies and their stable claim identifiers.
//!
//! A claim's identity across rounds is a slug derived from its text, so the
//! critic can be told "these ids were open last pass" and reuse them for
//! claims that persist under new wording.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Maximum length of a derived claim id, in characters
pub const CLAIM_ID_MAX_LEN: usize = 40;

/// One material disagreement between participants.
///
/// `models_missing_claim` is never empty and never overlaps
/// `models_with_claim`; [`Evaluation`](super::evaluation::Evaluation)
/// construction enforces both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discrepancy {
    pub claim_id: String,
    pub claim: String,
    pub models_with_claim: BTreeSet<String>,
    pub models_missing_claim: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Discrepancy {
    /// Create a discrepancy with an id derived from the claim text
    pub fn new<W, M>(claim: impl Into<String>, with: W, missing: M) -> Self
    where
        W: IntoIterator,
        W::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        let claim = claim.into();
        Self {
            claim_id: derive_claim_id(&claim),
            claim,
            models_with_claim: with.into_iter().map(Into::into).collect(),
            models_missing_claim: missing.into_iter().map(Into::into).collect(),
            confidence: None,
        }
    }

    pub fn with_claim_id(mut self, claim_id: impl Into<String>) -> Self {
        self.claim_id = claim_id.into();
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }

    /// Whether the given model is listed as not asserting this claim
    pub fn is_missed_by(&self, model: &str) -> bool {
        self.models_missing_claim.contains(model)
    }
}

/// Derive a stable slug from claim text.
///
/// Lower-cases, drops everything except word characters, whitespace and
/// hyphens, turns each whitespace run into one hyphen, keeps the first
/// [`CLAIM_ID_MAX_LEN`] characters and trims hyphens from both ends.
pub fn derive_claim_id(claim: &str) -> String {
    let kept: String = claim
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_' || *c == '-')
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut in_whitespace = false;
    for c in kept.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(c);
            in_whitespace = false;
        }
    }

    let truncated: String = slug.chars().take(CLAIM_ID_MAX_LEN).collect();
    truncated.trim_matches('-').to_string()
}

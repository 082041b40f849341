//! Evaluation of one pass: consensus verdict plus surviving discrepancies.
//!
//! [`CriticVerdict`] is what the critic model returns, untrusted.
//! [`Evaluation`] is the normalized form the pipeline routes on.

use super::discrepancy::{Discrepancy, derive_claim_id};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// A discrepancy exactly as the critic reported it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticDiscrepancy {
    #[serde(default)]
    pub claim_id: Option<String>,
    pub claim: String,
    #[serde(default)]
    pub models_with_claim: Vec<String>,
    #[serde(default)]
    pub models_missing_claim: Vec<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// The critic's raw answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticVerdict {
    pub consensus_reached: bool,
    #[serde(default)]
    pub discrepancies: Vec<CriticDiscrepancy>,
}

/// Normalized result of one evaluation pass.
///
/// `consensus_reached` is true exactly when `discrepancies` is empty.
/// Deserialized values go through [`Evaluation::from_discrepancies`], so a
/// stored flag that contradicts the list is recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredEvaluation")]
pub struct Evaluation {
    consensus_reached: bool,
    discrepancies: Vec<Discrepancy>,
}

/// Wire shape of an [`Evaluation`]; the stored flag is ignored
#[derive(Deserialize)]
struct StoredEvaluation {
    #[serde(default)]
    discrepancies: Vec<Discrepancy>,
}

impl From<StoredEvaluation> for Evaluation {
    fn from(stored: StoredEvaluation) -> Self {
        Evaluation::from_discrepancies(stored.discrepancies)
    }
}

impl Evaluation {
    /// Consensus with nothing left to contest
    pub fn consensus() -> Self {
        Self {
            consensus_reached: true,
            discrepancies: Vec::new(),
        }
    }

    /// Build an evaluation from discrepancies, dropping invalid ones.
    ///
    /// Models listed on both sides are removed from the missing side, then
    /// any discrepancy with nobody missing the claim is discarded. Claim ids
    /// are made unique within the evaluation by suffixing repeats.
    pub fn from_discrepancies(discrepancies: Vec<Discrepancy>) -> Self {
        let mut seen_ids: HashSet<String> = HashSet::new();
        let mut kept = Vec::with_capacity(discrepancies.len());

        for mut d in discrepancies {
            let holders = d.models_with_claim.clone();
            d.models_missing_claim.retain(|m| !holders.contains(m));
            if d.models_missing_claim.is_empty() {
                continue;
            }
            if d.claim_id.is_empty() {
                d.claim_id = derive_claim_id(&d.claim);
            }
            d.claim_id = unique_id(&d.claim_id, &mut seen_ids);
            kept.push(d);
        }

        Self {
            consensus_reached: kept.is_empty(),
            discrepancies: kept,
        }
    }

    /// Normalize the critic's verdict.
    ///
    /// The critic's own `consensus_reached` flag is not trusted: the result
    /// is consensus iff no discrepancy survives filtering, even when the
    /// critic claimed otherwise.
    pub fn from_verdict(verdict: CriticVerdict) -> Self {
        let discrepancies = verdict
            .discrepancies
            .into_iter()
            .map(|raw| {
                let mut d =
                    Discrepancy::new(raw.claim, raw.models_with_claim, raw.models_missing_claim);
                if let Some(id) = raw.claim_id.filter(|id| !id.trim().is_empty()) {
                    d = d.with_claim_id(id);
                }
                if let Some(confidence) = raw.confidence {
                    d = d.with_confidence(confidence);
                }
                d
            })
            .collect();

        Self::from_discrepancies(discrepancies)
    }

    pub fn consensus_reached(&self) -> bool {
        self.consensus_reached
    }

    pub fn discrepancies(&self) -> &[Discrepancy] {
        &self.discrepancies
    }

    pub fn discrepancy_count(&self) -> usize {
        self.discrepancies.len()
    }

    pub fn claim_ids(&self) -> BTreeSet<&str> {
        self.discrepancies
            .iter()
            .map(|d| d.claim_id.as_str())
            .collect()
    }

    /// Discrepancies the given model failed to assert
    pub fn missed_by<'a>(&'a self, model: &'a str) -> impl Iterator<Item = &'a Discrepancy> + 'a {
        self.discrepancies.iter().filter(move |d| d.is_missed_by(model))
    }

    /// Claims open in `previous` whose id no longer appears here, sorted by text
    pub fn resolved_since(&self, previous: &Evaluation) -> Vec<String> {
        let current = self.claim_ids();
        let mut resolved: Vec<String> = previous
            .discrepancies
            .iter()
            .filter(|d| !current.contains(d.claim_id.as_str()))
            .map(|d| d.claim.clone())
            .collect();
        resolved.sort();
        resolved.dedup();
        resolved
    }
}

fn unique_id(base: &str, seen: &mut HashSet<String>) -> String {
    let base = if base.is_empty() { "claim" } else { base };
    if seen.insert(base.to_string()) {
        return base.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", base, n);
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

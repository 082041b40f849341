//! Prompt templates for each stage of a debate run

use crate::debate::discrepancy::Discrepancy;
use crate::debate::evaluation::Evaluation;
use crate::debate::response_set::ResponseSet;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt sent to every participant in the initial round
    pub fn initial_query(question: &str) -> String {
        question.to_string()
    }

    /// Prompt asking the critic to list material discrepancies.
    ///
    /// When a previous evaluation with open discrepancies is given, the critic
    /// is asked to judge whether each one persists and to reuse its `claim_id`.
    pub fn critic(responses: &ResponseSet, previous: Option<&Evaluation>) -> String {
        let model_names: Vec<String> = responses
            .models()
            .map(|m| format!("'{}'", m.as_str()))
            .collect();

        let mut prompt = format!(
            r#"You are an expert Technical Auditor and the core decision engine for a multi-agent AI system.
Your job is to analyze the responses of several different AI models to a specific User Prompt and determine if they have reached a functional consensus.

Your primary goal is to identify MATERIAL and FACTUAL discrepancies.

### What CONSTITUTES a Discrepancy:
* Direct contradictions in facts, math, or logic (e.g., Model A says X is True, Model B says X is False).
* Conflicting code implementations that would result in different programmatic behavior or bugs.
* A critical omission by one model that compromises the safety, accuracy, or functionality of the answer.

### What DOES NOT Constitute a Discrepancy (IGNORE THESE):
* Stylistic differences, tone, or verbosity.
* Different formatting (e.g., Markdown tables vs. bulleted lists).
* Variable naming conventions or functionally identical code structures.
* Additive information that does not change the answer. This is a synthesis feature, not a discrepancy.

---

Below are responses from {} different models:

{}

Model names available: [{}]
"#,
            responses.len(),
            Self::format_responses(responses),
            model_names.join(", ")
        );

        match previous.filter(|eval| !eval.discrepancies().is_empty()) {
            Some(eval) => {
                let reference: Vec<String> = eval
                    .discrepancies()
                    .iter()
                    .map(|d| format!("  - claim_id: \"{}\"\n    claim: \"{}\"", d.claim_id, d.claim))
                    .collect();
                prompt.push_str(&format!(
                    r#"
---

### IMPORTANT: Previous Discrepancies Reference

In the PREVIOUS evaluation pass, these discrepancies were identified. Your task is to determine if they still exist.

{}

### Instructions for This Pass:
1.  **Analyze Previous Claims**: For each `claim_id` above, check if the discrepancy still exists in the new responses. Look for the *semantic meaning* of the claim, not an exact textual match.
2.  **Preserve Existing Claims**: If a discrepancy persists, you MUST use the exact `claim_id` and `claim` text from the reference above in your JSON output.
3.  **Identify New Claims**: If you find a completely new discrepancy not listed above, add it to the `discrepancies` list without a `claim_id`.
4.  **Consensus**: If all previous discrepancies are resolved and no new ones are found, set `consensus_reached` to `true`.
5.  **Confidence Score**: For each discrepancy, provide a `confidence` score (0.0 to 1.0, in increments of 0.1) indicating your certainty that it is a genuine, material discrepancy.
6.  **Note on Agreements**: If a model's response simply re-affirms its previous answer, its original claims are carried over.

### Output Schema
Your output MUST be a single, raw JSON object matching this schema.

```json
{{
  "consensus_reached": true or false,
  "discrepancies": [
    {{
      "claim_id": "optional-existing-id-from-reference",
      "claim": "The specific fact/logic in question. MUST match reference if `claim_id` is used.",
      "models_with_claim": ["model1", "model2"],
      "models_missing_claim": ["model3"],
      "confidence": 0.9
    }}
  ]
}}
```
"#,
                    reference.join("\n")
                ));
            }
            None => {
                prompt.push_str(
                    r#"
---

### Instructions for This Pass:
1.  **Identify All Discrepancies**: Identify all material, factual discrepancies. A discrepancy exists when at least one model makes a claim that another model omits or contradicts.
2.  **Consensus**: If there are no discrepancies, set `consensus_reached` to `true`.
3.  **Output Schema**: Your output MUST be a single, raw JSON object matching this schema. Do not add a `claim_id` on this first pass.
4.  **Critical Rule**: The `models_missing_claim` array for any given discrepancy CANNOT be empty. If all models agree on a claim, it is NOT a discrepancy.

```json
{
  "consensus_reached": true or false,
  "discrepancies": [
    {
      "claim": "The specific fact/logic in question",
      "models_with_claim": ["model1", "model2"],
      "models_missing_claim": ["model3"]
    }
  ]
}
```
"#,
                );
            }
        }

        prompt
    }

    /// Targeted re-prompt for one participant.
    ///
    /// `missed_claims` are the claims other models made that this one did not.
    pub fn debate(question: &str, prior_answer: &str, missed_claims: &[&str]) -> String {
        if missed_claims.is_empty() {
            return format!(
                r#"Original Question: {}

Your Initial Response:
{}

A parallel review found no significant discrepancies in your response. Please review your answer one more time and confirm or refine it if needed."#,
                question, prior_answer
            );
        }

        let claims: Vec<String> = missed_claims.iter().map(|c| format!("- {}", c)).collect();
        format!(
            r#"Original Question: {}

Your Initial Response:
{}

In a parallel review, other models mentioned the following claims/points that you did not include:
{}

Does this information change your reasoning? If so, why? Please re-evaluate your original response and provide an updated answer."#,
            question,
            prior_answer,
            claims.join("\n")
        )
    }

    /// Classification prompt: is this reply a bare re-affirmation?
    pub fn agreement(reply: &str) -> String {
        format!(
            r#"You are a text classification model. Your task is to determine if the following text is a simple agreement with a previous statement.

A simple agreement is a response that does not add any new information or claims, but simply confirms that the previous response was good.

Respond with "true" if the text is a simple agreement, and "false" otherwise.

---

Text:
{}

---

Is this a simple agreement? (true/false)
"#,
            reply
        )
    }

    /// Final answer prompt when the models converged
    pub fn consensus_synthesis(question: &str, responses: &ResponseSet) -> String {
        format!(
            r#"You are an expert synthesizer tasked with creating the definitive "gold standard" answer to a question.

Original Question:
{}

Below are the final responses from multiple AI models. Where debate rounds took place, the models have already reviewed the discrepancies identified by a critic and re-evaluated their positions.

{}

Your task:
1. Analyze all the responses carefully
2. Identify the most accurate, complete, and well-reasoned points
3. Synthesize these insights into a single, authoritative answer
4. Ensure your answer is clear, concise, and comprehensive

Provide the final synthesized answer:"#,
            question,
            Self::format_responses(responses)
        )
    }

    /// Final answer prompt when the models could not converge
    pub fn divergence_synthesis(
        question: &str,
        responses: &ResponseSet,
        discrepancies: &[Discrepancy],
    ) -> String {
        format!(
            r#"You are an expert synthesizer tasked with creating a transparent, balanced answer when AI models could NOT reach consensus.

Original Question:
{}

The models went through multiple debate rounds but still have material disagreements:

REMAINING DISCREPANCIES:
{}

FINAL MODEL RESPONSES:
{}

Your task:
1. Acknowledge that the models diverged on specific material points
2. Clearly explain the TRADE-OFFS and different approaches taken by the models
3. If possible, explain WHY the models might legitimately disagree
4. Provide a balanced synthesis that helps the user understand the different perspectives
5. If one approach is clearly superior, say so - but if both are valid, present them neutrally

DO NOT force a false consensus. Transparency about disagreement is valuable.

Provide the divergence-aware synthesized answer:"#,
            question,
            Self::format_discrepancies(discrepancies),
            Self::format_responses(responses)
        )
    }

    fn format_responses(responses: &ResponseSet) -> String {
        responses
            .iter()
            .map(|(model, text)| format!("**{}**:\n{}", model, text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn format_discrepancies(discrepancies: &[Discrepancy]) -> String {
        discrepancies
            .iter()
            .map(|d| {
                let with: Vec<&str> = d.models_with_claim.iter().map(String::as_str).collect();
                let without: Vec<&str> =
                    d.models_missing_claim.iter().map(String::as_str).collect();
                format!(
                    "- {}\n  (Models with: {}; Models without: {})",
                    d.claim,
                    with.join(", "),
                    without.join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

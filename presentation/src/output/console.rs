//! Console output formatter for debate runs

use colored::Colorize;
use debate_domain::util::preview;
use debate_domain::{
    Discrepancy, OutputFormat, PassRecord, PipelineRun, ResponseSet, SynthesisMode,
};

/// Responses are shortened to this many characters in the full view
const PREVIEW_CHARS: usize = 150;

/// Formats debate runs for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a run in the requested output format
    pub fn render(run: &PipelineRun, format: OutputFormat) -> String {
        match format {
            OutputFormat::Answer => Self::format_answer(run),
            OutputFormat::Full => Self::format_full(run),
            OutputFormat::Json => Self::format_json(run),
        }
    }

    /// Every pass, its discrepancies and gate, then the final answer
    pub fn format_full(run: &PipelineRun) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Debate Quorum Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Question:".cyan().bold(),
            run.question()
        ));

        if let Some(initial) = run.initial_responses() {
            let models: Vec<&str> = initial.models().map(|m| m.as_str()).collect();
            output.push_str(&format!(
                "{} {}\n",
                "Participants:".cyan().bold(),
                models.join(", ")
            ));
        }

        for pass in run.passes() {
            output.push_str(&Self::format_pass(pass));
        }

        let title = match run.mode() {
            SynthesisMode::Consensus => "Final Answer (consensus)",
            SynthesisMode::Divergence => "Final Answer (divergence)",
        };
        output.push_str(&Self::section_header(title));
        output.push_str(&format!("\n{}\n", run.answer()));

        output.push_str(&format!(
            "\n{} {} debate round(s), {:.1}s\n",
            "Completed:".dimmed(),
            run.debate_rounds(),
            run.elapsed_secs()
        ));
        output.push_str(&Self::footer());

        output
    }

    /// Final answer only
    pub fn format_answer(run: &PipelineRun) -> String {
        format!("{}\n", run.answer())
    }

    /// The whole run as pretty JSON
    pub fn format_json(run: &PipelineRun) -> String {
        serde_json::to_string_pretty(run).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_pass(pass: &PassRecord) -> String {
        let mut output = String::new();
        let title = if pass.pass == 0 {
            "Pass 0: Initial Responses".to_string()
        } else {
            format!("Pass {}: Debate Round {}", pass.pass, pass.pass)
        };
        output.push_str(&Self::section_header(&title));
        output.push_str(&Self::format_responses(&pass.responses));

        let discrepancies = pass.evaluation.discrepancies();
        if discrepancies.is_empty() {
            output.push_str(&format!("\n{}\n", "No material discrepancies.".green()));
        } else {
            output.push_str(&format!(
                "\n{} ({})\n",
                "Discrepancies:".yellow().bold(),
                discrepancies.len()
            ));
            for discrepancy in discrepancies {
                output.push_str(&Self::format_discrepancy(discrepancy));
            }
        }

        if !pass.resolved_claims.is_empty() {
            output.push_str(&format!("\n{}\n", "Resolved:".green().bold()));
            for claim in &pass.resolved_claims {
                output.push_str(&format!("  * {}\n", claim));
            }
        }

        output.push_str(&format!(
            "\n{} {} ({})\n",
            format!("Gate {}:", pass.gate.gate).cyan().bold(),
            pass.gate.route,
            pass.gate.reason
        ));
        output
    }

    fn format_responses(responses: &ResponseSet) -> String {
        let mut output = String::new();
        for (model, text) in responses.iter() {
            let heading = format!("── {} ──", model);
            let heading = if debate_domain::is_error_text(text) {
                heading.red().bold()
            } else {
                heading.yellow().bold()
            };
            output.push_str(&format!("\n{}\n{}\n", heading, preview(text, PREVIEW_CHARS)));
        }
        output
    }

    fn format_discrepancy(discrepancy: &Discrepancy) -> String {
        let with: Vec<&str> = discrepancy
            .models_with_claim
            .iter()
            .map(String::as_str)
            .collect();
        let missing: Vec<&str> = discrepancy
            .models_missing_claim
            .iter()
            .map(String::as_str)
            .collect();
        format!(
            "  * [{}] {}\n      with: {}\n      missing: {}\n",
            discrepancy.claim_id,
            discrepancy.claim,
            with.join(", "),
            missing.join(", ")
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}

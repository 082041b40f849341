//! Progress reporting for debate runs

use colored::Colorize;
use debate_application::ports::progress::{NoProgress, ProgressNotifier};
use debate_domain::{Evaluation, GateDecision, Model, Phase};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one indicatif bar per phase
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn println(&self, line: String) {
        // Printing through MultiProgress keeps the line above active bars
        if self.multi.println(&line).is_err() {
            eprintln!("{}", line);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(phase.display_name());
        pb.set_message("Starting...");
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _phase: &Phase, model: &Model, success: bool) {
        let Ok(slot) = self.phase_bar.lock() else {
            return;
        };
        if let Some(pb) = slot.as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), model)
            } else {
                format!("{} {}", "x".red(), model)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: &Phase) {
        let Ok(mut slot) = self.phase_bar.lock() else {
            return;
        };
        if let Some(pb) = slot.take() {
            pb.finish_with_message(format!("{} complete", phase.display_name().green()));
        }
    }

    fn on_evaluation(&self, pass: usize, evaluation: &Evaluation) {
        self.println(evaluation_line(pass, evaluation));
    }

    fn on_gate(&self, decision: &GateDecision) {
        self.println(gate_line(decision));
    }
}

/// Plain line-based progress (no bars)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            phase.display_name().bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _phase: &Phase, model: &Model, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), model);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), model);
        }
    }

    fn on_phase_complete(&self, _phase: &Phase) {}

    fn on_evaluation(&self, pass: usize, evaluation: &Evaluation) {
        eprintln!("{}", evaluation_line(pass, evaluation));
    }

    fn on_gate(&self, decision: &GateDecision) {
        eprintln!("{}", gate_line(decision));
    }
}

/// How progress is shown on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    Hidden,
    Bars,
    Plain,
}

impl ProgressMode {
    /// `--quiet` hides progress; `--plain` or a non-terminal stderr gets plain lines
    pub fn select(quiet: bool, plain: bool, stderr_is_terminal: bool) -> Self {
        if quiet {
            ProgressMode::Hidden
        } else if plain || !stderr_is_terminal {
            ProgressMode::Plain
        } else {
            ProgressMode::Bars
        }
    }

    pub fn notifier(self) -> Box<dyn ProgressNotifier> {
        match self {
            ProgressMode::Hidden => Box::new(NoProgress),
            ProgressMode::Bars => Box::new(ProgressReporter::new()),
            ProgressMode::Plain => Box::new(SimpleProgress),
        }
    }
}

fn evaluation_line(pass: usize, evaluation: &Evaluation) -> String {
    if evaluation.consensus_reached() {
        format!("  {} pass {}: consensus", "=".green(), pass)
    } else {
        format!(
            "  {} pass {}: {} discrepancy(ies)",
            "!".yellow(),
            pass,
            evaluation.discrepancy_count()
        )
    }
}

fn gate_line(decision: &GateDecision) -> String {
    format!(
        "  {} gate {}: {} ({})",
        "#".cyan(),
        decision.gate,
        decision.route,
        decision.reason
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::{Discrepancy, PipelineState};

    #[test]
    fn test_evaluation_line_counts_discrepancies() {
        colored::control::set_override(false);
        let evaluation = Evaluation::from_discrepancies(vec![Discrepancy::new(
            "claim",
            ["a"],
            ["b"],
        )]);
        assert_eq!(evaluation_line(1, &evaluation), "  ! pass 1: 1 discrepancy(ies)");
        assert_eq!(
            evaluation_line(0, &Evaluation::consensus()),
            "  = pass 0: consensus"
        );
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(ProgressMode::select(true, true, true), ProgressMode::Hidden);
        assert_eq!(ProgressMode::select(false, false, true), ProgressMode::Bars);
        assert_eq!(ProgressMode::select(false, true, true), ProgressMode::Plain);
        assert_eq!(ProgressMode::select(false, false, false), ProgressMode::Plain);
    }

    #[test]
    fn test_gate_line_names_route() {
        colored::control::set_override(false);
        let decision = PipelineState::Initial.transition(&Evaluation::consensus());
        let line = gate_line(&decision);
        assert!(line.starts_with("  # gate 0: fast_path_consensus ("));
    }
}

//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for debate results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the final answer
    Answer,
    /// Every pass, discrepancy and gate decision, then the answer
    Full,
    /// The whole run as JSON
    Json,
}

impl From<OutputFormat> for debate_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Answer => debate_domain::OutputFormat::Answer,
            OutputFormat::Full => debate_domain::OutputFormat::Full,
            OutputFormat::Json => debate_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for debate-quorum
#[derive(Parser, Debug)]
#[command(name = "debate-quorum")]
#[command(author, version, about = "Multi-model debate - models answer, argue and converge")]
#[command(long_about = r#"
Debate Quorum asks several models the same question, finds where their
answers materially disagree, and lets them reconcile before one final answer.

The process:
1. Initial responses: all participants answer in parallel
2. Critic pass: a critic model lists the material discrepancies
3. Debate rounds (at most two): each model sees the claims it missed
4. Synthesis: a consensus answer, or a divergence answer that lays out
   the remaining disagreement

Debate stops early when discrepancies stop decreasing (circuit breaker).

Configuration files are loaded from (in priority order):
1. DEBATE_* environment variables (e.g. DEBATE_GATEWAY__TIMEOUT_SECS=60)
2. --config <path>     Explicit config file
3. ./debate.toml       Project-level config
4. ~/.config/debate-quorum/config.toml   Global config

The API key is read from $OPENROUTER_API_KEY by default.

Example:
  debate-quorum "Is quicksort stable?"
  debate-quorum -m openai/gpt-4o-mini -m anthropic/claude-3-haiku "Compare mutexes and channels"
  debate-quorum -o full --record-dir runs "Explain the CAP theorem"
"#)]
pub struct Cli {
    /// The question to put to the participants
    pub question: Option<String>,

    /// Participant models (can be specified multiple times)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Vec<String>,

    /// Model that detects discrepancies
    #[arg(long, value_name = "MODEL")]
    pub critic: Option<String>,

    /// Model that writes the final answer
    #[arg(long, value_name = "MODEL")]
    pub synthesizer: Option<String>,

    /// Per-call timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Do not write a run record
    #[arg(long)]
    pub no_record: bool,

    /// Directory for run records
    #[arg(long, value_name = "DIR")]
    pub record_dir: Option<PathBuf>,

    /// Output format (default: answer, or [output] format from config)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Print progress as plain lines instead of progress bars
    #[arg(long)]
    pub plain: bool,

    /// Also write debug logs to daily files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

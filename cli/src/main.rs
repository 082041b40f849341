//! CLI entrypoint for debate-quorum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use debate_application::{PipelineConfig, RunPipelineUseCase};
use debate_domain::{ConfigIssue, OutputFormat, Severity};
use debate_infrastructure::{
    ConfigLoader, FileConfig, GatewayConfig, JsonRunRecorder, OpenRouterGateway,
};
use debate_presentation::{Cli, ConsoleFormatter, ProgressMode};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_tracing(&cli);

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let Some(question) = cli.question.clone() else {
        bail!("A question is required. Run with --help for usage.");
    };

    info!("Starting debate-quorum");

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli);

    let issues = config.validate();
    report_issues(&issues);
    if PipelineConfig::has_errors(&issues) {
        bail!("Invalid configuration ({} error(s))", count_errors(&issues));
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let gateway_config = GatewayConfig::from_file(&config.gateway)?;
    let gateway = Arc::new(OpenRouterGateway::new(gateway_config)?);

    let mut use_case = RunPipelineUseCase::new(gateway, config.pipeline_config());
    let recorder = config
        .record
        .enabled
        .then(|| Arc::new(JsonRunRecorder::new(&config.record.dir)));
    if let Some(recorder) = &recorder {
        use_case = use_case.with_recorder(recorder.clone());
    }

    let progress =
        ProgressMode::select(cli.quiet, cli.plain, std::io::stderr().is_terminal()).notifier();

    let run = use_case
        .execute_with_progress(&question, progress.as_ref())
        .await?;

    if let Some(dir) = recorder.as_ref().and_then(|r| r.last_run_dir()) {
        info!("Run record written to {}", dir.display());
    }

    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    println!("{}", ConsoleFormatter::render(&run, format).trim_end());

    Ok(())
}

/// Install the stderr subscriber and, with `--log-file`, a daily log file
fn init_tracing(cli: &Cli) -> Option<WorkerGuard> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    let (file_layer, guard) = match &cli.log_file {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "debate-quorum.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(LevelFilter::DEBUG);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// CLI flags take precedence over every file and env layer
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if !cli.model.is_empty() {
        config.models.participants = Some(cli.model.clone());
    }
    if let Some(critic) = &cli.critic {
        config.models.critic = Some(critic.clone());
    }
    if let Some(synthesizer) = &cli.synthesizer {
        config.models.synthesizer = Some(synthesizer.clone());
    }
    if let Some(timeout) = cli.timeout {
        config.gateway.timeout_secs = timeout;
    }
    if cli.no_record {
        config.record.enabled = false;
    }
    if let Some(dir) = &cli.record_dir {
        config.record.enabled = true;
        config.record.dir = dir.display().to_string();
    }
}

fn report_issues(issues: &[ConfigIssue]) {
    for issue in issues {
        match issue.severity {
            Severity::Error => eprintln!("config error: {}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }
}

fn count_errors(issues: &[ConfigIssue]) -> usize {
    issues.iter().filter(|i| i.is_error()).count()
}

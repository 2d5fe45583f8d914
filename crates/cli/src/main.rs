//! WebNN Sample Harness - Main Entry Point
//!
//! Runs the semantic segmentation sample page across configured
//! backend/dataType/model combinations (or one explicit combination)
//! and reports the scraped timing results.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

mod output;

use output::OutputFormat;
use webnn_test_common::Config;
use webnn_test_harness::{ChromeDriver, RunMode, SampleRunner};

/// Browser-driven smoke and performance harness for WebNN sample pages
#[derive(Parser)]
#[command(name = "webnn-test")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Backend identifier for a single run (cpu, gpu, npu)
    #[arg(long)]
    backend: Option<String>,

    /// Data type for a single run (e.g. fp32)
    #[arg(long)]
    data_type: Option<String>,

    /// Model for a single run
    #[arg(long)]
    model: Option<String>,

    /// Write the full nested result record to this JSON file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table")]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    let config = Config::load(&cli.config)?;
    let mode = RunMode::from_args(cli.backend, cli.data_type, cli.model);

    let driver = ChromeDriver;
    let runner = SampleRunner::new(&config, &driver);
    let start = Instant::now();
    let results = runner.run(mode).await;
    let duration_ms = start.elapsed().as_millis();

    let entries = results.entries();
    output::print_list(&entries, cli.format);

    if let Some(path) = &cli.report {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(&results)?)?;
        output::print_info(&format!("Report written to: {}", path.display()));
    }

    let failed = entries.iter().filter(|e| !e.error.is_empty()).count();
    let passed = entries.len() - failed;
    if failed > 0 {
        output::print_error(&format!("{passed} passed, {failed} failed ({duration_ms} ms)"));
        std::process::exit(1);
    }
    output::print_success(&format!("{passed} passed, 0 failed ({duration_ms} ms)"));

    Ok(())
}

//! FraudGuard - Main Entry Point
//!
//! Reads a line-delimited transaction batch, screens every record, and
//! writes the JSON screening report. Logs go to stderr; stdout carries
//! only the report so callers can parse it as a single JSON document.

use anyhow::{Context, Result};
use clap::Parser;
use fraudguard::{
    config::AppConfig,
    metrics::BatchMetrics,
    pipeline::ScreeningPipeline,
    reporter::{self, ReportWriter},
};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Rule-based batch screening for financial transactions
#[derive(Debug, Parser)]
#[command(name = "fraudguard", version, about)]
struct Cli {
    /// Input file with one record per line (id,amount,description);
    /// reads stdin when omitted
    input: Option<PathBuf>,

    /// Configuration file (defaults to config/config.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Also write fraud alerts for flagged records to this file
    #[arg(long)]
    alerts: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load_or_default()?,
    };

    init_logging(&config)?;
    info!("Starting FraudGuard batch screening");
    info!(
        blacklist = config.detection.blacklist.len(),
        keywords = config.detection.keywords.len(),
        frequency_threshold = config.detection.frequency_threshold,
        "Configuration loaded"
    );

    // Initialize metrics and pipeline
    let metrics = Arc::new(BatchMetrics::new());
    let pipeline = ScreeningPipeline::new(&config.detection, Arc::clone(&metrics));

    // Screen the batch
    let records = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open input file {}", path.display()))?;
            pipeline.screen(BufReader::new(file))?
        }
        None => pipeline.screen(io::stdin().lock())?,
    };

    // Emit the report
    let writer = ReportWriter::new(cli.pretty);
    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            let mut out = BufWriter::new(file);
            writer.write(&records, &mut out)?;
            out.flush().context("failed to flush report")?;
        }
        None => {
            let stdout = io::stdout();
            writer.write(&records, stdout.lock())?;
        }
    }

    // Emit alerts for flagged records when requested
    if let Some(path) = &cli.alerts {
        let alerts = reporter::alerts_for(&records);
        let file = File::create(path)
            .with_context(|| format!("failed to create alerts file {}", path.display()))?;
        let mut out = BufWriter::new(file);
        reporter::write_alerts(&alerts, &mut out)?;
        out.flush().context("failed to flush alerts")?;
        info!(alerts = alerts.len(), path = %path.display(), "Alerts written");
    }

    metrics.print_summary();

    Ok(())
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("fraudguard={}", config.logging.level).parse()?);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if config.logging.format == "pretty" {
        builder.pretty().init();
    } else {
        builder.compact().init();
    }

    Ok(())
}

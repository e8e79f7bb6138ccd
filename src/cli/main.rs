//! Roster export CLI
//!
//! Command-line interface for turning an identity/image dataset into student
//! records, a manifest and a mirrored image tree.

use super::config::CliConfigBuilder;
use crate::{
    fixtures::{MockDataset, MockDatasetConfig, DEFAULT_SEED},
    pipeline::{ExportOutcome, ExportPipeline, ExportSummary},
    services::progress::{ConsoleProgressReporter, ProgressBarReporter, ProgressReporter},
    tracing_config::{init_cli_tracing, spans, TracingFormat, TracingGuard, TracingOutput},
};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Dataset to student roster exporter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "roster-export")]
pub struct Cli {
    /// Dataset root with one directory per identity [default: test_datasets/lfw_sklearn/lfw_home/lfw_funneled]
    #[arg(long, visible_alias = "lfw-path", value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// Output directory [default: test_datasets/lfw_export]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Minimum number of photos an identity needs
    #[arg(long, default_value_t = 1)]
    pub min_images: usize,

    /// Maximum number of identities to export (0 = no limit)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,

    /// Only write students.json and manifest.json
    #[arg(long)]
    pub no_copy: bool,

    /// Class label stamped on every record
    #[arg(long, default_value = "LFW Test Class")]
    pub class_name: String,

    /// Grade label stamped on every record
    #[arg(long, default_value = "Test")]
    pub grade: String,

    /// Enable verbose logging (-v: DEBUG, -vv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log line format
    #[arg(long, value_enum, default_value_t = CliLogFormat::Console)]
    pub log_format: CliLogFormat,

    /// Write logs to this file instead of stderr
    #[cfg(feature = "tracing-files")]
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Show a progress bar while copying images
    #[arg(long)]
    pub progress: bool,

    /// Generate a synthetic face dataset in DIR and exit
    #[arg(long, value_name = "DIR")]
    pub generate_mock: Option<PathBuf>,

    /// Seed for --generate-mock
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub mock_seed: u64,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum CliLogFormat {
    Console,
    Compact,
    #[cfg(feature = "tracing-json")]
    Json,
}

impl From<CliLogFormat> for TracingFormat {
    fn from(format: CliLogFormat) -> Self {
        match format {
            CliLogFormat::Console => TracingFormat::Console,
            CliLogFormat::Compact => TracingFormat::Compact,
            #[cfg(feature = "tracing-json")]
            CliLogFormat::Json => TracingFormat::Json,
        }
    }
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();

    let tracing_guard = init_tracing(&cli).context("Failed to initialize tracing")?;
    let _session = spans::session(tracing_guard.session_id().unwrap_or_default()).entered();

    if let Some(root) = &cli.generate_mock {
        return generate_mock(root, cli.mock_seed);
    }

    CliConfigBuilder::validate_cli(&cli).context("Invalid CLI arguments")?;
    let config = CliConfigBuilder::from_cli(&cli).context("Failed to build configuration")?;

    info!(
        source = %config.source_path.display(),
        output = %config.output_path.display(),
        min_images = config.min_images,
        limit = config.limit,
        copy_images = !config.skip_copy,
        "Starting roster export"
    );

    let reporter: Box<dyn ProgressReporter> = if cli.progress {
        Box::new(ProgressBarReporter::new())
    } else {
        Box::new(ConsoleProgressReporter::new(cli.verbose > 0))
    };

    let outcome = ExportPipeline::new(config)
        .run(reporter.as_ref())
        .context("Export failed")?;

    match outcome {
        ExportOutcome::Exported(summary) => print_summary(&summary),
        ExportOutcome::SourceMissing { path } => {
            warn!(
                path = %path.display(),
                "Dataset directory not found. Download it first or pass --source"
            );
        },
        ExportOutcome::NothingSelected { scanned } => {
            warn!(
                scanned,
                min_images = cli.min_images,
                "No identity has enough photos. Lower --min-images"
            );
        },
    }

    Ok(())
}

fn init_tracing(cli: &Cli) -> Result<TracingGuard> {
    init_cli_tracing(cli.verbose, cli.log_format.into(), log_output(cli))
}

#[cfg(feature = "tracing-files")]
fn log_output(cli: &Cli) -> TracingOutput {
    cli.log_file.clone().map_or(TracingOutput::Console, TracingOutput::File)
}

#[cfg(not(feature = "tracing-files"))]
fn log_output(_cli: &Cli) -> TracingOutput {
    TracingOutput::Console
}

fn generate_mock(root: &Path, seed: u64) -> Result<()> {
    let summary = MockDataset::new(MockDatasetConfig::new(root).with_seed(seed))
        .generate()
        .with_context(|| format!("Failed to generate mock dataset in {}", root.display()))?;

    println!("Mock dataset created in {}", summary.root.display());
    for person in &summary.people {
        println!("  {}: {} photos", person.name, person.photos);
    }
    println!(
        "{} people, {} photos in total",
        summary.people.len(),
        summary.total_photos
    );
    Ok(())
}

fn print_summary(summary: &ExportSummary) {
    println!("Exported {} students ({} photos)", summary.persons, summary.images);
    println!("  students: {}", summary.students_path.display());
    println!("  manifest: {}", summary.manifest_path.display());
    match &summary.copy {
        Some(stats) if stats.skipped > 0 => println!(
            "  images:   {} copied, {} missing and skipped",
            stats.copied, stats.skipped
        ),
        Some(stats) => println!("  images:   {} copied", stats.copied),
        None => println!("  images:   not copied (--no-copy)"),
    }
    println!("Completed in {:.2}s", summary.elapsed.as_secs_f64());
}

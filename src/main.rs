// src/main.rs
// Entry point for rov-analyze: scores navigation decisions for recorded ROV runs.

// Imports dependencies and crate modules.
// - clap: command line arguments.
// - env_logger: logging, verbosity via RUST_LOG.
use clap::Parser;
use log::{error, info};
use rov_nav::{AnalysisSystem, RovConfig};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rov-analyze")]
#[command(about = "Decision-quality reports from ROV perception data", long_about = None)]
struct Args {
    /// Directory holding *_analysis.json files from the vision stage
    #[arg(long, default_value = "results")]
    input_dir: PathBuf,
    /// Directory reports are written to
    #[arg(long, default_value = "results")]
    output: PathBuf,
    /// Analyse only this perception file
    #[arg(long)]
    single: Option<PathBuf>,
    /// Optional YAML configuration
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Loads configuration, then analyses one file or the whole input directory.
fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging for debugging
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RovConfig::load(path)?,
        None => RovConfig::default(),
    };

    let mut system = AnalysisSystem::with_config(&args.input_dir, &args.output, &config)?;

    if let Some(single) = &args.single {
        // A single requested file must succeed
        let result = system.analyze_file(single)?;
        info!(
            "{}: {} decisions, quality {:.1}%",
            single.display(),
            result.total_decisions,
            result.decision_accuracy * 100.0
        );
        return Ok(());
    }

    let summary = system.analyze_all()?;
    if summary.failed > 0 {
        error!("{} of {} files failed", summary.failed, summary.processed + summary.failed);
    }
    info!("Analysis completed: {} reports written", summary.processed);
    Ok(())
}

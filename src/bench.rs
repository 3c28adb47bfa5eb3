//! Sequential vs parallel comparison.
//!
//! Runs the same source directory through both strategies, one after the
//! other so their timings don't interfere, each into its own output directory.
//! The two durations are then rendered and written to the report file.

use crate::config::BenchConfig;
use crate::imaging::{ImageCodec, TargetSpec};
use crate::process::{BatchEvent, BatchJob, RunError, RunResult, Strategy, run_batch};
use crate::report::{self, Report, ReportError};
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Failed to create source directory {path}: {source}")]
    CreateSourceDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{strategy} run failed: {source}")]
    Run {
        strategy: Strategy,
        source: RunError,
    },
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Batch job for one strategy under `config`.
pub fn job_for(config: &BenchConfig, strategy: Strategy) -> BatchJob {
    let output_dir = match strategy {
        Strategy::Sequential => &config.sequential_output_dir,
        Strategy::Parallel => &config.parallel_output_dir,
    };
    BatchJob {
        source_dir: config.source_dir.clone(),
        output_dir: output_dir.clone(),
        targets: TargetSpec::standard(),
    }
}

/// Run one strategy under `config`.
pub fn run_strategy(
    codec: &impl ImageCodec,
    config: &BenchConfig,
    strategy: Strategy,
    events: Option<&Sender<BatchEvent>>,
) -> Result<RunResult, BenchError> {
    run_batch(codec, strategy, &job_for(config, strategy), events)
        .map_err(|source| BenchError::Run { strategy, source })
}

/// Run the sequential pass, then the parallel pass, then write the report.
///
/// The source directory is created if it does not exist yet, so a first run
/// on a fresh layout succeeds with empty results.
pub fn run_comparison(
    codec: &impl ImageCodec,
    config: &BenchConfig,
    events: Option<&Sender<BatchEvent>>,
) -> Result<Report, BenchError> {
    std::fs::create_dir_all(&config.source_dir).map_err(|e| BenchError::CreateSourceDir {
        path: config.source_dir.clone(),
        source: e,
    })?;

    let sequential = run_strategy(codec, config, Strategy::Sequential, events)?;
    let parallel = run_strategy(codec, config, Strategy::Parallel, events)?;

    let text = report::render(&sequential, &parallel);
    report::write_report(&config.report_path, &text)?;
    info!("report written to {}", config.report_path.display());

    Ok(Report {
        sequential,
        parallel,
        path: config.report_path.clone(),
    })
}

//! Batch resizing of a source directory.
//!
//! Lists the source directory (non-recursive), keeps the files the
//! [`classify`](crate::classify) filter accepts, and runs one unit of work per
//! file: decode once, then resize and encode each target height in order.
//!
//! ## Output Structure
//!
//! ```text
//! ImageSequential/
//! ├── dawn_1080p.jpg
//! ├── dawn_720p.jpg
//! ├── dawn_480p.jpg
//! ├── logo_1080p.png
//! └── ...
//! ```
//!
//! ## Strategies
//!
//! [`Strategy::Sequential`] walks the file list on the calling thread in
//! listing order. [`Strategy::Parallel`] hands the same list to
//! [rayon](https://docs.rs/rayon), one unit of work per file. Both call the
//! same [`process_file`].
//!
//! ## Failure Isolation
//!
//! A decode failure fails its file and nothing else. An encode failure fails
//! one target height; the remaining heights of the same file are still
//! attempted. Failures are returned as [`ProcessError`] values and collected
//! into the [`RunResult`]; they never abort the batch. Only the setup steps
//! (creating the output directory, listing the source directory) can fail a
//! whole run, reported as [`RunError`].

use crate::classify::is_supported;
use crate::imaging::{CodecError, ImageCodec, TargetSpec, create_target};
use crate::naming::output_path;
use rayon::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// A failure contained to one file or one target height.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to decode {path}: {source}")]
    Decode { path: PathBuf, source: CodecError },
    #[error("Failed to write {path} ({height}p): {source}")]
    Encode {
        path: PathBuf,
        height: u32,
        source: CodecError,
    },
}

/// A failure that aborts a whole run before any file is processed.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read source directory {path}: {source}")]
    ReadSource {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// Execution strategy for a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Sequential,
    Parallel,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Sequential => f.write_str("sequential"),
            Strategy::Parallel => f.write_str("parallel"),
        }
    }
}

/// Inputs of one batch run.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub targets: TargetSpec,
}

impl BatchJob {
    /// A job producing the standard 1080p / 720p / 480p set.
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            targets: TargetSpec::standard(),
        }
    }
}

/// Outcome of one unit of work.
#[derive(Debug)]
pub struct FileReport {
    pub source: PathBuf,
    /// Output files written, in target order.
    pub written: Vec<PathBuf>,
    pub failures: Vec<ProcessError>,
}

impl FileReport {
    /// True when every target height was written.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of one batch run.
#[derive(Debug)]
pub struct RunResult {
    pub strategy: Strategy,
    /// Wall-clock duration of the directory pass.
    pub elapsed: Duration,
    /// Supported files found in the source directory.
    pub discovered: usize,
    /// Files whose every target height was written.
    pub processed: usize,
    /// Files with a decode failure or at least one failed target.
    pub failed: usize,
    pub failures: Vec<ProcessError>,
}

impl RunResult {
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

/// Progress events sent while a batch runs.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    RunStarted {
        strategy: Strategy,
        output_dir: PathBuf,
        file_count: usize,
    },
    FileProcessed {
        strategy: Strategy,
        /// 1-based position in listing order.
        index: usize,
        source: PathBuf,
        written: Vec<PathBuf>,
        errors: Vec<String>,
    },
    RunFinished {
        strategy: Strategy,
        elapsed: Duration,
        processed: usize,
        failed: usize,
    },
}

fn emit(events: Option<&Sender<BatchEvent>>, event: BatchEvent) {
    if let Some(tx) = events {
        tx.send(event).ok();
    }
}

/// Regular files directly inside a source directory, split by the classifier.
#[derive(Debug, Default)]
pub struct SourceListing {
    pub images: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// List the files directly inside `source_dir`, sorted by file name.
///
/// Subdirectories are not descended into. Entries that cannot be read are
/// skipped; only an unreadable `source_dir` itself is an error.
pub fn list_source(source_dir: &Path) -> Result<SourceListing, RunError> {
    let mut listing = SourceListing::default();

    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(RunError::ReadSource {
                    path: source_dir.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                warn!("skipping unreadable entry: {e}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        if is_supported(entry.path()) {
            listing.images.push(entry.into_path());
        } else {
            listing.skipped.push(entry.into_path());
        }
    }

    Ok(listing)
}

/// The supported images directly inside `source_dir`, in listing order.
pub fn discover_images(source_dir: &Path) -> Result<Vec<PathBuf>, RunError> {
    list_source(source_dir).map(|listing| listing.images)
}

/// Decode `source` once and write every target height into `output_dir`.
///
/// Never fails as a whole: decode and encode failures are recorded in the
/// returned report.
pub fn process_file(
    codec: &impl ImageCodec,
    source: &Path,
    output_dir: &Path,
    targets: &TargetSpec,
) -> FileReport {
    let mut report = FileReport {
        source: source.to_path_buf(),
        written: Vec::with_capacity(targets.len()),
        failures: Vec::new(),
    };

    let image = match codec.decode(source) {
        Ok(image) => image,
        Err(e) => {
            report.failures.push(ProcessError::Decode {
                path: source.to_path_buf(),
                source: e,
            });
            return report;
        }
    };

    for &height in targets.heights() {
        let written = create_target(&image, source, output_dir, height).and_then(|output| {
            codec.encode(&output.image, &output.path)?;
            Ok(output)
        });
        match written {
            Ok(output) => {
                debug!(
                    "wrote {} ({}x{})",
                    output.path.display(),
                    output.image.width(),
                    height
                );
                report.written.push(output.path);
            }
            Err(e) => report.failures.push(ProcessError::Encode {
                path: output_path(output_dir, source, height),
                height,
                source: e,
            }),
        }
    }

    report
}

/// Per-run counters, safe under concurrent increment.
#[derive(Default)]
struct Tally {
    processed: AtomicUsize,
    failed: AtomicUsize,
}

impl Tally {
    fn record(&self, report: &FileReport) {
        let counter = if report.is_success() {
            &self.processed
        } else {
            &self.failed
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn processed(&self) -> usize {
        self.processed.load(Ordering::Relaxed)
    }

    fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }
}

/// Run one batch over `job.source_dir` with the given strategy.
///
/// The output directory is created first (an existing one is fine). The
/// elapsed time covers listing the source directory and every unit of work.
pub fn run_batch(
    codec: &impl ImageCodec,
    strategy: Strategy,
    job: &BatchJob,
    events: Option<&Sender<BatchEvent>>,
) -> Result<RunResult, RunError> {
    std::fs::create_dir_all(&job.output_dir).map_err(|e| RunError::CreateOutputDir {
        path: job.output_dir.clone(),
        source: e,
    })?;

    let start = Instant::now();
    let files = discover_images(&job.source_dir)?;
    info!(
        "{strategy} run: {} images from {}",
        files.len(),
        job.source_dir.display()
    );
    emit(
        events,
        BatchEvent::RunStarted {
            strategy,
            output_dir: job.output_dir.clone(),
            file_count: files.len(),
        },
    );

    let tally = Tally::default();
    let unit = |(pos, source): (usize, &PathBuf)| -> Vec<ProcessError> {
        let report = process_file(codec, source, &job.output_dir, &job.targets);
        tally.record(&report);
        if let Some(tx) = events {
            tx.send(BatchEvent::FileProcessed {
                strategy,
                index: pos + 1,
                source: report.source.clone(),
                written: report.written.clone(),
                errors: report.failures.iter().map(|f| f.to_string()).collect(),
            })
            .ok();
        }
        report.failures
    };

    let failures: Vec<ProcessError> = match strategy {
        Strategy::Sequential => files.iter().enumerate().flat_map(&unit).collect(),
        Strategy::Parallel => files
            .par_iter()
            .enumerate()
            .flat_map_iter(&unit)
            .collect(),
    };

    let result = RunResult {
        strategy,
        elapsed: start.elapsed(),
        discovered: files.len(),
        processed: tally.processed(),
        failed: tally.failed(),
        failures,
    };
    // Logged after the clock stops. Event consumers already show failures.
    for failure in &result.failures {
        if events.is_some() {
            debug!("{strategy}: {failure}");
        } else {
            warn!("{strategy}: {failure}");
        }
    }
    info!(
        "{strategy} run finished in {} ms: {} processed, {} failed",
        result.elapsed_ms(),
        result.processed,
        result.failed
    );
    emit(
        events,
        BatchEvent::RunFinished {
            strategy,
            elapsed: result.elapsed,
            processed: result.processed,
            failed: result.failed,
        },
    );

    Ok(result)
}

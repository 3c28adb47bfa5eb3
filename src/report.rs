//! Timing report for the sequential vs parallel comparison.
//!
//! The report is two lines, sequential first, each giving the measured
//! wall-clock duration in whole milliseconds:
//!
//! ```text
//! - Version séquentielle : 5123 ms
//! - Version parallélisée : 1408 ms
//! ```
//!
//! No ratio or other derived figure is computed.

use crate::process::RunResult;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Render the two-line duration summary.
pub fn render(sequential: &RunResult, parallel: &RunResult) -> String {
    format!(
        "- Version séquentielle : {} ms\n- Version parallélisée : {} ms\n",
        sequential.elapsed_ms(),
        parallel.elapsed_ms()
    )
}

/// Write `text` to `path`, replacing any previous report.
pub fn write_report(path: &Path, text: &str) -> Result<(), ReportError> {
    std::fs::write(path, text).map_err(|e| ReportError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Both runs of a comparison and where their summary was written.
#[derive(Debug)]
pub struct Report {
    pub sequential: RunResult,
    pub parallel: RunResult,
    pub path: PathBuf,
}

impl Report {
    pub fn render(&self) -> String {
        render(&self.sequential, &self.parallel)
    }
}

//! CLI output formatting for batch runs.
//!
//! # File-Centric Display
//!
//! A batch has no titles or metadata, so every line leads with the source
//! file name and its positional index in listing order. Output files are
//! shown as indented context under the source they came from, and failures
//! are shown in the same place, prefixed with `error:`.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Images (2 images)
//!     Source: Images/
//!     001 dawn.jpg
//!     002 logo.png
//!
//! Skipped (1 file)
//!     notes.txt
//! ```
//!
//! ## Run
//!
//! ```text
//! Sequential (2 images) → ImageSequential/
//!     001 dawn.jpg
//!         dawn_1080p.jpg
//!         dawn_720p.jpg
//!         dawn_480p.jpg
//!     002 broken.png
//!         error: Failed to decode Images/broken.png: ...
//! Sequential: 1 processed, 1 failed in 143 ms
//! ```
//!
//! Under the parallel strategy the file blocks arrive in completion order;
//! the index still refers to the listing order.
//!
//! ## Report
//!
//! ```text
//! Report → README.md
//!     - Version séquentielle : 5123 ms
//!     - Version parallélisée : 1408 ms
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::process::{BatchEvent, SourceListing, Strategy};
use crate::report::Report;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Final path component, or the whole path when there is none.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Directory display with a trailing slash.
fn dir_display(path: &Path) -> String {
    let shown = path.display().to_string();
    if shown.ends_with('/') {
        shown
    } else {
        format!("{}/", shown)
    }
}

/// `1 image`, `3 images`.
fn count_noun(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{} {}", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

fn strategy_title(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Sequential => "Sequential",
        Strategy::Parallel => "Parallel",
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the classifier's view of a source directory.
///
/// Accepted images are numbered in listing order; skipped files are listed
/// by name only. The skipped section is omitted when nothing was skipped.
pub fn format_check_output(listing: &SourceListing, source_dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("Images ({})", count_noun(listing.images.len(), "image")));
    lines.push(format!("{}Source: {}", indent(1), dir_display(source_dir)));
    for (i, image) in listing.images.iter().enumerate() {
        lines.push(format!(
            "{}{} {}",
            indent(1),
            format_index(i + 1),
            file_name(image)
        ));
    }

    if !listing.skipped.is_empty() {
        lines.push(String::new());
        lines.push(format!("Skipped ({})", count_noun(listing.skipped.len(), "file")));
        for skipped in &listing.skipped {
            lines.push(format!("{}{}", indent(1), file_name(skipped)));
        }
    }

    lines
}

pub fn print_check_output(listing: &SourceListing, source_dir: &Path) {
    for line in format_check_output(listing, source_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Run output
// ============================================================================

/// Format a single batch progress event as display lines.
pub fn format_batch_event(event: &BatchEvent) -> Vec<String> {
    match event {
        BatchEvent::RunStarted {
            strategy,
            output_dir,
            file_count,
        } => vec![format!(
            "{} ({}) → {}",
            strategy_title(*strategy),
            count_noun(*file_count, "image"),
            dir_display(output_dir)
        )],
        BatchEvent::FileProcessed {
            index,
            source,
            written,
            errors,
            ..
        } => {
            let mut lines = vec![format!(
                "{}{} {}",
                indent(1),
                format_index(*index),
                file_name(source)
            )];
            for output in written {
                lines.push(format!("{}{}", indent(2), file_name(output)));
            }
            for error in errors {
                lines.push(format!("{}error: {}", indent(2), error));
            }
            lines
        }
        BatchEvent::RunFinished {
            strategy,
            elapsed,
            processed,
            failed,
        } => vec![format!(
            "{}: {} processed, {} failed in {} ms",
            strategy_title(*strategy),
            processed,
            failed,
            elapsed.as_millis()
        )],
    }
}

pub fn print_batch_event(event: &BatchEvent) {
    for line in format_batch_event(event) {
        println!("{}", line);
    }
}

// ============================================================================
// Report output
// ============================================================================

/// Format the comparison report: where it was written, then its content.
pub fn format_report(report: &Report) -> Vec<String> {
    let mut lines = vec![format!("Report → {}", report.path.display())];
    for line in report.render().lines() {
        lines.push(format!("{}{}", indent(1), line));
    }
    lines
}

pub fn print_report(report: &Report) {
    for line in format_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

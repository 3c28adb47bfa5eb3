//! # imgopty
//!
//! A batch image resizer that doubles as a concurrency benchmark. Every
//! `.jpg`, `.jpeg` and `.png` file directly inside a source directory is
//! resized to three standard heights (1080, 720 and 480 pixels) with its
//! aspect ratio preserved. The whole directory is processed twice, once
//! sequentially and once in parallel, and the two wall-clock durations are
//! written to a report file.
//!
//! ```text
//! Images/            →  ImageSequential/   (sequential pass)
//!                    →  ImageParallel/     (parallel pass)
//!                    →  README.md          (timing report)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`classify`] | Extension filter deciding which files are images |
//! | [`imaging`] | Decode, resize and encode behind the [`imaging::ImageCodec`] trait |
//! | [`naming`] | `{stem}_{height}p{ext}` output file names |
//! | [`process`] | Batch runner: one unit of work per file, sequential or parallel |
//! | [`bench`] | Runs both strategies back to back and writes the report |
//! | [`report`] | Two-line timing report rendering and writing |
//! | [`config`] | Optional `imgopty.toml` with the directory layout and worker cap |
//! | [`output`] | CLI output formatting for runs, checks and the report |
//!
//! # Design Decisions
//!
//! ## Failure Isolation
//!
//! A bad file never stops a batch. Decode failures fail one file; encode
//! failures fail one target height of one file. Both are collected as values
//! and surfaced at the end of the run, so the processed and failed counts
//! always add up to the number of images found.
//!
//! ## Same Work, Two Schedules
//!
//! Both strategies call the same per-file unit of work. The only difference
//! is whether the file list is walked on the calling thread or handed to
//! rayon. Each file is decoded once and its targets are produced in the
//! fixed order 1080, 720, 480, so the two output directories are identical.
//!
//! ## Truncating Width
//!
//! Output width is `floor(width * target_height / height)`, computed in
//! integer arithmetic. A source narrow enough to truncate to zero width is
//! not clamped; its encode fails and is reported like any other failure.
//! At the other extreme, a target above
//! [`imaging::operations::MAX_TARGET_PIXELS`] is refused before any buffer is
//! allocated and recorded as a failure of that target.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, resampling (Catmull-Rom) and encoding all go through the
//! `image` crate, with only its JPEG and PNG codecs enabled. No system
//! libraries are needed.

pub mod bench;
pub mod classify;
pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;
pub mod report;

#[cfg(test)]
pub(crate) mod test_helpers;

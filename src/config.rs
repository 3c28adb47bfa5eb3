//! Run configuration.
//!
//! Loads the optional `imgopty.toml` from the project root. Every key is
//! optional; anything left out keeps the stock default. Relative paths are
//! resolved against the project root.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source_dir = "Images"                     # Images to resize (not recursive)
//! sequential_output_dir = "ImageSequential" # Output of the sequential run
//! parallel_output_dir = "ImageParallel"     # Output of the parallel run
//! report_path = "README.md"                 # Timing report (overwritten)
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! The target heights (1080, 720, 480) are fixed and not configurable.
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the project root.
pub const CONFIG_FILENAME: &str = "imgopty.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Directories and settings for a comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Directory scanned for source images.
    pub source_dir: PathBuf,
    /// Output directory of the sequential run.
    pub sequential_output_dir: PathBuf,
    /// Output directory of the parallel run.
    pub parallel_output_dir: PathBuf,
    /// File the timing report is written to.
    pub report_path: PathBuf,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("Images"),
            sequential_output_dir: PathBuf::from("ImageSequential"),
            parallel_output_dir: PathBuf::from("ImageParallel"),
            report_path: PathBuf::from("README.md"),
            processing: ProcessingConfig::default(),
        }
    }
}

impl BenchConfig {
    /// Validate that the configured locations can be used together.
    ///
    /// Paths are compared after lexical normalization, so `Images` and
    /// `./Images` are the same directory. Symlinks are not followed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let paths = [
            ("source_dir", &self.source_dir),
            ("sequential_output_dir", &self.sequential_output_dir),
            ("parallel_output_dir", &self.parallel_output_dir),
            ("report_path", &self.report_path),
        ];
        for (key, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        let source = normalize(&self.source_dir);
        let sequential = normalize(&self.sequential_output_dir);
        let parallel = normalize(&self.parallel_output_dir);
        if sequential == parallel {
            return Err(ConfigError::Validation(
                "sequential_output_dir and parallel_output_dir must differ".into(),
            ));
        }
        if sequential == source || parallel == source {
            return Err(ConfigError::Validation(
                "output directories must differ from source_dir".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Resolve relative paths against `root`. Absolute paths are kept.
    /// Every result is lexically normalized.
    pub fn resolve_paths(mut self, root: &Path) -> Self {
        for path in [
            &mut self.source_dir,
            &mut self.sequential_output_dir,
            &mut self.parallel_output_dir,
            &mut self.report_path,
        ] {
            *path = normalize(&root.join(&*path));
        }
        self
    }
}

/// Drop `.` components and fold `dir/..` pairs without touching the filesystem.
///
/// A `..` with nothing left to fold is kept, except directly under the root
/// where it has no effect.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() && !path.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image processing workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Parse config from a TOML string and validate it. Paths are left as written.
pub fn parse_config(content: &str) -> Result<BenchConfig, ConfigError> {
    let config: BenchConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load `imgopty.toml` from `root`, or stock defaults when there is none.
///
/// Relative paths in the result are resolved against the absolute form of
/// `root`, and validation runs on the resolved paths.
pub fn load_config(root: &Path) -> Result<BenchConfig, ConfigError> {
    let root = std::path::absolute(root)?;
    let path = root.join(CONFIG_FILENAME);
    let config: BenchConfig = if path.exists() {
        toml::from_str(&fs::read_to_string(&path)?)?
    } else {
        BenchConfig::default()
    };
    let config = config.resolve_paths(&root);
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `imgopty.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# imgopty configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Relative paths are resolved
# against the directory containing this file.
# Unknown keys will cause an error.

# Directory scanned for .jpg/.jpeg/.png images (subdirectories are ignored).
source_dir = "Images"

# Output directory for the sequential run.
sequential_output_dir = "ImageSequential"

# Output directory for the parallel run. Must differ from the sequential one.
parallel_output_dir = "ImageParallel"

# Timing report, overwritten on every comparison run.
report_path = "README.md"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel image-processing workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_layout() {
        let config = BenchConfig::default();
        assert_eq!(config.source_dir, PathBuf::from("Images"));
        assert_eq!(config.sequential_output_dir, PathBuf::from("ImageSequential"));
        assert_eq!(config.parallel_output_dir, PathBuf::from("ImageParallel"));
        assert_eq!(config.report_path, PathBuf::from("README.md"));
        assert_eq!(config.processing.max_processes, None);
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config = parse_config(stock_config_toml()).unwrap();
        assert_eq!(config, BenchConfig::default());
    }

    #[test]
    fn sparse_config_keeps_other_defaults() {
        let config = parse_config(r#"source_dir = "photos""#).unwrap();
        assert_eq!(config.source_dir, PathBuf::from("photos"));
        assert_eq!(config.report_path, PathBuf::from("README.md"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = parse_config("target_heights = [2160]");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn identical_output_dirs_are_rejected() {
        let result = parse_config(
            r#"
sequential_output_dir = "out"
parallel_output_dir = "out"
"#,
        );
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn output_dir_equal_to_source_is_rejected() {
        let result = parse_config(
            r#"
source_dir = "Images"
parallel_output_dir = "Images"
"#,
        );
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn dot_prefixed_output_equal_to_source_is_rejected() {
        let result = parse_config(
            r#"
source_dir = "Images"
sequential_output_dir = "./Images"
"#,
        );
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn output_dirs_differing_only_lexically_are_rejected() {
        let result = parse_config(
            r#"
sequential_output_dir = "out/seq/../same"
parallel_output_dir = "out/same/"
"#,
        );
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn normalize_folds_dot_components() {
        assert_eq!(normalize(Path::new("./Images")), PathBuf::from("Images"));
        assert_eq!(normalize(Path::new("a/./b/../c/")), PathBuf::from("a/c"));
        assert_eq!(normalize(Path::new("/root/x/..")), PathBuf::from("/root"));
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("../up")), PathBuf::from("../up"));
        assert_eq!(normalize(Path::new("a/..")), PathBuf::from("."));
    }

    #[test]
    fn empty_path_is_rejected() {
        let result = parse_config(r#"report_path = """#);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn zero_max_processes_is_rejected() {
        let result = parse_config("[processing]\nmax_processes = 0\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_config_without_file_uses_defaults_under_root() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.source_dir, tmp.path().join("Images"));
        assert_eq!(config.report_path, tmp.path().join("README.md"));
    }

    #[test]
    fn load_config_reads_file_and_resolves_paths() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"
source_dir = "in"
parallel_output_dir = "/abs/par"

[processing]
max_processes = 2
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.source_dir, tmp.path().join("in"));
        assert_eq!(config.parallel_output_dir, PathBuf::from("/abs/par"));
        assert_eq!(
            config.sequential_output_dir,
            tmp.path().join("ImageSequential")
        );
        assert_eq!(config.processing.max_processes, Some(2));
    }

    #[test]
    fn load_config_rejects_absolute_output_equal_to_resolved_source() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("Images");
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            format!("parallel_output_dir = {:?}\n", source.to_string_lossy()),
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_config_resolves_dot_segments() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "source_dir = \"./in/../photos\"\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.source_dir, tmp.path().join("photos"));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn effective_threads_auto() {
        let config = ProcessingConfig {
            max_processes: None,
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let config = ProcessingConfig {
            max_processes: Some(99999),
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }
}

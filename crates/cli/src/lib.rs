//! Library half of the `reach-renamer` CLI.
//!
//! Command implementations live in [`commands`] so they can be exercised from
//! tests without spawning the binary.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub mod commands;

/// Default output file name, next to the input dataset.
pub const DEFAULT_RESULTS_FILENAME: &str = "results.gpkg";

/// Install the stderr log subscriber. `RUST_LOG` overrides the default `info`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Make `path` absolute: canonicalized if it exists, otherwise joined onto
/// the current working directory.
pub fn canonicalize_or_current(path: &str) -> Result<PathBuf> {
    let path = Path::new(path);
    match path.canonicalize() {
        Ok(p) => Ok(p),
        Err(_) => {
            let cwd = env::current_dir().context("Failed to get current directory")?;
            Ok(cwd.join(path))
        }
    }
}

/// Output path used when none is given: `results.gpkg` beside the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    match input.parent() {
        Some(dir) => dir.join(DEFAULT_RESULTS_FILENAME),
        None => PathBuf::from(DEFAULT_RESULTS_FILENAME),
    }
}

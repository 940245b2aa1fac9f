use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing::info;

/// Copy the source dataset to `destination` so the source file is never written.
///
/// An existing destination is overwritten, unless it is the source itself.
pub fn prepare_results_file(source: &Path, destination: &Path) -> Result<()> {
    let source_canon = source
        .canonicalize()
        .with_context(|| format!("Source dataset does not exist: {}", source.display()))?;
    if let Ok(dest_canon) = destination.canonicalize() {
        if dest_canon == source_canon {
            return Err(anyhow!(
                "Refusing to write results over the source dataset: {}",
                source.display()
            ));
        }
    }

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output dir: {}", parent.display()))?;
    }
    fs::copy(source, destination).with_context(|| {
        format!("Failed to copy {} to {}", source.display(), destination.display())
    })?;
    if !destination.exists() {
        return Err(anyhow!("Creating copy of spatial data failed: {}", destination.display()));
    }

    info!(source = %source.display(), destination = %destination.display(), "copied dataset");
    Ok(())
}

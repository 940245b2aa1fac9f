use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use reach_core::config::RenameConfig;

/// Write the default configuration as YAML to `path`.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn init_config_command(path: &str, force: bool) -> Result<()> {
    let path = Path::new(path);
    if path.exists() && !force {
        return Err(anyhow!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        ));
    }

    let config = RenameConfig::default();
    let yaml = serde_yaml::to_string(&config).context("Failed to serialize default config")?;
    fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    println!("Wrote default config:");
    println!("  Path: {}", path.display());
    println!("  Point layer: {} (legacy field '{}')", config.point_layer, config.legacy_name_field);
    println!("  Line layer: {} (id field '{}')", config.line_layer, config.line_id_field);
    println!("  New name field: {}", config.new_name_field);
    println!("  Tolerance: {}", config.tolerance);

    Ok(())
}

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use reach_core::config::RenameConfig;
use reach_core::gpkg::{prepare_results_file, GeoPackage};
use reach_core::services::rename::{rename, WatercourseReport};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::commands::{load_config_arg, load_dataset};
use crate::{canonicalize_or_current, default_output_path};

/// JSON report written by `rename --report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub input: String,
    pub output: Option<String>,
    pub started_at: String,
    pub finished_at: String,
    pub dry_run: bool,
    pub config: RenameConfig,
    pub points: usize,
    pub watercourses: Vec<WatercourseReport>,
    /// Points that received a generated name.
    pub renamed: usize,
    /// Rows updated in the output dataset (0 for a dry run).
    pub written: usize,
}

/// Rename points in a copy of `input`.
///
/// The mapping is computed from the source opened read-only; the copy is only
/// made once renaming succeeded. With `dry_run`, the mapping is printed as
/// JSON instead of being written anywhere.
pub fn rename_command(
    input: &str,
    output: Option<&str>,
    config_path: Option<&str>,
    report_path: Option<&str>,
    dry_run: bool,
) -> Result<RunReport> {
    let started_at = Utc::now().to_rfc3339();
    let config = load_config_arg(config_path)?;
    let input_path = canonicalize_or_current(input)?;

    if !input_path.exists() {
        bail!("Source dataset does not exist: {}", input_path.display());
    }
    let source = GeoPackage::open_read_only(&input_path)
        .with_context(|| format!("Failed to open GeoPackage at {}", input_path.display()))?;
    let dataset = load_dataset(&source, &config)?;
    let outcome = rename(&dataset.points, &dataset.watercourses, &config.to_options())
        .context("Renaming failed; nothing was written")?;
    drop(source);

    let (output_path, written) = if dry_run {
        let serialized = serde_json::to_string_pretty(&outcome.names)
            .context("Failed to serialize names to JSON")?;
        println!("{}", serialized);
        (None, 0)
    } else {
        let output_path = match output {
            Some(o) => canonicalize_or_current(o)?,
            None => default_output_path(&input_path),
        };
        prepare_results_file(&input_path, &output_path)?;
        let mut results = GeoPackage::open(&output_path)
            .with_context(|| format!("Failed to open GeoPackage at {}", output_path.display()))?;
        let written = results
            .write_names(&config.point_layer, &config.new_name_field, &outcome.names)
            .with_context(|| {
                format!(
                    "Failed to write field '{}' of layer '{}'",
                    config.new_name_field, config.point_layer
                )
            })?;
        info!(written, "names written");
        (Some(output_path), written)
    };

    let renamed = outcome.watercourses.iter().map(|w| w.renamed).sum();
    let report = RunReport {
        input: input_path.display().to_string(),
        output: output_path.as_ref().map(|p| p.display().to_string()),
        started_at,
        finished_at: Utc::now().to_rfc3339(),
        dry_run,
        config,
        points: dataset.points.len(),
        watercourses: outcome.watercourses,
        renamed,
        written,
    };

    if let Some(path) = report_path {
        write_report(Path::new(path), &report)?;
    }

    if !dry_run {
        println!("Renamed points:");
        println!("  Input: {}", report.input);
        println!("  Output: {}", report.output.as_deref().unwrap_or("-"));
        println!("  Points: {}", report.points);
        println!("  Watercourses with points: {}", report.watercourses.len());
        println!("  Generated names: {}", report.renamed);
        println!("  Rows written: {}", report.written);
    }

    Ok(report)
}

fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize run report")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write run report: {}", path.display()))?;
    Ok(())
}

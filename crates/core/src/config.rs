use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::RenameError;
use crate::model::ABSENT_NAME_SENTINEL;
use crate::services::rename::RenameOptions;

/// Default distance below which a point counts as lying on a line.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Serializable configuration describing which layers and fields a run uses.
///
/// Typically stored as YAML next to the dataset (see `init-config`). Every
/// key is optional; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    /// Layer holding the watercourse line records.
    pub line_layer: String,
    /// Field identifying which watercourse a line record belongs to.
    pub line_id_field: String,
    /// Layer holding the points to rename.
    pub point_layer: String,
    /// Field holding the legacy (anchor) name of a point.
    pub legacy_name_field: String,
    /// Field receiving the new name.
    pub new_name_field: String,
    /// Point-to-line distance tolerance, in the layer's coordinate units.
    pub tolerance: f64,
    /// Value written for points with neither a legacy nor a generated name.
    pub absent_sentinel: String,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            line_layer: "cieki".to_string(),
            line_id_field: "oznaczenie".to_string(),
            point_layer: "punkty".to_string(),
            legacy_name_field: "numer-stary".to_string(),
            new_name_field: "numer-nowy".to_string(),
            tolerance: DEFAULT_TOLERANCE,
            absent_sentinel: ABSENT_NAME_SENTINEL.to_string(),
        }
    }
}

impl RenameConfig {
    /// Check values that serde cannot express as types.
    pub fn validate(&self) -> Result<(), RenameError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(RenameError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }

    /// Options consumed by the rename pipeline.
    pub fn to_options(&self) -> RenameOptions {
        RenameOptions {
            tolerance: self.tolerance,
            absent_sentinel: self.absent_sentinel.clone(),
        }
    }
}

/// Load and validate a YAML config from disk.
pub fn load_config(path: &Path) -> Result<RenameConfig> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rename config at {}", path.display()))?;
    let config: RenameConfig = serde_yaml::from_str(&body)
        .with_context(|| format!("Failed to parse rename config YAML at {}", path.display()))?;
    config.validate().with_context(|| format!("Invalid rename config at {}", path.display()))?;
    Ok(config)
}

/// Load the config at `path` if given, otherwise fall back to defaults.
pub fn load_config_or_default(path: Option<&Path>) -> Result<RenameConfig> {
    match path {
        Some(p) => load_config(p),
        None => Ok(RenameConfig::default()),
    }
}

use std::path::Path;

use anyhow::{Context, Result};
use reach_core::config::RenameConfig;
use reach_core::gpkg::GeoPackage;
use reach_core::model::{PointFeature, Watercourse};
use reach_core::services::dissolve::dissolve_lines;

/// Points and dissolved watercourses read from one GeoPackage.
#[derive(Debug)]
pub struct Dataset {
    pub points: Vec<PointFeature>,
    pub watercourses: Vec<Watercourse>,
}

/// Read both layers named in `config` and dissolve the lines by identifier.
pub fn load_dataset(gpkg: &GeoPackage, config: &RenameConfig) -> Result<Dataset> {
    let path = gpkg.path().display();
    let (point_layer, line_layer) = (&config.point_layer, &config.line_layer);
    let points = gpkg
        .read_points(point_layer, &config.legacy_name_field)
        .with_context(|| format!("Failed to read point layer '{point_layer}' from {path}"))?;
    let lines = gpkg
        .read_lines(line_layer, &config.line_id_field)
        .with_context(|| format!("Failed to read line layer '{line_layer}' from {path}"))?;
    let watercourses = dissolve_lines(lines);
    Ok(Dataset { points, watercourses })
}

/// Load the config at `path` (if any), defaults otherwise.
pub fn load_config_arg(path: Option<&str>) -> Result<RenameConfig> {
    reach_core::config::load_config_or_default(path.map(Path::new))
}

use anyhow::{Context, Result};
use reach_core::gpkg::GeoPackage;
use reach_core::model::{AnchorPattern, FeatureId};
use reach_core::services::rename::plan_watercourse;
use reach_core::services::segment::Anchor;
use serde::Serialize;

use crate::canonicalize_or_current;
use crate::commands::{load_config_arg, load_dataset};

#[derive(Debug, Serialize)]
pub struct WatercourseView {
    pub name: String,
    pub located: usize,
    pub segments: Vec<SegmentView>,
}

#[derive(Debug, Serialize)]
pub struct SegmentView {
    pub start: usize,
    pub end: usize,
    pub pattern: AnchorPattern,
    pub start_anchor: Option<Anchor>,
    pub end_anchor: Option<Anchor>,
    pub names: Vec<NamedPoint>,
}

#[derive(Debug, Serialize)]
pub struct NamedPoint {
    pub id: FeatureId,
    pub name: String,
}

/// Show how each watercourse would be segmented and named, without writing.
pub fn inspect_command(
    input: &str,
    config_path: Option<&str>,
    json: bool,
) -> Result<Vec<WatercourseView>> {
    let config = load_config_arg(config_path)?;
    let input_path = canonicalize_or_current(input)?;
    let gpkg = GeoPackage::open_read_only(&input_path)
        .with_context(|| format!("Failed to open GeoPackage at {}", input_path.display()))?;
    let dataset = load_dataset(&gpkg, &config)?;
    let options = config.to_options();

    let mut views = Vec::with_capacity(dataset.watercourses.len());
    for watercourse in &dataset.watercourses {
        let plan = plan_watercourse(&dataset.points, watercourse, &options)
            .with_context(|| format!("Failed to plan watercourse '{}'", watercourse.name))?;
        let segments = plan
            .segments
            .into_iter()
            .map(|planned| SegmentView {
                start: planned.segment.start,
                end: planned.segment.end,
                pattern: planned.segment.pattern(),
                start_anchor: planned.segment.start_anchor,
                end_anchor: planned.segment.end_anchor,
                names: planned
                    .names
                    .into_iter()
                    .map(|(id, name)| NamedPoint { id, name })
                    .collect(),
            })
            .collect();
        views.push(WatercourseView { name: plan.watercourse, located: plan.located, segments });
    }

    if json {
        let serialized = serde_json::to_string_pretty(&views)
            .context("Failed to serialize watercourses to JSON")?;
        println!("{}", serialized);
        return Ok(views);
    }

    println!("Watercourses ({}):", views.len());
    if views.is_empty() {
        println!("  (none)");
    }
    for view in &views {
        println!("  - {} [{} points, {} segments]", view.name, view.located, view.segments.len());
        for segment in &view.segments {
            let start = segment.start_anchor.as_ref().map_or("-", |a| a.name.as_str());
            let end = segment.end_anchor.as_ref().map_or("-", |a| a.name.as_str());
            println!(
                "      [{}, {}) {} {} .. {}",
                segment.start,
                segment.end,
                segment.pattern.code(),
                start,
                end
            );
            for named in &segment.names {
                println!("        {} -> {}", named.id, named.name);
            }
        }
    }

    Ok(views)
}

//! Orchestrator: runs the per-watercourse pipeline and folds the results
//! into a single feature id -> new name mapping.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::DEFAULT_TOLERANCE;
use crate::error::RenameResult;
use crate::model::{FeatureId, NameAssignment, PointFeature, Watercourse, ABSENT_NAME_SENTINEL};
use crate::services::locate::locate_points;
use crate::services::naming::name_segment;
use crate::services::segment::{segment_run, Segment};

/// Tunables for one rename run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameOptions {
    /// Point-to-line distance below which a point is on the line.
    pub tolerance: f64,
    /// Seed value for points without a legacy name.
    pub absent_sentinel: String,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self { tolerance: DEFAULT_TOLERANCE, absent_sentinel: ABSENT_NAME_SENTINEL.to_string() }
    }
}

/// Segments and generated names for one watercourse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatercoursePlan {
    pub watercourse: String,
    /// Number of points found on the line.
    pub located: usize,
    pub segments: Vec<PlannedSegment>,
}

/// A segment together with the names generated for its members.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedSegment {
    #[serde(flatten)]
    pub segment: Segment,
    pub names: Vec<(FeatureId, String)>,
}

impl WatercoursePlan {
    /// Generated names across all segments, in run order.
    pub fn assignments(&self) -> impl Iterator<Item = (FeatureId, &str)> + '_ {
        self.segments.iter().flat_map(|planned| {
            planned.names.iter().map(|(id, name)| (*id, name.as_str()))
        })
    }

    pub fn renamed(&self) -> usize {
        self.segments.iter().map(|planned| planned.names.len()).sum()
    }

    /// Short per-watercourse summary for run reports.
    pub fn report(&self) -> WatercourseReport {
        WatercourseReport {
            name: self.watercourse.clone(),
            located: self.located,
            segments: self.segments.len(),
            renamed: self.renamed(),
        }
    }
}

/// Summary of what happened to one watercourse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatercourseReport {
    pub name: String,
    pub located: usize,
    pub segments: usize,
    pub renamed: usize,
}

/// Final mapping plus per-watercourse summaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenameOutcome {
    pub names: NameAssignment,
    pub watercourses: Vec<WatercourseReport>,
}

/// Initial mapping: every point keeps its legacy name, or gets the sentinel.
pub fn seed_names(points: &[PointFeature], absent_sentinel: &str) -> NameAssignment {
    points
        .iter()
        .map(|point| {
            let name = point.legacy_name.clone().unwrap_or_else(|| absent_sentinel.to_string());
            (point.id, name)
        })
        .collect()
}

/// Locate, segment and name the points of a single watercourse.
pub fn plan_watercourse(
    points: &[PointFeature],
    watercourse: &Watercourse,
    options: &RenameOptions,
) -> RenameResult<WatercoursePlan> {
    let run = locate_points(points, watercourse, options.tolerance)?;
    let segments = if run.is_empty() { Vec::new() } else { segment_run(&run) };

    let segments = segments
        .into_iter()
        .map(|segment| {
            let names = name_segment(&segment)?;
            Ok(PlannedSegment { segment, names })
        })
        .collect::<RenameResult<Vec<_>>>()?;

    Ok(WatercoursePlan { watercourse: watercourse.name.clone(), located: run.len(), segments })
}

/// Rename all points lying on `watercourses`.
///
/// Watercourses are processed in the given order; a point lying on several
/// of them ends up with the name from the last one. Watercourses with no
/// points on them are skipped.
pub fn rename(
    points: &[PointFeature],
    watercourses: &[Watercourse],
    options: &RenameOptions,
) -> RenameResult<RenameOutcome> {
    let seed = RenameOutcome {
        names: seed_names(points, &options.absent_sentinel),
        watercourses: Vec::with_capacity(watercourses.len()),
    };

    let outcome = watercourses
        .iter()
        .try_fold(seed, |acc, watercourse| fold_watercourse(acc, points, watercourse, options))?;

    info!(
        points = points.len(),
        watercourses = outcome.watercourses.len(),
        renamed = outcome.watercourses.iter().map(|w| w.renamed).sum::<usize>(),
        "rename finished"
    );
    Ok(outcome)
}

/// Merge one watercourse's generated names into the accumulated outcome.
fn fold_watercourse(
    mut acc: RenameOutcome,
    points: &[PointFeature],
    watercourse: &Watercourse,
    options: &RenameOptions,
) -> RenameResult<RenameOutcome> {
    let plan = plan_watercourse(points, watercourse, options)?;
    if plan.located == 0 {
        debug!(watercourse = %watercourse.name, "no points within tolerance, skipping");
        return Ok(acc);
    }
    debug!(
        watercourse = %plan.watercourse,
        located = plan.located,
        segments = plan.segments.len(),
        renamed = plan.renamed(),
        "planned watercourse"
    );
    for (id, name) in plan.assignments() {
        acc.names.insert(id, name.to_string());
    }
    acc.watercourses.push(plan.report());
    Ok(acc)
}

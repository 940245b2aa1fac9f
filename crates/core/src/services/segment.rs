//! Breakpoint Segmenter: split an ordered run at legacy-named anchors.
//!
//! Anchors are segment boundaries, never members. Given anchors at run
//! positions `b0 < b1 < ... < bk` over a run of length `n`:
//! - `[0, b0)` when `b0 > 0` (no start anchor, ends at `b0`),
//! - `[bi + 1, bi+1)` for each consecutive pair (possibly empty),
//! - `[bk + 1, n)` when `bk < n - 1` (starts at `bk`, no end anchor).
//!
//! A run without anchors is a single unanchored segment `[0, n)`.

use serde::Serialize;

use crate::model::{AnchorPattern, FeatureId};
use crate::services::locate::OrderedRun;

/// Position of a legacy-named point within an ordered run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakpoint {
    pub index: usize,
    pub point_id: FeatureId,
    pub anchor_name: String,
}

/// Anchor bounding a segment on one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anchor {
    /// Run position of the anchor point.
    pub index: usize,
    pub point_id: FeatureId,
    pub name: String,
}

impl From<&Breakpoint> for Anchor {
    fn from(bp: &Breakpoint) -> Self {
        Self { index: bp.index, point_id: bp.point_id, name: bp.anchor_name.clone() }
    }
}

/// Contiguous run of anchor-free points between two boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub watercourse: String,
    /// First run index covered (inclusive).
    pub start: usize,
    /// Run index one past the last covered point.
    pub end: usize,
    pub start_anchor: Option<Anchor>,
    pub end_anchor: Option<Anchor>,
    /// Feature ids of `run[start..end]`, in arclength order.
    pub member_ids: Vec<FeatureId>,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.member_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.member_ids.is_empty()
    }

    pub fn pattern(&self) -> AnchorPattern {
        AnchorPattern::from_presence(self.start_anchor.is_some(), self.end_anchor.is_some())
    }

    pub fn start_anchor_name(&self) -> Option<&str> {
        self.start_anchor.as_ref().map(|a| a.name.as_str())
    }

    pub fn end_anchor_name(&self) -> Option<&str> {
        self.end_anchor.as_ref().map(|a| a.name.as_str())
    }
}

/// Every run position whose point carries a usable legacy name, ascending.
pub fn breakpoints(run: &OrderedRun<'_>) -> Vec<Breakpoint> {
    run.points
        .iter()
        .enumerate()
        .filter_map(|(index, located)| {
            located.feature.anchor().map(|name| Breakpoint {
                index,
                point_id: located.feature.id,
                anchor_name: name.to_string(),
            })
        })
        .collect()
}

/// Partition `run` into segments bounded by its breakpoints.
///
/// Deterministic: the same run always yields the same boundaries and anchors.
pub fn segment_run(run: &OrderedRun<'_>) -> Vec<Segment> {
    let bps = breakpoints(run);
    let len = run.len();

    let (first, last) = match (bps.first(), bps.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return vec![build_segment(run, 0, len, None, None)],
    };

    let mut segments = Vec::with_capacity(bps.len() + 1);
    if first.index > 0 {
        segments.push(build_segment(run, 0, first.index, None, Some(first)));
    }
    for pair in bps.windows(2) {
        let (before, after) = (&pair[0], &pair[1]);
        segments.push(build_segment(run, before.index + 1, after.index, Some(before), Some(after)));
    }
    if last.index + 1 < len {
        segments.push(build_segment(run, last.index + 1, len, Some(last), None));
    }
    segments
}

fn build_segment(
    run: &OrderedRun<'_>,
    start: usize,
    end: usize,
    start_bp: Option<&Breakpoint>,
    end_bp: Option<&Breakpoint>,
) -> Segment {
    let member_ids = run.points[start..end].iter().map(|located| located.feature.id).collect();
    Segment {
        watercourse: run.watercourse.clone(),
        start,
        end,
        start_anchor: start_bp.map(Anchor::from),
        end_anchor: end_bp.map(Anchor::from),
        member_ids,
    }
}

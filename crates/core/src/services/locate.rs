//! Point Locator: which points lie on a watercourse, and in what order.
//!
//! Exact intersection tests are unreliable for points digitized onto a line
//! (coordinates are rounded), so a point counts as "on" the line when its
//! distance to it is strictly below a tolerance.

use geo::{Closest, ClosestPoint, Distance, Euclidean, Geometry, Length, Line, Point};

use crate::error::{RenameError, RenameResult};
use crate::model::{geometry_kind, FeatureId, PointFeature, Watercourse};

/// A point found on a watercourse, with its position along the line.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedPoint<'a> {
    pub feature: &'a PointFeature,
    /// Distance from the line start to the point's projection onto the line.
    pub arclength: f64,
    /// Distance from the point to the line.
    pub offset: f64,
}

/// Points of one watercourse, ascending by arclength.
///
/// Built once by [`locate_points`] and never reordered afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedRun<'a> {
    pub watercourse: String,
    pub points: Vec<LocatedPoint<'a>>,
}

impl<'a> OrderedRun<'a> {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Feature at position `index` of the run.
    pub fn feature(&self, index: usize) -> Option<&'a PointFeature> {
        self.points.get(index).map(|located| located.feature)
    }

    /// Feature ids in run order.
    pub fn ids(&self) -> Vec<FeatureId> {
        self.points.iter().map(|located| located.feature.id).collect()
    }
}

/// One straight piece of the watercourse with its offset from the line start.
#[derive(Debug, Clone, Copy)]
struct MeasuredLine {
    line: Line<f64>,
    start_offset: f64,
}

/// Projection of a point onto the watercourse.
#[derive(Debug, Clone, Copy)]
struct Projection {
    distance: f64,
    arclength: f64,
}

/// Find the points lying on `watercourse` and order them along it.
///
/// Equal arclengths keep the order in which the points were supplied.
/// Points without a geometry are never located.
pub fn locate_points<'a>(
    points: &'a [PointFeature],
    watercourse: &Watercourse,
    tolerance: f64,
) -> RenameResult<OrderedRun<'a>> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(RenameError::InvalidTolerance(tolerance));
    }
    let pieces = measured_lines(watercourse)?;

    let mut located: Vec<LocatedPoint<'a>> = points
        .iter()
        .filter_map(|feature| {
            let projection = project(&pieces, feature.geometry?)?;
            (projection.distance < tolerance).then_some(LocatedPoint {
                feature,
                arclength: projection.arclength,
                offset: projection.distance,
            })
        })
        .collect();

    // `sort_by` is stable: ties stay in input order.
    located.sort_by(|a, b| a.arclength.total_cmp(&b.arclength));

    Ok(OrderedRun { watercourse: watercourse.name.clone(), points: located })
}

/// Flatten the watercourse into consecutive straight pieces.
///
/// Parts of a multi-line are measured as if concatenated in stored order.
fn measured_lines(watercourse: &Watercourse) -> RenameResult<Vec<MeasuredLine>> {
    let lines: Vec<Line<f64>> = match &watercourse.geometry {
        Geometry::Line(line) => vec![*line],
        Geometry::LineString(ls) => ls.lines().collect(),
        Geometry::MultiLineString(mls) => mls.0.iter().flat_map(|ls| ls.lines()).collect(),
        other => {
            return Err(RenameError::NotALine {
                watercourse: watercourse.name.clone(),
                found: geometry_kind(other),
            })
        }
    };

    let mut start_offset = 0.0;
    Ok(lines
        .into_iter()
        .map(|line| {
            let measured = MeasuredLine { line, start_offset };
            start_offset += line.length::<Euclidean>();
            measured
        })
        .collect())
}

/// Closest position on the watercourse; the earliest piece wins ties.
fn project(pieces: &[MeasuredLine], point: Point<f64>) -> Option<Projection> {
    let mut best: Option<Projection> = None;
    for piece in pieces {
        let closest = if piece.line.start == piece.line.end {
            piece.line.start_point()
        } else {
            match piece.line.closest_point(&point) {
                Closest::Intersection(p) | Closest::SinglePoint(p) => p,
                Closest::Indeterminate => continue,
            }
        };
        let distance = Euclidean::distance(point, closest);
        if best.map_or(true, |b| distance < b.distance) {
            let along = Euclidean::distance(piece.line.start_point(), closest);
            best = Some(Projection { distance, arclength: piece.start_offset + along });
        }
    }
    best
}

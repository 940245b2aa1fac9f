//! Core data model: point features, watercourses, and the name mapping.

use std::collections::BTreeMap;

use geo::{Geometry, Point};
use serde::{Deserialize, Serialize};

/// Stable feature identifier (the GeoPackage `fid`).
pub type FeatureId = i64;

/// Placeholder written for points that carry no legacy name.
///
/// Distinct from the empty string; never used as an anchor.
pub const ABSENT_NAME_SENTINEL: &str = "NULL";

/// Final feature id -> new name mapping produced by a rename run.
///
/// Ordered so that iteration and serialized output are deterministic.
pub type NameAssignment = BTreeMap<FeatureId, String>;

/// Immutable view of one point record.
#[derive(Debug, Clone, PartialEq)]
pub struct PointFeature {
    pub id: FeatureId,
    /// `None` for records stored without a usable geometry; such points are
    /// seeded but never located on a line.
    pub geometry: Option<Point<f64>>,
    /// Legacy name attribute, `None` when the source value is NULL.
    pub legacy_name: Option<String>,
}

impl PointFeature {
    pub fn new(id: FeatureId, geometry: Point<f64>, legacy_name: Option<String>) -> Self {
        Self { id, geometry: Some(geometry), legacy_name }
    }

    /// A record with no geometry, kept so it still receives a name.
    pub fn without_geometry(id: FeatureId, legacy_name: Option<String>) -> Self {
        Self { id, geometry: None, legacy_name }
    }

    /// The legacy name if it can act as a segmentation anchor.
    ///
    /// Empty strings are treated like missing values.
    pub fn anchor(&self) -> Option<&str> {
        self.legacy_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// A single logical line feature formed by dissolving all line records
/// sharing one identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Watercourse {
    pub name: String,
    /// Expected to be a `LineString` or `MultiLineString`.
    pub geometry: Geometry<f64>,
}

impl Watercourse {
    pub fn new(name: impl Into<String>, geometry: impl Into<Geometry<f64>>) -> Self {
        Self { name: name.into(), geometry: geometry.into() }
    }
}

/// Four-way classification of a segment by which boundary anchors exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorPattern {
    /// No anchor before, none after.
    Unanchored,
    /// No anchor before, anchor after.
    BeforeAnchor,
    /// Anchors on both sides.
    BetweenAnchors,
    /// Anchor before, none after.
    AfterAnchor,
}

impl AnchorPattern {
    pub fn from_presence(start: bool, end: bool) -> Self {
        match (start, end) {
            (false, false) => AnchorPattern::Unanchored,
            (false, true) => AnchorPattern::BeforeAnchor,
            (true, true) => AnchorPattern::BetweenAnchors,
            (true, false) => AnchorPattern::AfterAnchor,
        }
    }

    /// Short two-letter code (`NN`, `NY`, `YY`, `YN`) used in listings.
    pub fn code(self) -> &'static str {
        match self {
            AnchorPattern::Unanchored => "NN",
            AnchorPattern::BeforeAnchor => "NY",
            AnchorPattern::BetweenAnchors => "YY",
            AnchorPattern::AfterAnchor => "YN",
        }
    }
}

/// Human-readable geometry type name for error messages.
pub fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        _ => "Geometry",
    }
}

//! GeoPackage geometry blobs: the `GP` binary header followed by WKB.
//!
//! Decoding is done by `geozero`; this module only maps empty geometries to
//! `None` so callers can treat them like NULL.

use geo::Geometry;
use geozero::error::GeozeroError;
use geozero::wkb::GpkgWkb;
use geozero::ToGeo;

/// Bit of the header flags byte marking an empty geometry.
const EMPTY_FLAG: u8 = 0x10;

/// Decode a GeoPackage geometry blob; `None` for empty geometries.
pub fn decode_gpkg_blob(blob: &[u8]) -> Result<Option<Geometry<f64>>, GeozeroError> {
    if blob.get(3).is_some_and(|flags| flags & EMPTY_FLAG != 0) {
        return Ok(None);
    }
    let geometry = GpkgWkb(blob.to_vec()).to_geo()?;
    Ok((!is_empty(&geometry)).then_some(geometry))
}

/// Empty points are stored as NaN coordinates; empty lines have no vertices.
fn is_empty(geometry: &Geometry<f64>) -> bool {
    match geometry {
        Geometry::Point(p) => p.x().is_nan() || p.y().is_nan(),
        Geometry::MultiPoint(mp) => mp.0.is_empty(),
        Geometry::LineString(ls) => ls.0.is_empty(),
        Geometry::MultiLineString(mls) => mls.0.iter().all(|ls| ls.0.is_empty()),
        _ => false,
    }
}

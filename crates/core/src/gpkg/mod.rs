//! GeoPackage integration: reading the point and line layers and writing the
//! new names back.
//!
//! A GeoPackage is a SQLite database. Feature tables are registered in
//! `gpkg_geometry_columns`; geometries are stored as GeoPackage binary blobs
//! (see [`wkb`]).
//!
//! This module provides:
//! - `GeoPackage`: a small wrapper over a `rusqlite::Connection`.
//! - `LayerInfo`: schema introspection for one feature table.
//! - `prepare_results_file`: copy-before-write so the source stays intact.

pub mod layer;
pub mod util;
pub mod wkb;

use std::path::{Path, PathBuf};

use geo::{Geometry, LineString, Point};
use geozero::error::GeozeroError;
use rusqlite::types::Value;
use rusqlite::{params, Connection, OpenFlags};
use thiserror::Error;
use tracing::{debug, warn};

pub use layer::{quote_ident, ColumnInfo, LayerInfo};
pub use util::prepare_results_file;

use crate::model::{geometry_kind, FeatureId, NameAssignment, PointFeature};
use crate::services::dissolve::LineRecord;

const POINT_TYPES: &[&str] = &["POINT", "MULTIPOINT"];
const LINE_TYPES: &[&str] = &["LINESTRING", "MULTILINESTRING"];

/// Error type for GeoPackage operations.
#[derive(Debug, Error)]
pub enum GpkgError {
    /// Underlying SQLite error.
    #[error("SQLite error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// The database has no `gpkg_geometry_columns` table.
    #[error("Not a GeoPackage: gpkg_geometry_columns table is missing")]
    NotAGeoPackage,

    #[error("Layer '{0}' not found in GeoPackage")]
    MissingLayer(String),

    #[error("Layer '{0}' has no integer primary key")]
    MissingPrimaryKey(String),

    #[error("No field named '{field}' in layer '{layer}'")]
    MissingField { layer: String, field: String },

    /// The layer's declared geometry type is not what the operation needs.
    #[error("Layer '{layer}' has geometry type {found}; expected {expected}")]
    WrongLayerType { layer: String, expected: String, found: String },

    /// A single feature carries a geometry of the wrong kind.
    #[error("Feature {fid} in layer '{layer}' is a {found}; expected {expected}")]
    UnexpectedGeometry {
        layer: String,
        fid: FeatureId,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid geometry blob for feature {fid} in layer '{layer}': {source}")]
    Geometry {
        layer: String,
        fid: FeatureId,
        #[source]
        source: GeozeroError,
    },
}

/// Convenience result type for GeoPackage operations.
pub type GpkgResult<T> = Result<T, GpkgError>;

/// Open GeoPackage file.
#[derive(Debug)]
pub struct GeoPackage {
    conn: Connection,
    path: PathBuf,
}

impl GeoPackage {
    /// Open an existing GeoPackage for reading and writing.
    pub fn open(path: impl AsRef<Path>) -> GpkgResult<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn, path })
    }

    /// Open an existing GeoPackage without write access.
    pub fn open_read_only(path: impl AsRef<Path>) -> GpkgResult<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Schema of the feature layer `name`.
    pub fn layer(&self, name: &str) -> GpkgResult<LayerInfo> {
        LayerInfo::load(&self.conn, name)
    }

    /// Read every point of `layer` with its `legacy_field` value, by feature id.
    ///
    /// Rows without a geometry (NULL or empty) are kept with `geometry: None`
    /// so they still take part in the name mapping.
    pub fn read_points(&self, layer: &str, legacy_field: &str) -> GpkgResult<Vec<PointFeature>> {
        let info = self.layer(layer)?;
        info.require_geometry_type(POINT_TYPES)?;
        info.require_field(legacy_field)?;

        let sql = format!(
            "SELECT {fid}, {geom}, {field} FROM {table} ORDER BY {fid}",
            fid = quote_ident(&info.fid_column),
            geom = quote_ident(&info.geometry_column),
            field = quote_ident(legacy_field),
            table = quote_ident(&info.table),
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;

        let mut points = Vec::new();
        while let Some(row) = rows.next()? {
            let fid: FeatureId = row.get(0)?;
            let blob: Option<Vec<u8>> = row.get(1)?;
            let legacy_name = value_to_text(row.get(2)?);

            let point = match decode_row_geometry(&info, fid, blob.as_deref())? {
                None => None,
                Some(Geometry::Point(p)) => Some(p),
                Some(Geometry::MultiPoint(mp)) if mp.0.len() == 1 => Some(mp.0[0]),
                Some(other) => {
                    return Err(GpkgError::UnexpectedGeometry {
                        layer: info.table.clone(),
                        fid,
                        expected: "Point",
                        found: geometry_kind(&other),
                    })
                }
            };
            let point = point.filter(|p| !is_empty_point(p));
            if point.is_none() {
                warn!(layer = %info.table, fid, "point has no geometry, it will not be located");
            }
            points.push(PointFeature { id: fid, geometry: point, legacy_name });
        }

        debug!(layer = %info.table, count = points.len(), "read points");
        Ok(points)
    }

    /// Read every line of `layer`, keyed by the text value of `key_field`.
    ///
    /// Rows with a NULL key or no geometry are skipped.
    pub fn read_lines(&self, layer: &str, key_field: &str) -> GpkgResult<Vec<LineRecord>> {
        let info = self.layer(layer)?;
        info.require_geometry_type(LINE_TYPES)?;
        info.require_field(key_field)?;

        let sql = format!(
            "SELECT {fid}, {geom}, {field} FROM {table} ORDER BY {fid}",
            fid = quote_ident(&info.fid_column),
            geom = quote_ident(&info.geometry_column),
            field = quote_ident(key_field),
            table = quote_ident(&info.table),
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let fid: FeatureId = row.get(0)?;
            let blob: Option<Vec<u8>> = row.get(1)?;
            let Some(key) = value_to_text(row.get(2)?) else {
                warn!(layer = %info.table, fid, field = key_field, "line has no key, skipping");
                continue;
            };

            let Some(geometry) = decode_row_geometry(&info, fid, blob.as_deref())? else {
                warn!(layer = %info.table, fid, "line has no geometry, skipping");
                continue;
            };
            let parts: Vec<LineString<f64>> = match geometry {
                Geometry::LineString(ls) => vec![ls],
                Geometry::MultiLineString(mls) => mls.0,
                other => {
                    return Err(GpkgError::UnexpectedGeometry {
                        layer: info.table.clone(),
                        fid,
                        expected: "LineString",
                        found: geometry_kind(&other),
                    })
                }
            };
            records.push(LineRecord::new(key, parts));
        }

        debug!(layer = %info.table, count = records.len(), "read lines");
        Ok(records)
    }

    /// Write `names` into `field` of `layer`, keyed by feature id.
    ///
    /// Runs in a single transaction; returns the number of rows updated.
    pub fn write_names(
        &mut self,
        layer: &str,
        field: &str,
        names: &NameAssignment,
    ) -> GpkgResult<usize> {
        let info = self.layer(layer)?;
        info.require_field(field)?;

        let sql = format!(
            "UPDATE {table} SET {field} = ?1 WHERE {fid} = ?2",
            table = quote_ident(&info.table),
            field = quote_ident(field),
            fid = quote_ident(&info.fid_column),
        );

        let tx = self.conn.transaction()?;
        let mut updated = 0;
        {
            let mut stmt = tx.prepare(&sql)?;
            for (fid, name) in names {
                updated += stmt.execute(params![name, fid])?;
            }
        }
        tx.commit()?;

        debug!(layer = %info.table, field, updated, "wrote names");
        Ok(updated)
    }
}

fn decode_row_geometry(
    info: &LayerInfo,
    fid: FeatureId,
    blob: Option<&[u8]>,
) -> GpkgResult<Option<Geometry<f64>>> {
    let Some(blob) = blob else {
        return Ok(None);
    };
    wkb::decode_gpkg_blob(blob).map_err(|source| GpkgError::Geometry {
        layer: info.table.clone(),
        fid,
        source,
    })
}

fn is_empty_point(point: &Point<f64>) -> bool {
    point.x().is_nan() || point.y().is_nan()
}

/// Attribute value as text; NULL stays absent.
fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) => Some(f.to_string()),
        Value::Text(s) => Some(s),
        Value::Blob(b) => Some(String::from_utf8_lossy(&b).into_owned()),
    }
}

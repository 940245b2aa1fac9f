// Shared fixtures for core integration tests.
#![allow(dead_code)]

use std::path::Path;

use geo::{Geometry, LineString, Point};
use geozero::{CoordDimensions, ToWkb};
use reach_core::model::{FeatureId, PointFeature};
use rusqlite::{params, Connection};

pub fn pt(id: FeatureId, x: f64, y: f64, legacy: Option<&str>) -> PointFeature {
    PointFeature::new(id, Point::new(x, y), legacy.map(str::to_string))
}

pub struct FixturePoint {
    pub fid: FeatureId,
    pub xy: (f64, f64),
    pub legacy: Option<&'static str>,
}

pub struct FixtureLine {
    pub key: &'static str,
    pub coords: Vec<(f64, f64)>,
}

/// Two watercourses, one of them split across two line records.
///
/// Watercourse A (y = 0) holds fids 1..=5 in scrambled order with "4P" in
/// the middle; B (y = 10) runs from "3P" to "9P". Fids 6 and 7 are off-line.
pub fn standard_points() -> Vec<FixturePoint> {
    let p = |fid, x, y, legacy| FixturePoint { fid, xy: (x, y), legacy };
    vec![
        p(1, 6.0, 0.0, None),
        p(2, 1.0, 0.0, None),
        p(3, 3.0, 0.0, Some("4P")),
        p(4, 2.0, 0.0, None),
        p(5, 4.0, 0.0, None),
        p(6, 50.0, 50.0, None),
        p(7, 60.0, 60.0, Some("77P")),
        p(8, 2.0, 10.0, Some("3P")),
        p(9, 5.0, 10.0, None),
        p(10, 7.0, 10.0, None),
        p(11, 9.0, 10.0, Some("9P")),
    ]
}

pub fn standard_lines() -> Vec<FixtureLine> {
    vec![
        FixtureLine { key: "A", coords: vec![(0.0, 0.0), (5.0, 0.0)] },
        FixtureLine { key: "B", coords: vec![(0.0, 10.0), (10.0, 10.0)] },
        FixtureLine { key: "A", coords: vec![(5.0, 0.0), (10.0, 0.0)] },
    ]
}

/// Write a minimal GeoPackage with layers `punkty` and `cieki`.
pub fn create_gpkg(path: &Path, points: &[FixturePoint], lines: &[FixtureLine]) {
    let conn = Connection::open(path).expect("open fixture gpkg");
    conn.execute_batch(
        r#"
        CREATE TABLE gpkg_geometry_columns (
            table_name TEXT NOT NULL,
            column_name TEXT NOT NULL,
            geometry_type_name TEXT NOT NULL,
            srs_id INTEGER NOT NULL,
            z TINYINT NOT NULL,
            m TINYINT NOT NULL
        );
        CREATE TABLE punkty (
            fid INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
            geom POINT,
            "numer-stary" TEXT,
            "numer-nowy" TEXT
        );
        CREATE TABLE cieki (
            fid INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
            geom LINESTRING,
            oznaczenie TEXT
        );
        INSERT INTO gpkg_geometry_columns VALUES ('punkty', 'geom', 'POINT', 2180, 0, 0);
        INSERT INTO gpkg_geometry_columns VALUES ('cieki', 'geom', 'LINESTRING', 2180, 0, 0);
        "#,
    )
    .expect("create fixture schema");

    for p in points {
        let blob = gpkg_blob(&Geometry::Point(Point::new(p.xy.0, p.xy.1)));
        conn.execute(
            r#"INSERT INTO punkty (fid, geom, "numer-stary") VALUES (?1, ?2, ?3)"#,
            params![p.fid, blob, p.legacy],
        )
        .expect("insert point");
    }
    for l in lines {
        let blob = gpkg_blob(&Geometry::LineString(LineString::from(l.coords.clone())));
        conn.execute("INSERT INTO cieki (geom, oznaczenie) VALUES (?1, ?2)", params![blob, l.key])
            .expect("insert line");
    }
}

/// Read back the `numer-nowy` column as (fid, value) pairs.
pub fn read_new_names(path: &Path) -> Vec<(FeatureId, Option<String>)> {
    let conn = Connection::open(path).expect("open gpkg");
    let mut stmt =
        conn.prepare(r#"SELECT fid, "numer-nowy" FROM punkty ORDER BY fid"#).expect("prepare");
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .expect("query")
        .collect::<Result<Vec<_>, _>>()
        .expect("rows");
    rows
}

/// GeoPackage blob (little-endian, no envelope) for a fixture geometry.
pub fn gpkg_blob(geometry: &Geometry<f64>) -> Vec<u8> {
    geometry
        .to_gpkg_wkb(CoordDimensions::xy(), Some(2180), Vec::new())
        .expect("encode fixture geometry")
}

// Fixture GeoPackages for CLI tests.
#![allow(dead_code)]

use std::path::Path;

use geo::Geometry;
use geozero::{CoordDimensions, ToWkb};
use reach_core::model::FeatureId;
use rusqlite::{params, Connection};

/// Points as (fid, x, y, legacy name).
pub type PointRow = (FeatureId, f64, f64, Option<&'static str>);

/// Line records as (identifier, coordinates).
pub type LineRow = (&'static str, Vec<(f64, f64)>);

pub fn standard_points() -> Vec<PointRow> {
    vec![
        (1, 6.0, 0.0, None),
        (2, 1.0, 0.0, None),
        (3, 3.0, 0.0, Some("4P")),
        (4, 2.0, 0.0, None),
        (5, 4.0, 0.0, None),
        (6, 50.0, 50.0, None),
        (7, 60.0, 60.0, Some("77P")),
        (8, 2.0, 10.0, Some("3P")),
        (9, 5.0, 10.0, None),
        (10, 7.0, 10.0, None),
        (11, 9.0, 10.0, Some("9P")),
    ]
}

pub fn standard_lines() -> Vec<LineRow> {
    vec![
        ("A", vec![(0.0, 0.0), (5.0, 0.0)]),
        ("B", vec![(0.0, 10.0), (10.0, 10.0)]),
        ("A", vec![(5.0, 0.0), (10.0, 0.0)]),
    ]
}

/// Names expected in `numer-nowy` after renaming the standard fixture.
pub fn standard_names() -> Vec<(FeatureId, Option<String>)> {
    [
        (1, "6P"),
        (2, "1Pnowy"),
        (3, "4P"),
        (4, "2Pnowy"),
        (5, "5P"),
        (6, "NULL"),
        (7, "77P"),
        (8, "3P"),
        (9, "3Pa"),
        (10, "3Pb"),
        (11, "9P"),
    ]
    .into_iter()
    .map(|(fid, name)| (fid, Some(name.to_string())))
    .collect()
}

/// Write a GeoPackage with point layer `punkty` and line layer `cieki`.
pub fn create_gpkg(path: &Path, points: &[PointRow], lines: &[LineRow]) {
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

    for (fid, x, y, legacy) in points {
        let blob = gpkg_blob(&geo::Point::new(*x, *y).into());
        conn.execute(
            r#"INSERT INTO punkty (fid, geom, "numer-stary") VALUES (?1, ?2, ?3)"#,
            params![fid, blob, legacy],
        )
        .expect("insert point");
    }
    for (key, coords) in lines {
        let line = geo::LineString::from(coords.clone());
        let blob = gpkg_blob(&line.into());
        conn.execute("INSERT INTO cieki (geom, oznaczenie) VALUES (?1, ?2)", params![blob, key])
            .expect("insert line");
    }
}

pub fn create_standard_gpkg(path: &Path) {
    create_gpkg(path, &standard_points(), &standard_lines());
}

/// Read back `numer-nowy` as (fid, value) pairs ordered by fid.
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

use rusqlite::{params, Connection, OptionalExtension};

use crate::gpkg::{GpkgError, GpkgResult};

/// Column of a feature table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub declared_type: String,
}

/// Schema of one GeoPackage feature layer.
///
/// Read from `gpkg_geometry_columns` and the table's own `table_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerInfo {
    pub table: String,
    pub geometry_column: String,
    /// Declared geometry type, upper-cased (e.g. `POINT`, `MULTILINESTRING`).
    pub geometry_type: String,
    /// Integer primary key holding the feature id.
    pub fid_column: String,
    pub columns: Vec<ColumnInfo>,
}

impl LayerInfo {
    /// Load the layer schema for `table`.
    pub fn load(conn: &Connection, table: &str) -> GpkgResult<Self> {
        let has_registry: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master \
             WHERE type = 'table' AND name = 'gpkg_geometry_columns')",
            [],
            |row| row.get(0),
        )?;
        if !has_registry {
            return Err(GpkgError::NotAGeoPackage);
        }

        let (geometry_column, geometry_type): (String, String) = conn
            .query_row(
                "SELECT column_name, geometry_type_name FROM gpkg_geometry_columns \
                 WHERE table_name = ?1",
                params![table],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?
            .ok_or_else(|| GpkgError::MissingLayer(table.to_string()))?;

        let mut stmt =
            conn.prepare("SELECT name, type, pk FROM pragma_table_info(?1) ORDER BY cid")?;
        let rows = stmt.query_map(params![table], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, i64>(2)?))
        })?;

        let mut columns = Vec::new();
        let mut fid_column = None;
        for row in rows {
            let (name, declared_type, pk) = row?;
            if pk > 0 && fid_column.is_none() && declared_type.eq_ignore_ascii_case("INTEGER") {
                fid_column = Some(name.clone());
            }
            columns.push(ColumnInfo { name, declared_type });
        }
        let fid_column =
            fid_column.ok_or_else(|| GpkgError::MissingPrimaryKey(table.to_string()))?;

        Ok(Self {
            table: table.to_string(),
            geometry_column,
            geometry_type: geometry_type.to_ascii_uppercase(),
            fid_column,
            columns,
        })
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.columns.iter().any(|c| c.name == field)
    }

    /// Fail unless `field` is an attribute column of this layer.
    pub fn require_field(&self, field: &str) -> GpkgResult<()> {
        if self.has_field(field) {
            Ok(())
        } else {
            Err(GpkgError::MissingField { layer: self.table.clone(), field: field.to_string() })
        }
    }

    /// Fail unless the declared geometry type is one of `accepted`.
    pub fn require_geometry_type(&self, accepted: &'static [&'static str]) -> GpkgResult<()> {
        if accepted.contains(&self.geometry_type.as_str()) {
            Ok(())
        } else {
            Err(GpkgError::WrongLayerType {
                layer: self.table.clone(),
                expected: accepted.join(" or "),
                found: self.geometry_type.clone(),
            })
        }
    }
}

/// Quote an SQL identifier (field names like `numer-stary` need it).
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

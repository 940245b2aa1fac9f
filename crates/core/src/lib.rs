//! reach-core
//!
//! Core library for renaming survey points that lie along watercourses.
//!
//! This crate defines the data model, the point ordering / segmentation /
//! naming pipeline, line dissolving, configuration, and the GeoPackage
//! integration used to read input layers and write the new names back.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (CLI, batch scripts, etc.).

pub mod config;
pub mod error;
pub mod gpkg;
pub mod model;
pub mod services;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

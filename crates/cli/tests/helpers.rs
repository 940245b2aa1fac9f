use std::fs;
use std::path::{Path, PathBuf};

use reach_renamer::{canonicalize_or_current, default_output_path, DEFAULT_RESULTS_FILENAME};
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_resolves_existing_path() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("data.gpkg");
    fs::write(&file, b"").expect("touch");

    let result = canonicalize_or_current(file.to_str().expect("utf-8")).expect("canonicalize");
    assert_eq!(result, file.canonicalize().expect("canonicalize file"));
}

#[test]
fn canonicalize_or_current_joins_missing_path_onto_cwd() {
    let cwd = std::env::current_dir().expect("cwd");
    let result = canonicalize_or_current("does-not-exist/out.gpkg").expect("resolve");
    assert_eq!(result, cwd.join("does-not-exist/out.gpkg"));
}

#[test]
fn default_output_sits_next_to_input() {
    assert_eq!(
        default_output_path(Path::new("/data/survey/input.gpkg")),
        PathBuf::from("/data/survey").join(DEFAULT_RESULTS_FILENAME)
    );
    assert_eq!(default_output_path(Path::new("input.gpkg")), PathBuf::from("results.gpkg"));
}

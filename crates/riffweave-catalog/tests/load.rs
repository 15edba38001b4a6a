//! Loading catalog files from disk.

use std::fs;

use pretty_assertions::assert_eq;
use riffweave_catalog::{CatalogError, CatalogSet, CellRole, ErrorCode};

#[test]
fn load_derives_siblings_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalogs.json");
    fs::write(
        &path,
        r#"{
            "sus4": [["C4", "D4", "F4", "G4", "A4"]],
            "major_resolution": [["D4", "E4", "G4", "B4", "C5"]]
        }"#,
    )
    .unwrap();

    let set = CatalogSet::load(&path).unwrap();

    for role in [
        CellRole::Sus4Up2,
        CellRole::Sus4Down2,
        CellRole::Sus4Up5,
        CellRole::Sus4Down5,
        CellRole::Sus4Down4,
        CellRole::MajorResolutionDown5,
        CellRole::BaseMajorResolutionDown5,
    ] {
        assert!(set.contains(role), "expected derived role {role}");
    }
    assert!(!set.contains(CellRole::MajorUp5));

    let down4 = &set.get(CellRole::Sus4Down4).unwrap().cells[0];
    assert_eq!(down4.first().to_string(), "G3");

    let base_down5 = set.get(CellRole::BaseMajorResolutionDown5).unwrap();
    let down5 = set.get(CellRole::MajorResolutionDown5).unwrap();
    assert_eq!(base_down5.cells, down5.cells);
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = CatalogSet::load(&path).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
    assert_eq!(err.code(), "CATALOG_006");
    assert_eq!(err.category(), "catalog");
}

#[test]
fn load_reports_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{"sus4": [["C4", "D4"]"#).unwrap();

    let err = CatalogSet::load(&path).unwrap_err();
    assert_eq!(err.code(), "CATALOG_001");
}

#[test]
fn hash_is_stable_across_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalogs.json");
    fs::write(&path, r#"{"major": [["C4", "E4", "G4", "B4", "C5"]]}"#).unwrap();

    let first = CatalogSet::load(&path).unwrap();
    let second = CatalogSet::load(&path).unwrap();
    assert_eq!(first.content_hash(), second.content_hash());
    assert_eq!(first.cell_count(), 2);
}

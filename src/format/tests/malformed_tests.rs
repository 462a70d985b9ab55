//! Broken documents and records.

use super::{config, temp_dir};
use crate::format::polygon_file::{self, parse_document};
use crate::format::{FormatError, WarningSeverity};

const HEADER: &str = "appname: polydraw\n\ndatetime: now\n\npolygons:\n";

fn document(records: &[&str]) -> String {
    let mut text = HEADER.to_string();
    for record in records {
        text.push_str(" - ");
        text.push_str(record);
        text.push('\n');
    }
    text
}

const GOOD: &str = "{ name: good.png, w: 10, h: 10, ids: ['a'], vertices: [[[0.100, 0.200]]] }";

#[test]
fn test_length_mismatch_skips_record() {
    let text = document(&[
        "{ name: bad.png, w: 10, h: 10, ids: ['x', 'y'], vertices: [[[0.1, 0.1]]] }",
        GOOD,
    ]);
    let (store, report) = parse_document(&text, &config()).unwrap();

    assert!(!store.contains("bad.png"));
    assert!(store.contains("good.png"));
    assert_eq!(report.images_restored, 1);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].image.as_deref(), Some("bad.png"));
    assert_eq!(report.warnings[0].severity, WarningSeverity::Error);
    assert!(report.has_errors());
}

#[test]
fn test_missing_fields_skip_record() {
    let text = document(&[
        "{ name: no_size.png, ids: [], vertices: [] }",
        "{ name: no_ids.png, w: 10, h: 10, vertices: [] }",
        "{ w: 10, h: 10, ids: [], vertices: [] }",
        GOOD,
    ]);
    let (store, report) = parse_document(&text, &config()).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(report.warnings.len(), 3);
    assert!(report.warnings.iter().all(|w| w.severity == WarningSeverity::Error));
    assert!(report.warnings[0].message.contains("w"));
    assert!(report.warnings[2].image.is_none());
}

#[test]
fn test_bad_values_skip_record() {
    let text = document(&[
        "{ name: text_size.png, w: wide, h: 10, ids: [], vertices: [] }",
        "{ name: negative.png, w: -5, h: 10, ids: [], vertices: [] }",
        "{ name: triple.png, w: 10, h: 10, ids: ['a'], vertices: [[[0.1, 0.2, 0.3]]] }",
        "{ name: word.png, w: 10, h: 10, ids: ['a'], vertices: [[[left, 0.2]]] }",
        GOOD,
    ]);
    let (store, report) = parse_document(&text, &config()).unwrap();

    assert_eq!(store.len(), 1);
    assert!(store.contains("good.png"));
    assert_eq!(report.warnings.len(), 4);
}

#[test]
fn test_numeric_scalars_read_as_text() {
    let text = document(&["{ name: 17, w: 10, h: 10, ids: [42], vertices: [[[0.5, 0.5]]] }"]);
    let (store, report) = parse_document(&text, &config()).unwrap();

    assert!(!report.has_warnings());
    let collection = store.get("17").unwrap();
    assert!(collection.region("42").is_some());
}

#[test]
fn test_duplicate_record_keeps_first() {
    let text = document(&[
        "{ name: dup.png, w: 10, h: 10, ids: ['first'], vertices: [[[0.1, 0.1]]] }",
        "{ name: dup.png, w: 20, h: 20, ids: ['second'], vertices: [[[0.2, 0.2]]] }",
    ]);
    let (store, report) = parse_document(&text, &config()).unwrap();

    let collection = store.get("dup.png").unwrap();
    assert!(collection.region("first").is_some());
    assert!(collection.region("second").is_none());
    assert_eq!(report.images_restored, 1);
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn test_duplicate_region_id_keeps_first() {
    let text = document(&[
        "{ name: a.png, w: 10, h: 10, ids: ['x', 'x'], vertices: [[[0.1, 0.1]], [[0.9, 0.9]]] }",
    ]);
    let (store, report) = parse_document(&text, &config()).unwrap();

    let collection = store.get("a.png").unwrap();
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.region("x").unwrap().vertices()[0].x, 0.1);
    assert_eq!(report.regions_restored, 1);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].severity, WarningSeverity::Warning);
    assert!(!report.has_errors());
}

#[test]
fn test_document_without_polygons() {
    let (store, report) = parse_document("appname: polydraw\n", &config()).unwrap();
    assert!(store.is_empty());
    assert!(!report.has_warnings());

    let (store, _) = parse_document(HEADER, &config()).unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_polygons_not_a_list() {
    let err = parse_document("polygons: 3\n", &config()).unwrap_err();
    assert!(matches!(err, FormatError::InvalidFormat { .. }));

    let err = parse_document("- just\n- a list\n", &config()).unwrap_err();
    assert!(matches!(err, FormatError::InvalidFormat { .. }));
}

#[test]
fn test_broken_yaml_is_an_error() {
    let err = parse_document("polygons: [ { name: a\n", &config()).unwrap_err();
    assert!(matches!(err, FormatError::Yaml(_)));
}

#[test]
fn test_load_or_empty_on_missing_and_broken_files() {
    let dir = temp_dir("load_or_empty");

    let missing = dir.join("missing.yaml");
    let (store, report) = polygon_file::load_or_empty(&missing, &config());
    assert!(store.is_empty());
    assert!(!report.has_warnings());

    let broken = dir.join("broken.yaml");
    std::fs::write(&broken, "polygons: [ { name: a\n").unwrap();
    let (store, _) = polygon_file::load_or_empty(&broken, &config());
    assert!(store.is_empty());

    let good = dir.join("good.yaml");
    std::fs::write(&good, document(&[GOOD])).unwrap();
    let (store, _) = polygon_file::load_or_empty(&good, &config());
    assert_eq!(store.len(), 1);

    let _ = std::fs::remove_dir_all(&dir);
}

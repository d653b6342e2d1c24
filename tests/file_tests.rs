use flate2::write::GzEncoder;
use flate2::Compression;
use quillcheck::file::loader::load_tree_from_bytes;
use quillcheck::file::{load_tree_file, TreeFormat};
use quillcheck::TreeValue;
use serde_json::json;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

fn gzip(content: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

#[test]
fn test_format_from_path() {
    assert_eq!(TreeFormat::from_path("cream.json"), TreeFormat::Json);
    assert_eq!(TreeFormat::from_path("cream.JSON.gz"), TreeFormat::Json);
    assert_eq!(TreeFormat::from_path("cream.jsonl"), TreeFormat::JsonLines);
    assert_eq!(TreeFormat::from_path("cream.ndjson.gz"), TreeFormat::JsonLines);
    assert_eq!(TreeFormat::from_path("cream.yml"), TreeFormat::Yaml);
    assert_eq!(TreeFormat::from_path("cream"), TreeFormat::Yaml);
}

#[test]
fn test_load_json_and_yaml_files() {
    let dir = TempDir::new().unwrap();

    let json_path = dir.path().join("band.json");
    fs::write(&json_path, r#"{"band": "Cream", "formed": 1966}"#).unwrap();

    let yaml_path = dir.path().join("band.yaml");
    fs::write(&yaml_path, "band: Cream\nformed: 1966\n").unwrap();

    let expected = TreeValue::from(json!({"band": "Cream", "formed": 1966}));
    assert_eq!(load_tree_file(&json_path).unwrap(), expected);
    assert_eq!(load_tree_file(&yaml_path).unwrap(), expected);
}

#[test]
fn test_load_jsonl_file_as_sequence() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("albums.jsonl");
    fs::write(
        &path,
        "{\"title\": \"Fresh Cream\"}\n\n{\"title\": \"Goodbye\"}\n",
    )
    .unwrap();

    assert_eq!(
        load_tree_file(&path).unwrap(),
        TreeValue::from(json!([{"title": "Fresh Cream"}, {"title": "Goodbye"}]))
    );
}

#[test]
fn test_invalid_jsonl_line_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("albums.jsonl");
    fs::write(&path, "{\"title\": \"Fresh Cream\"}\n{title}\n").unwrap();

    let err = load_tree_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid JSON on line 2"));
}

#[test]
fn test_load_gzipped_files() {
    let dir = TempDir::new().unwrap();

    let json_path = dir.path().join("band.json.gz");
    fs::write(&json_path, gzip(r#"{"band": "Cream"}"#)).unwrap();
    assert_eq!(
        load_tree_file(&json_path).unwrap(),
        TreeValue::from(json!({"band": "Cream"}))
    );

    let jsonl_path = dir.path().join("years.jsonl.gz");
    fs::write(&jsonl_path, gzip("1966\n1967\n1968\n")).unwrap();
    assert_eq!(
        load_tree_file(&jsonl_path).unwrap(),
        TreeValue::from(json!([1966, 1967, 1968]))
    );
}

#[test]
fn test_corrupt_gzip_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("band.json.gz");
    fs::write(&path, b"not gzip at all").unwrap();
    assert!(load_tree_file(&path).is_err());
}

#[test]
fn test_multi_document_yaml_is_a_sequence() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("members.yaml");
    fs::write(&path, "name: Jack\n---\nname: Ginger\n---\nname: Eric\n").unwrap();

    assert_eq!(
        load_tree_file(&path).unwrap(),
        TreeValue::from(json!([{"name": "Jack"}, {"name": "Ginger"}, {"name": "Eric"}]))
    );
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let err = load_tree_file(dir.path().join("missing.yaml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read file"));
}

#[test]
fn test_bytes_detect_format() {
    assert_eq!(
        load_tree_from_bytes(br#"{"band": "Cream"}"#).unwrap(),
        TreeValue::from(json!({"band": "Cream"}))
    );
    assert_eq!(
        load_tree_from_bytes(b"{\"n\": 1}\n{\"n\": 2}\n").unwrap(),
        TreeValue::from(json!([{"n": 1}, {"n": 2}]))
    );
    assert_eq!(
        load_tree_from_bytes(b"band: Cream\n").unwrap(),
        TreeValue::from(json!({"band": "Cream"}))
    );
    assert_eq!(
        load_tree_from_bytes(&gzip("band: Cream\n")).unwrap(),
        TreeValue::from(json!({"band": "Cream"}))
    );
}

#[test]
fn test_bytes_reject_invalid_utf8() {
    assert!(load_tree_from_bytes(&[0xff, 0xfe, 0x00]).is_err());
}

use std::path::PathBuf;

use serde_json::json;

use tap_csv_core::{Message, SourceSpec};
use tap_csv_ingest::{sync_file, FileOutcome, MessageWriter};

use crate::helpers::{run_sources, write_file};

#[test]
fn directory_syncs_only_csv_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_file(root, "one.csv", "v\na\n");
    write_file(root, "two.csv", "v\nb\n");
    write_file(root, "deep/er/three.csv", "v\nc\n");
    write_file(root, "notes.txt", "v\nnope\n");
    write_file(root, "upper.CSV", "v\nnope\n");
    write_file(root, "deep/data.json", "{}");

    let out = run_sources(&[SourceSpec::new(root, "letters")]);
    out.result.as_ref().unwrap();

    assert_eq!(out.count("SCHEMA"), 3);
    assert_eq!(out.count("STATE"), 3);
    let mut values: Vec<String> = out
        .records()
        .iter()
        .map(|r| r["v"].as_str().unwrap().to_string())
        .collect();
    values.sort();
    assert_eq!(values, vec!["a", "b", "c"]);
}

#[test]
fn nested_files_inherit_the_source_settings() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "x/y/z.csv", "id,name\n5,deep\n");
    let source = SourceSpec::new(dir.path(), "nested")
        .with_keys(["id"])
        .with_column("id", tap_csv_core::ColumnType::Integer);

    let out = run_sources(&[source]);
    out.result.as_ref().unwrap();

    match &out.messages()[0] {
        Message::Schema { stream, key_properties, .. } => {
            assert_eq!(stream, "nested");
            assert_eq!(key_properties, &vec!["id".to_string()]);
        }
        other => panic!("expected schema, got {other:?}"),
    }
    assert_eq!(out.records(), vec![json!({"id": 5, "name": "deep"})]);
}

#[test]
fn missing_source_is_skipped_and_run_continues() {
    let dir = tempfile::tempdir().unwrap();
    let present = write_file(dir.path(), "here.csv", "k\nv\n");
    let sources = [
        SourceSpec::new(dir.path().join("missing"), "gone"),
        SourceSpec::new(dir.path().join("missing.csv"), "gone"),
        SourceSpec::new(&present, "here"),
    ];

    let out = run_sources(&sources);
    out.result.as_ref().unwrap();
    assert_eq!(out.records(), vec![json!({"k": "v"})]);
    assert!(!out.raw.contains("\"gone\""));
}

#[test]
fn non_csv_file_source_emits_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "data.tsv", "a\tb\n1\t2\n");

    let out = run_sources(&[SourceSpec::new(&path, "tsv")]);
    out.result.as_ref().unwrap();
    assert!(out.raw.is_empty());
}

#[test]
fn sync_file_reports_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_file(dir.path(), "a.csv", "a\n1\n2\n\n3\n");
    let txt: PathBuf = write_file(dir.path(), "a.txt", "a\n1\n");
    let source = SourceSpec::new(dir.path(), "outcome");
    let mut writer = MessageWriter::new(Vec::new());

    assert_eq!(
        sync_file(&source, &csv, &json!({}), &mut writer).unwrap(),
        FileOutcome::Synced { records: 3 }
    );
    assert_eq!(
        sync_file(&source, &txt, &json!({}), &mut writer).unwrap(),
        FileOutcome::Skipped
    );
}

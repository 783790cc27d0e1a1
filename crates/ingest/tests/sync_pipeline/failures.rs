use tap_csv_core::{ColumnType, SourceSpec};
use tap_csv_ingest::SyncError;

use crate::helpers::{run_sources, write_file};

#[test]
fn bad_integer_aborts_after_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "a.csv", "id,qty\n1,notanumber\n");
    let source = SourceSpec::new(&path, "stock").with_column("qty", ColumnType::Integer);

    let out = run_sources(&[source]);

    assert_eq!(out.count("SCHEMA"), 1);
    assert_eq!(out.count("RECORD"), 0);
    assert_eq!(out.count("STATE"), 0);
    match out.result {
        Err(SyncError::TypeCoercion { path: p, line, column, source }) => {
            assert_eq!(p, path);
            assert_eq!(line, 2);
            assert_eq!(column, "qty");
            assert_eq!(source.value, "notanumber");
            assert_eq!(source.expected, ColumnType::Integer);
        }
        other => panic!("expected TypeCoercion, got {other:?}"),
    }
}

#[test]
fn failure_stops_later_sources() {
    let dir = tempfile::tempdir().unwrap();
    let bad = write_file(dir.path(), "bad.csv", "n\n1\nx\n");
    let good = write_file(dir.path(), "good.csv", "n\n2\n");
    let sources = [
        SourceSpec::new(&bad, "bad").with_column("n", ColumnType::Number),
        SourceSpec::new(&good, "good"),
    ];

    let out = run_sources(&sources);

    assert!(matches!(out.result, Err(SyncError::TypeCoercion { line: 3, .. })));
    // Rows before the failure were already streamed; nothing after it.
    assert_eq!(out.count("RECORD"), 1);
    assert!(!out.raw.contains("\"good\""));
}

#[test]
fn short_row_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "short.csv", "a,b,c\n1,2,3\n4,5\n");

    let out = run_sources(&[SourceSpec::new(&path, "short")]);

    assert_eq!(out.count("RECORD"), 1);
    match out.result {
        Err(SyncError::MalformedRow { line, expected, found, .. }) => {
            assert_eq!(line, 3);
            assert_eq!(expected, 3);
            assert_eq!(found, 2);
        }
        other => panic!("expected MalformedRow, got {other:?}"),
    }
}

#[test]
fn long_row_ignores_extra_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "long.csv", "a\n1,2,3\n");

    let out = run_sources(&[SourceSpec::new(&path, "long")]);
    out.result.as_ref().unwrap();
    assert_eq!(out.records(), vec![serde_json::json!({"a": "1"})]);
}

#[test]
fn duplicate_header_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "dup.csv", "id,id\n1,2\n");

    let out = run_sources(&[SourceSpec::new(&path, "dup")]);

    assert!(out.raw.is_empty());
    match out.result {
        Err(SyncError::DuplicateColumn { column, .. }) => assert_eq!(column, "id"),
        other => panic!("expected DuplicateColumn, got {other:?}"),
    }
}

#[test]
fn invalid_utf8_is_a_csv_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bin.csv");
    std::fs::write(&path, b"name\n\xff\xfe\n").unwrap();

    let out = run_sources(&[SourceSpec::new(&path, "bin")]);
    assert!(matches!(out.result, Err(SyncError::Csv { .. })));
}

#[test]
fn error_message_points_at_file_and_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "m.csv", "id\nabc\n");
    let source = SourceSpec::new(&path, "m").with_column("id", ColumnType::Integer);

    let err = run_sources(&[source]).result.unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("{}:2: column 'id': cannot convert \"abc\" to integer", path.display())
    );
}

#[cfg(unix)]
#[test]
fn unreadable_directory_aborts_the_run() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "a.csv", "n\n1\n");
    write_file(dir.path(), "locked/b.csv", "n\n2\n");
    let locked = dir.path().join("locked");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can still list the directory; nothing to check then.
    let readable = std::fs::read_dir(&locked).is_ok();
    let out = run_sources(&[SourceSpec::new(dir.path(), "n")]);
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
    if readable {
        return;
    }

    // Files visited before the failure were already streamed.
    assert_eq!(out.count("RECORD"), 1);
    match out.result {
        Err(SyncError::Walk { path, source }) => {
            assert_eq!(path, dir.path());
            assert_eq!(source.path(), Some(locked.as_path()));
        }
        other => panic!("expected Walk, got {other:?}"),
    }
}

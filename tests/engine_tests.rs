#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use file_ident::{FsWorkbench, IdentifyEngine, SilentReporter};

/// Stub classifier honoring the real invocation contract:
/// `-v` prints a version line; otherwise the last argument is the
/// subject path, paths containing "bad" fail with a diagnostic on
/// stderr, everything else is "ASCII text".
const FORMAT_STUB: &str = r#"#!/bin/sh
if [ "$1" = "-v" ]; then
  echo "file-5.41"
  exit 0
fi
for last in "$@"; do :; done
case "$last" in
  *bad*) echo "cannot open" >&2; exit 1 ;;
  *) echo "ASCII text" ;;
esac
"#;

const MIME_STUB: &str = r#"#!/bin/sh
if [ "$1" = "-v" ]; then
  echo "file-5.41"
  exit 0
fi
echo "text/plain"
"#;

fn write_stub_classifier(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("stub-classifier");
    fs::write(&path, body).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Layout:
///   root/
///     alpha.txt
///     docs/
///       guide.txt
///       old/
///         notes.txt
///     zulu.txt
fn create_selection_tree(root: &Path) {
    fs::create_dir_all(root.join("docs/old")).unwrap();
    fs::write(root.join("alpha.txt"), "alpha").unwrap();
    fs::write(root.join("docs/guide.txt"), "guide").unwrap();
    fs::write(root.join("docs/old/notes.txt"), "notes").unwrap();
    fs::write(root.join("zulu.txt"), "zulu").unwrap();
}

fn read_report(report_dir: &Path, file_name: &str) -> serde_json::Value {
    let body = fs::read_to_string(report_dir.join(file_name)).unwrap();
    serde_json::from_str(&body).unwrap()
}

#[test]
fn test_identify_writes_ordered_report() {
    let stub_dir = tempdir().unwrap();
    let stub = write_stub_classifier(stub_dir.path(), FORMAT_STUB);

    let tmp = tempdir().unwrap();
    let selection = tmp.path().join("selection");
    let report_dir = tmp.path().join("reports");
    create_selection_tree(&selection);

    let workbench = FsWorkbench::new(&selection, &report_dir);
    let engine = IdentifyEngine::new(stub.to_str().unwrap());
    let result = engine.run(&workbench, &SilentReporter).unwrap();

    assert_eq!(result.agent_version, "file-5.41");
    assert_eq!(result.files_visited, 4);
    assert_eq!(result.classified, 4);
    assert_eq!(result.skipped, 0);
    assert!(result.report_written);
    assert!(result.report_file_name.starts_with("FileIdentificationReport_"));
    assert!(result.report_file_name.ends_with(".json"));

    let report = read_report(&report_dir, &result.report_file_name);
    let entries = report.as_array().unwrap();
    assert_eq!(entries.len(), 4);

    // Depth-first, name-sorted visitation order.
    let names: Vec<&str> = entries
        .iter()
        .map(|entry| entry["Filename"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alpha.txt", "guide.txt", "notes.txt", "zulu.txt"]);

    for entry in entries {
        assert_eq!(entry["FileIdentificationFormatName"], "ASCII text");
        assert_eq!(entry["SoftwareAgentName"], "file");
        assert_eq!(entry["SoftwareAgentVersion"], "file-5.41");
        assert_eq!(entry["FileIdentificationFormatConfidence"], "POSITIVE");
        assert!(entry["Timestamp"].as_str().unwrap().ends_with('Z'));
    }

    // The report artifact is tagged as plain text.
    assert_eq!(
        workbench
            .mime_tags()
            .get(&result.report_file_name)
            .map(String::as_str),
        Some("text/plain")
    );
}

#[test]
fn test_failed_classification_is_excluded_from_report() {
    let stub_dir = tempdir().unwrap();
    let stub = write_stub_classifier(stub_dir.path(), FORMAT_STUB);

    let tmp = tempdir().unwrap();
    let selection = tmp.path().join("selection");
    let report_dir = tmp.path().join("reports");
    create_selection_tree(&selection);
    fs::write(selection.join("bad_apple.txt"), "rotten").unwrap();

    let workbench = FsWorkbench::new(&selection, &report_dir);
    let engine = IdentifyEngine::new(stub.to_str().unwrap());
    let result = engine.run(&workbench, &SilentReporter).unwrap();

    assert_eq!(result.files_visited, 5);
    assert_eq!(result.classified, 4);
    assert_eq!(result.skipped, 1);

    let report = read_report(&report_dir, &result.report_file_name);
    let entries = report.as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert!(entries
        .iter()
        .all(|entry| entry["Filename"] != "bad_apple.txt"));
}

#[test]
fn test_missing_classifier_still_writes_empty_report() {
    let tmp = tempdir().unwrap();
    let selection = tmp.path().join("selection");
    let report_dir = tmp.path().join("reports");
    create_selection_tree(&selection);

    let workbench = FsWorkbench::new(&selection, &report_dir);
    let engine = IdentifyEngine::new("/nonexistent/classifier-binary");
    let result = engine.run(&workbench, &SilentReporter).unwrap();

    assert_eq!(result.agent_version, "Unknown");
    assert_eq!(result.files_visited, 4);
    assert_eq!(result.classified, 0);
    assert_eq!(result.skipped, 4);
    assert!(result.report_written);

    let report = read_report(&report_dir, &result.report_file_name);
    assert_eq!(report, serde_json::json!([]));
}

#[test]
fn test_tag_mime_tags_every_file() {
    let stub_dir = tempdir().unwrap();
    let stub = write_stub_classifier(stub_dir.path(), MIME_STUB);

    let tmp = tempdir().unwrap();
    let selection = tmp.path().join("selection");
    create_selection_tree(&selection);

    let workbench = FsWorkbench::new(&selection, tmp.path().join("reports"));
    let engine = IdentifyEngine::new(stub.to_str().unwrap());
    let result = engine.tag_mime(&workbench, &SilentReporter).unwrap();

    assert_eq!(result.files_visited, 4);
    assert_eq!(result.tagged, 4);
    assert_eq!(result.skipped, 0);

    let tags = workbench.mime_tags();
    assert_eq!(tags.len(), 4);
    assert_eq!(tags.get("//alpha.txt").map(String::as_str), Some("text/plain"));
    assert_eq!(
        tags.get("//docs/guide.txt").map(String::as_str),
        Some("text/plain")
    );
    assert_eq!(
        tags.get("//docs/old/notes.txt").map(String::as_str),
        Some("text/plain")
    );
    assert_eq!(tags.get("//zulu.txt").map(String::as_str), Some("text/plain"));
}

#[test]
fn test_reruns_differ_only_in_timestamps() {
    let stub_dir = tempdir().unwrap();
    let stub = write_stub_classifier(stub_dir.path(), FORMAT_STUB);

    let tmp = tempdir().unwrap();
    let selection = tmp.path().join("selection");
    let report_dir = tmp.path().join("reports");
    create_selection_tree(&selection);

    let engine = IdentifyEngine::new(stub.to_str().unwrap());

    let workbench = FsWorkbench::new(&selection, &report_dir);
    let first = engine.run(&workbench, &SilentReporter).unwrap();
    let second = engine.run(&workbench, &SilentReporter).unwrap();

    let strip_timestamps = |report: serde_json::Value| -> Vec<serde_json::Value> {
        report
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| {
                let mut entry = entry.clone();
                entry.as_object_mut().unwrap().remove("Timestamp");
                entry
            })
            .collect()
    };

    let first_entries = strip_timestamps(read_report(&report_dir, &first.report_file_name));
    let second_entries = strip_timestamps(read_report(&report_dir, &second.report_file_name));
    assert_eq!(first_entries, second_entries);
}

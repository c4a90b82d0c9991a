// tests/cli_source.rs
use std::fs;

use linefold_core::consolidate::consolidate;
use linefold_core::render::{format_json, format_terminal, LineStyle};
use linefold_core::source::read_group;
use tempfile::TempDir;

#[test]
fn reads_one_group_per_file_collapsing_duplicates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("standalone.txt");
    fs::write(&path, "one\ntwo\none\n").unwrap();

    let group = read_group(&path).unwrap();
    assert_eq!(group.name(), "standalone.txt");
    assert_eq!(group.line_count(), 2);
    assert!(group.contains_line("one"));
    assert!(group.contains_line("two"));
}

#[test]
fn missing_file_reports_the_path() {
    let dir = TempDir::new().unwrap();
    let err = read_group(&dir.path().join("nope.txt")).unwrap_err();
    assert!(err.to_string().contains("nope.txt"));
}

#[test]
fn profiles_read_from_disk_share_a_group() {
    let dir = TempDir::new().unwrap();
    let full = dir.path().join("standalone-full.txt");
    let base = dir.path().join("standalone.txt");
    fs::write(&full, "alpha\nbeta\ngamma\n").unwrap();
    fs::write(&base, "alpha\nbeta\n").unwrap();

    let groups = vec![read_group(&full).unwrap(), read_group(&base).unwrap()];
    let result = consolidate(groups).unwrap();

    let full_group = &result["standalone-full.txt"];
    assert_eq!(full_group.line_count(), 1);
    assert!(full_group.contains_line("gamma"));
    assert!(full_group.nested_group("standalone.txt").is_some());
}

#[test]
fn terminal_format_lists_groups_and_includes() {
    let dir = TempDir::new().unwrap();
    let full = dir.path().join("full.txt");
    let base = dir.path().join("base.txt");
    fs::write(&full, "alpha\nbeta\ngamma\n").unwrap();
    fs::write(&base, "alpha\nbeta\n").unwrap();

    let result =
        consolidate(vec![read_group(&full).unwrap(), read_group(&base).unwrap()]).unwrap();
    let out = format_terminal(&result, LineStyle::Raw).unwrap();

    assert!(out.contains("GROUP"));
    assert!(out.contains("full.txt"));
    assert!(out.contains("base.txt"));
    assert!(out.contains("gamma"));
}

#[test]
fn json_format_round_trips_through_serde() {
    let dir = TempDir::new().unwrap();
    let full = dir.path().join("full.txt");
    let base = dir.path().join("base.txt");
    fs::write(&full, "alpha\nbeta\ngamma\n").unwrap();
    fs::write(&base, "alpha\nbeta\n").unwrap();

    let result =
        consolidate(vec![read_group(&full).unwrap(), read_group(&base).unwrap()]).unwrap();
    let out = format_json(&result, LineStyle::Raw).unwrap();

    let docs: serde_json::Value = serde_json::from_str(&out).unwrap();
    let docs = docs.as_array().unwrap();
    assert_eq!(docs.len(), 2);

    // Mapping order is by name, so base.txt comes first.
    assert_eq!(docs[0]["name"], "base.txt");
    assert_eq!(docs[0]["lines"], serde_json::json!(["alpha", "beta"]));
    assert_eq!(docs[1]["name"], "full.txt");
    assert_eq!(docs[1]["lines"], serde_json::json!(["gamma"]));
    assert_eq!(docs[1]["includes"], serde_json::json!(["base.txt"]));
}

#[test]
fn operations_style_renders_lines_as_cli_operations() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ops.txt");
    fs::write(
        &path,
        r#"{"address":[{"subsystem":"logging"}],"operation":"add"}"#,
    )
    .unwrap();

    let result = consolidate(vec![read_group(&path).unwrap()]).unwrap();
    let out = format_terminal(&result, LineStyle::Operations).unwrap();
    assert!(out.contains("/subsystem=logging:add"));
}

use std::fs;

use super::*;

#[test]
fn swaps_start_and_end_when_reversed() {
    let spec = parse_spec("a.rs:10:8").unwrap();
    assert_eq!(spec.start_line, 8);
    assert_eq!(spec.end_line, 10);
}

#[test]
fn rejects_non_integer_fields() {
    assert!(parse_spec("a.rs:x:3").is_err());
}

#[test]
fn rejects_zero_or_negative_line_numbers() {
    assert!(parse_spec("a.rs:0:3").is_err());
    assert!(parse_spec("a.rs:-1:3").is_err());
}

#[test]
fn rejects_missing_colon() {
    assert!(parse_spec("a.rs").is_err());
}

#[test]
fn merges_overlapping_specs_for_same_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.rs"), "1\n2\n3\n4\n5\n").unwrap();

    let specs = vec![
        parse_spec("a.rs:1:2").unwrap(),
        parse_spec("a.rs:2:3").unwrap(),
    ];
    let cancelled = CancelToken::new();
    let entries = extract(dir.path(), &specs, false, &cancelled);

    assert_eq!(entries.len(), 1);
    let chunks = entries[0].chunks.as_ref().unwrap();
    assert_eq!(chunks.len(), 1);
    assert_eq!((chunks[0].start_line, chunks[0].end_line), (1, 3));
}

#[test]
fn clamps_end_line_beyond_file_length() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.rs"), "1\n2\n3\n4\n5\n").unwrap();

    let specs = vec![parse_spec("b.rs:8:10").unwrap()];
    let cancelled = CancelToken::new();
    let entries = extract(dir.path(), &specs, false, &cancelled);

    assert_eq!(entries.len(), 1);
    let chunks = entries[0].chunks.as_ref().unwrap();
    assert_eq!((chunks[0].start_line, chunks[0].end_line), (5, 5));
}

#[test]
fn out_of_bounds_swap_then_clamp_matches_scenario() {
    // "b.rs:10:8" against a 5-line file: swap to 8:10, clamp both to 5.
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.rs"), "1\n2\n3\n4\n5\n").unwrap();

    let specs = vec![parse_spec("b.rs:10:8").unwrap()];
    let cancelled = CancelToken::new();
    let entries = extract(dir.path(), &specs, false, &cancelled);

    assert_eq!(entries.len(), 1);
    let chunks = entries[0].chunks.as_ref().unwrap();
    assert_eq!(chunks.len(), 1);
    assert_eq!((chunks[0].start_line, chunks[0].end_line), (5, 5));
}

#[test]
fn missing_file_produces_not_found_error() {
    let dir = tempfile::tempdir().unwrap();
    let specs = vec![parse_spec("missing.rs:1:2").unwrap()];
    let cancelled = CancelToken::new();
    let entries = extract(dir.path(), &specs, false, &cancelled);

    assert_eq!(entries[0].error.as_deref(), Some("File not found: missing.rs"));
}

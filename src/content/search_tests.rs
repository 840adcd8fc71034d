use std::fs;

use super::*;
use crate::content::matcher::Matcher;

#[test]
fn merges_context_window_into_one_chunk() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.ts");
    fs::write(&file, "// TODO x\nok\n// FIXME y\n").unwrap();

    let matcher = Matcher::build("TODO|FIXME", false).unwrap();
    let cancelled = CancelToken::new();
    let outcome = search_files(&[file], dir.path(), &matcher, 1, true, &cancelled);

    assert_eq!(outcome.entries.len(), 1);
    let entry = &outcome.entries[0];
    let chunks = entry.chunks.as_ref().unwrap();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].start_line, 1);
    assert_eq!(chunks[0].end_line, 3);
    assert_eq!(chunks[0].content, "1.  // TODO x\n2.  ok\n3.  // FIXME y");
}

#[test]
fn whole_file_collapse_emits_contents_not_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("all.rs");
    fs::write(&file, "TODO one\nTODO two\n").unwrap();

    let matcher = Matcher::build("TODO", false).unwrap();
    let cancelled = CancelToken::new();
    let outcome = search_files(&[file], dir.path(), &matcher, 0, false, &cancelled);

    let entry = &outcome.entries[0];
    assert!(entry.chunks.is_none());
    assert_eq!(entry.contents.as_deref(), Some("TODO one\nTODO two"));
}

#[test]
fn no_match_produces_no_entry() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("clean.rs");
    fs::write(&file, "fn main() {}\n").unwrap();

    let matcher = Matcher::build("TODO", false).unwrap();
    let cancelled = CancelToken::new();
    let outcome = search_files(&[file], dir.path(), &matcher, 0, false, &cancelled);
    assert!(outcome.entries.is_empty());
}

#[test]
fn binary_file_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bin.dat");
    fs::write(&file, [b'T', b'O', b'D', b'O', 0, 0, 0]).unwrap();

    let matcher = Matcher::build("TODO", false).unwrap();
    let cancelled = CancelToken::new();
    let outcome = search_files(&[file], dir.path(), &matcher, 0, false, &cancelled);
    assert!(outcome.entries.is_empty());
}

#[test]
fn count_mode_suppresses_zero_matches_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.rs");
    let b = dir.path().join("b.rs");
    fs::write(&a, "import foo\nimport bar\n").unwrap();
    fs::write(&b, "nothing here\n").unwrap();

    let matcher = Matcher::build("import", false).unwrap();
    let cancelled = CancelToken::new();
    let outcome = count_files(&[a, b], dir.path(), &matcher, false, &cancelled);

    assert_eq!(outcome.entries.len(), 1);
    assert_eq!(outcome.entries[0].count, Some(2));
    assert_eq!(outcome.total_matches, 2);
}

#[test]
fn count_mode_includes_zero_when_requested() {
    let dir = tempfile::tempdir().unwrap();
    let b = dir.path().join("b.rs");
    fs::write(&b, "nothing here\n").unwrap();

    let matcher = Matcher::build("import", false).unwrap();
    let cancelled = CancelToken::new();
    let outcome = count_files(&[b], dir.path(), &matcher, true, &cancelled);

    assert_eq!(outcome.entries.len(), 1);
    assert_eq!(outcome.entries[0].count, Some(0));
}

#[test]
fn entries_are_sorted_case_insensitively_by_path() {
    let dir = tempfile::tempdir().unwrap();
    let b = dir.path().join("B.rs");
    let a = dir.path().join("a.rs");
    fs::write(&a, "TODO\n").unwrap();
    fs::write(&b, "TODO\n").unwrap();

    let matcher = Matcher::build("TODO", false).unwrap();
    let cancelled = CancelToken::new();
    let outcome = search_files(&[b, a], dir.path(), &matcher, 0, false, &cancelled);

    assert_eq!(outcome.entries[0].path, "a.rs");
    assert_eq!(outcome.entries[1].path, "B.rs");
}

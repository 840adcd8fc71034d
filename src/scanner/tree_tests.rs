use std::fs;
use std::sync::atomic::AtomicU64;

use super::*;

#[test]
fn prunes_excluded_directories_and_empty_subtrees() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::create_dir_all(dir.path().join("vendor")).unwrap();
    fs::create_dir_all(dir.path().join("empty")).unwrap();
    fs::write(dir.path().join("src/a.rs"), "fn main() {}").unwrap();
    fs::write(dir.path().join("vendor/b.rs"), "fn main() {}").unwrap();

    let filter = ExclusionFilter::default();
    let cancelled = CancelToken::new();
    let scanned = AtomicU64::new(0);
    let tree = scan_tree(dir.path(), &filter, &cancelled, &scanned).expect("tree present");

    let children = tree.children.expect("has children");
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].name, "src");
    assert_eq!(children[0].files.as_ref().unwrap(), &["a.rs".to_string()]);
}

#[test]
fn returns_none_when_no_source_files_anywhere() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("docs/notes.txt"), "hello").unwrap();

    let filter = ExclusionFilter::default();
    let cancelled = CancelToken::new();
    let scanned = AtomicU64::new(0);
    assert!(scan_tree(dir.path(), &filter, &cancelled, &scanned).is_none());
}

#[test]
fn children_and_files_are_sorted_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.rs"), "").unwrap();
    fs::write(dir.path().join("A.rs"), "").unwrap();
    fs::create_dir_all(dir.path().join("Zeta")).unwrap();
    fs::write(dir.path().join("Zeta/z.rs"), "").unwrap();
    fs::create_dir_all(dir.path().join("alpha")).unwrap();
    fs::write(dir.path().join("alpha/a.rs"), "").unwrap();

    let filter = ExclusionFilter::default();
    let cancelled = CancelToken::new();
    let scanned = AtomicU64::new(0);
    let tree = scan_tree(dir.path(), &filter, &cancelled, &scanned).unwrap();

    assert_eq!(tree.files.unwrap(), vec!["A.rs".to_string(), "b.rs".to_string()]);
    let children = tree.children.unwrap();
    assert_eq!(children[0].name, "alpha");
    assert_eq!(children[1].name, "Zeta");
}

#[test]
fn cancellation_short_circuits_the_walk() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.rs"), "").unwrap();

    let filter = ExclusionFilter::default();
    let cancelled = CancelToken::new();
    cancelled.cancel();
    let scanned = AtomicU64::new(0);
    assert!(scan_tree(dir.path(), &filter, &cancelled, &scanned).is_none());
}

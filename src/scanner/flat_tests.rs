use std::fs;

use super::*;

#[test]
fn matches_basename_glob_recursively() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("lib")).unwrap();
    fs::write(dir.path().join("lib/a.ts"), "").unwrap();
    fs::write(dir.path().join("lib/b.js"), "").unwrap();

    let filter = ExclusionFilter::default();
    let cancelled = CancelToken::new();
    let globs = vec!["*.ts".to_string()];
    let found = find_files(dir.path(), &globs, &filter, &cancelled);

    assert_eq!(found.len(), 1);
    assert!(found[0].ends_with("a.ts"));
}

#[test]
fn star_glob_matches_every_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.ts"), "").unwrap();
    fs::write(dir.path().join("b.rs"), "").unwrap();

    let filter = ExclusionFilter::default();
    let cancelled = CancelToken::new();
    let globs = vec!["*".to_string()];
    let found = find_files(dir.path(), &globs, &filter, &cancelled);

    assert_eq!(found.len(), 2);
}

#[test]
fn excluded_directories_are_pruned() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("node_modules")).unwrap();
    fs::write(dir.path().join("node_modules/pkg.js"), "").unwrap();
    fs::write(dir.path().join("app.js"), "").unwrap();

    let filter = ExclusionFilter::default();
    let cancelled = CancelToken::new();
    let globs = vec!["*.js".to_string()];
    let found = find_files(dir.path(), &globs, &filter, &cancelled);

    assert_eq!(found.len(), 1);
    assert!(found[0].ends_with("app.js"));
}

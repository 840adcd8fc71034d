#![allow(deprecated)] // cargo_bin deprecation - still works fine

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("codemap").expect("binary should exist")
}

#[test]
fn tree_scan_prunes_default_excluded_directories() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("src")).unwrap();
    fs::create_dir_all(temp_dir.path().join("vendor")).unwrap();
    fs::write(temp_dir.path().join("src/a.rs"), "fn main() {}\n").unwrap();
    fs::write(temp_dir.path().join("vendor/b.rs"), "fn vendored() {}\n").unwrap();

    cmd()
        .arg("--dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("src"))
        .stdout(predicate::str::contains("a.rs"))
        .stdout(predicate::str::contains("vendor").not());
}

#[test]
fn glob_and_find_with_pad_merges_a_single_chunk() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("lib")).unwrap();
    fs::write(temp_dir.path().join("lib/a.ts"), "// TODO x\nok\n// FIXME y\n").unwrap();

    cmd()
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--glob")
        .arg("*.ts")
        .arg("--find")
        .arg("TODO|FIXME")
        .arg("--pad")
        .arg("1")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"startLine\": 1"))
        .stdout(predicate::str::contains("\"endLine\": 3"));
}

#[test]
fn line_extract_swaps_and_clamps_out_of_bounds_range() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.rs"), "1\n2\n3\n4\n5\n").unwrap();
    fs::write(temp_dir.path().join("b.rs"), "1\n2\n3\n4\n5\n").unwrap();

    cmd()
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--lines")
        .arg("a.rs:1:2 a.rs:2:3 b.rs:10:8")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"startLine\": 1"))
        .stdout(predicate::str::contains("\"endLine\": 3"))
        .stdout(predicate::str::contains("\"startLine\": 5"));
}

#[test]
fn count_mode_reports_total_matches() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.rs"), "import a\nimport b\n").unwrap();
    fs::write(temp_dir.path().join("b.rs"), "import c\n").unwrap();

    cmd()
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--find")
        .arg("import")
        .arg("--count")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalMatches\": 3"));
}

#[test]
fn graph_mode_resolves_rust_mod_and_use_declarations() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("src")).unwrap();
    fs::write(temp_dir.path().join("src/main.rs"), "mod cli;\nuse crate::util::X;\n").unwrap();
    fs::write(temp_dir.path().join("src/cli.rs"), "pub fn run() {}\n").unwrap();
    fs::write(temp_dir.path().join("src/util.rs"), "pub struct X;\n").unwrap();

    cmd()
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--graph")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("src/cli.rs"))
        .stdout(predicate::str::contains("src/util.rs"));
}

#[test]
fn graph_mode_honors_an_explicit_glob() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("src")).unwrap();
    fs::write(temp_dir.path().join("src/main.rs"), "mod cli;\n").unwrap();
    fs::write(temp_dir.path().join("src/cli.rs"), "pub fn run() {}\n").unwrap();
    fs::write(temp_dir.path().join("src/helper.py"), "def run():\n    pass\n").unwrap();

    cmd()
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--graph")
        .arg("--glob")
        .arg("*.rs")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("src/main.rs"))
        .stdout(predicate::str::contains("src/cli.rs"))
        .stdout(predicate::str::contains("helper.py").not());
}

#[test]
fn stats_mode_aggregates_per_extension() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.rs"), "x\n".repeat(10)).unwrap();
    fs::write(temp_dir.path().join("b.md"), "x\n".repeat(3)).unwrap();

    cmd()
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--stats")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"extension\": \"rs\""));
}

#[test]
fn missing_root_is_a_user_error_with_exit_code_one() {
    cmd()
        .arg("--dir")
        .arg("/this/path/does/not/exist/anywhere")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("error"));
}

#[test]
fn count_without_find_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    cmd()
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--count")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn symbols_mode_lists_rust_declarations() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("lib.rs"), "pub fn run() {}\n").unwrap();

    cmd()
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--symbols")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"run\""));
}

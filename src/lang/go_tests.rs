use std::fs;
use std::path::Path;

use super::*;

#[test]
fn single_import_resolves_against_go_mod() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("go.mod"), "module example.com/widget\n\ngo 1.22\n").unwrap();
    fs::create_dir_all(dir.path().join("internal/util")).unwrap();

    let content = "package main\n\nimport \"example.com/widget/internal/util\"\n";
    let go = Go::new();
    let refs = go.extract_imports(content, &dir.path().join("main.go"), "main.go");
    assert_eq!(refs, vec!["internal/util/".to_string()]);
}

#[test]
fn grouped_import_block_and_external_package_are_handled() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("go.mod"), "module example.com/widget\n").unwrap();

    let content = "import (\n    \"fmt\"\n    \"example.com/widget/pkg\"\n)\n";
    let go = Go::new();
    let refs = go.extract_imports(content, &dir.path().join("main.go"), "main.go");
    assert_eq!(refs, vec!["pkg/".to_string()]);
}

#[test]
fn module_lookup_walks_up_from_nested_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("go.mod"), "module example.com/widget\n").unwrap();
    fs::create_dir_all(dir.path().join("cmd/app")).unwrap();

    let content = "import \"example.com/widget/pkg/core\"\n";
    let go = Go::new();
    let refs = go.extract_imports(content, &dir.path().join("cmd/app/main.go"), "cmd/app/main.go");
    assert_eq!(refs, vec!["pkg/core/".to_string()]);
}

#[test]
fn extracts_func_method_and_struct() {
    let content = "type Widget struct {\n}\n\nfunc (w *Widget) Render() {\n}\n\nfunc helper() {\n}\n";
    let go = Go::new();
    let symbols = go.extract_symbols(content);
    assert_eq!(symbols[0].kind, SymbolKind::Struct);
    assert_eq!(symbols[0].visibility, Some(Visibility::Pub));

    let render = symbols.iter().find(|s| s.name == "Render").unwrap();
    assert_eq!(render.kind, SymbolKind::Method);
    assert_eq!(render.parent.as_deref(), Some("Widget"));

    let helper = symbols.iter().find(|s| s.name == "helper").unwrap();
    assert_eq!(helper.visibility, None);
}

#[test]
fn no_go_mod_means_no_imports_resolved() {
    let dir = tempfile::tempdir().unwrap();
    let content = "import \"example.com/widget/pkg\"\n";
    let go = Go::new();
    let refs = go.extract_imports(content, &dir.path().join("main.go"), "main.go");
    assert!(refs.is_empty());
}

use std::path::Path;

use super::*;

#[test]
fn plain_import_produces_module_candidates() {
    let content = "import a.b.c\n";
    let refs = Python.extract_imports(content, Path::new("/repo/src/main.py"), "src/main.py");
    assert!(refs.contains(&"a/b/c.py".to_string()));
    assert!(refs.contains(&"a/b/c/__init__.py".to_string()));
}

#[test]
fn from_import_resolves_relative_to_module_path() {
    let content = "from a.b import c\n";
    let refs = Python.extract_imports(content, Path::new("/repo/src/main.py"), "src/main.py");
    assert!(refs.contains(&"a/b.py".to_string()));
}

#[test]
fn single_dot_relative_import_stays_in_current_dir() {
    let content = "from . import x\n";
    let refs = Python.extract_imports(content, Path::new("/repo/pkg/mod.py"), "pkg/mod.py");
    assert!(refs.contains(&"pkg.py".to_string()));
    assert!(refs.contains(&"pkg/__init__.py".to_string()));
}

#[test]
fn double_dot_relative_import_ascends_one_level() {
    let content = "from ..y import z\n";
    let refs = Python.extract_imports(content, Path::new("/repo/pkg/sub/mod.py"), "pkg/sub/mod.py");
    assert!(refs.contains(&"pkg/y.py".to_string()));
}

#[test]
fn class_method_and_module_level_function_and_const() {
    let content = "MAX_SIZE = 10\n\nclass Widget:\n    def render(self):\n        pass\n\ndef helper():\n    pass\n";
    let symbols = Python.extract_symbols(content);
    assert_eq!(symbols[0].kind, SymbolKind::Const);
    assert_eq!(symbols[1].kind, SymbolKind::Class);

    let render = symbols.iter().find(|s| s.name == "render").unwrap();
    assert_eq!(render.kind, SymbolKind::Method);
    assert_eq!(render.parent.as_deref(), Some("Widget"));

    let helper = symbols.iter().find(|s| s.name == "helper").unwrap();
    assert_eq!(helper.kind, SymbolKind::Fn);
    assert!(helper.parent.is_none());
}

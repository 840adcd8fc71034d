use std::path::Path;

use super::*;

#[test]
fn plain_import_becomes_file_reference() {
    let content = "import com.acme.Widget\n";
    let refs = Kotlin.extract_imports(content, Path::new("/repo/src/Main.kt"), "src/Main.kt");
    assert_eq!(refs, vec!["com/acme/Widget.kt".to_string()]);
}

#[test]
fn wildcard_import_becomes_directory_reference() {
    let content = "import com.acme.util.*\n";
    let refs = Kotlin.extract_imports(content, Path::new("/repo/src/Main.kt"), "src/Main.kt");
    assert_eq!(refs, vec!["com/acme/util/".to_string()]);
}

#[test]
fn extracts_class_and_method_with_visibility() {
    let content = "class Widget {\n    private fun render() {\n    }\n}\n";
    let symbols = Kotlin.extract_symbols(content);
    assert_eq!(symbols[0].kind, SymbolKind::Class);

    let render = symbols.iter().find(|s| s.name == "render").unwrap();
    assert_eq!(render.kind, SymbolKind::Method);
    assert_eq!(render.visibility, Some(Visibility::Private));
    assert_eq!(render.parent.as_deref(), Some("Widget"));
}

#[test]
fn top_level_fun_and_const_val_are_recognized() {
    let content = "const val MAX_SIZE = 10\n\nfun helper() {\n}\n";
    let symbols = Kotlin.extract_symbols(content);
    assert_eq!(symbols[0].kind, SymbolKind::Const);
    assert_eq!(symbols[0].name, "MAX_SIZE");

    let helper = symbols.iter().find(|s| s.name == "helper").unwrap();
    assert_eq!(helper.kind, SymbolKind::Fn);
    assert!(helper.parent.is_none());
}

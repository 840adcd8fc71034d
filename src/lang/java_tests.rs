use std::path::Path;

use super::*;

#[test]
fn single_type_import_becomes_file_reference() {
    let content = "import com.acme.Widget;\n";
    let refs = Java.extract_imports(content, Path::new("/repo/src/Main.java"), "src/Main.java");
    assert_eq!(refs, vec!["com/acme/Widget.java".to_string()]);
}

#[test]
fn wildcard_import_becomes_directory_reference() {
    let content = "import com.acme.util.*;\n";
    let refs = Java.extract_imports(content, Path::new("/repo/src/Main.java"), "src/Main.java");
    assert_eq!(refs, vec!["com/acme/util/".to_string()]);
}

#[test]
fn extracts_class_and_method_with_visibility() {
    let content = "public class Widget {\n    private void render() {\n    }\n}\n";
    let symbols = Java.extract_symbols(content);
    assert_eq!(symbols[0].kind, SymbolKind::Class);
    assert_eq!(symbols[0].visibility, Some(Visibility::Public));

    let render = symbols.iter().find(|s| s.name == "render").unwrap();
    assert_eq!(render.kind, SymbolKind::Method);
    assert_eq!(render.visibility, Some(Visibility::Private));
    assert_eq!(render.parent.as_deref(), Some("Widget"));
}

#[test]
fn interface_and_enum_are_recognized() {
    let content = "public interface Shape {}\nenum Color {}\n";
    let symbols = Java.extract_symbols(content);
    assert_eq!(symbols[0].kind, SymbolKind::Interface);
    assert_eq!(symbols[1].kind, SymbolKind::Enum);
    assert_eq!(symbols[1].visibility, None);
}

use std::path::Path;

use super::*;

#[test]
fn using_declaration_becomes_directory_reference() {
    let content = "using Acme.Widgets;\nusing System.Collections.Generic;\n";
    let refs = CSharp.extract_imports(content, Path::new("/repo/src/Program.cs"), "src/Program.cs");
    assert_eq!(refs, vec!["Acme/Widgets/".to_string()]);
}

#[test]
fn extracts_namespace_class_and_visibility() {
    let content = "namespace Acme.Widgets;\npublic class Widget\n{\n}\n";
    let symbols = CSharp.extract_symbols(content);
    assert_eq!(symbols[0].kind, SymbolKind::Namespace);
    assert_eq!(symbols[1].kind, SymbolKind::Class);
    assert_eq!(symbols[1].visibility, Some(Visibility::Public));
}

#[test]
fn method_inside_class_gets_parent() {
    let content = "public class Widget\n{\n    public void Render()\n    {\n    }\n}\n";
    let symbols = CSharp.extract_symbols(content);
    let render = symbols.iter().find(|s| s.name == "Render").unwrap();
    assert_eq!(render.kind, SymbolKind::Method);
    assert_eq!(render.parent.as_deref(), Some("Widget"));
}

#[test]
fn struct_and_enum_are_recognized() {
    let content = "internal struct Point {}\npublic enum Color {}\n";
    let symbols = CSharp.extract_symbols(content);
    assert_eq!(symbols[0].kind, SymbolKind::Struct);
    assert_eq!(symbols[0].visibility, Some(Visibility::Internal));
    assert_eq!(symbols[1].kind, SymbolKind::Enum);
}

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{ImportExtractor, ImportRef, SymbolExtractor};
use crate::model::{SymbolEntry, SymbolKind, Visibility};

pub struct Kotlin;

static IMPORT_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*import\s+([\w.]+?)(\.\*)?\s*$").unwrap());

impl ImportExtractor for Kotlin {
    fn extensions(&self) -> &'static [&'static str] {
        &["kt", "kts"]
    }

    fn extract_imports(&self, content: &str, _abs_path: &Path, _rel_path: &str) -> Vec<ImportRef> {
        let mut refs = Vec::new();
        for line in content.lines() {
            if let Some(caps) = IMPORT_DECL.captures(line.trim_end()) {
                let path = caps[1].replace('.', "/");
                if caps.get(2).is_some() {
                    refs.push(format!("{path}/"));
                } else {
                    refs.push(format!("{path}.kt"));
                }
            }
        }
        refs
    }
}

static CLASS_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(public\s+|private\s+|protected\s+|internal\s+|open\s+|abstract\s+|data\s+|sealed\s+)*class\s+(\w+)").unwrap());
static INTERFACE_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(public\s+|private\s+|protected\s+|internal\s+)*interface\s+(\w+)").unwrap());
static OBJECT_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(public\s+|private\s+|protected\s+|internal\s+)*object\s+(\w+)").unwrap());
static FUN_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)(public\s+|private\s+|protected\s+|internal\s+|override\s+|suspend\s+)*fun\s+(?:<[^>]*>\s*)?(\w+)").unwrap());
static CONST_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(public\s+|private\s+|protected\s+|internal\s+)*(?:const\s+)?val\s+(\w+)").unwrap());

fn signature_of(line: &str) -> String {
    line.split_once('{').map_or(line.trim(), |(head, _)| head.trim()).to_string()
}

fn visibility_of(modifiers: Option<regex::Match<'_>>) -> Option<Visibility> {
    let modifiers = modifiers?.as_str();
    if modifiers.contains("public") {
        Some(Visibility::Public)
    } else if modifiers.contains("private") {
        Some(Visibility::Private)
    } else if modifiers.contains("protected") {
        Some(Visibility::Protected)
    } else if modifiers.contains("internal") {
        Some(Visibility::Internal)
    } else {
        None
    }
}

impl SymbolExtractor for Kotlin {
    fn extensions(&self) -> &'static [&'static str] {
        &["kt", "kts"]
    }

    fn extract_symbols(&self, content: &str) -> Vec<SymbolEntry> {
        let mut symbols = Vec::new();
        let mut type_stack: Vec<(usize, String)> = Vec::new();

        for (idx, raw_line) in content.lines().enumerate() {
            let line_no = idx + 1;
            let indent = raw_line.chars().take_while(|c| c.is_whitespace()).count();

            if let Some(caps) = CLASS_DECL.captures(raw_line) {
                type_stack.retain(|(entry_indent, _)| indent > *entry_indent);
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Class,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: visibility_of(caps.get(1)),
                    parent: None,
                    signature: signature_of(raw_line),
                });
                type_stack.push((indent, caps[2].to_string()));
            } else if let Some(caps) = INTERFACE_DECL.captures(raw_line) {
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Interface,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: visibility_of(caps.get(1)),
                    parent: None,
                    signature: signature_of(raw_line),
                });
                type_stack.push((indent, caps[2].to_string()));
            } else if let Some(caps) = OBJECT_DECL.captures(raw_line) {
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Class,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: visibility_of(caps.get(1)),
                    parent: None,
                    signature: signature_of(raw_line),
                });
                type_stack.push((indent, caps[2].to_string()));
            } else if let Some(caps) = FUN_DECL.captures(raw_line) {
                let fun_indent = caps[1].chars().count();
                type_stack.retain(|(entry_indent, _)| fun_indent > *entry_indent);
                let parent = type_stack.last().map(|(_, name)| name.clone());
                symbols.push(SymbolEntry {
                    kind: if parent.is_some() { SymbolKind::Method } else { SymbolKind::Fn },
                    name: caps[3].to_string(),
                    line: line_no,
                    visibility: visibility_of(caps.get(2)),
                    parent,
                    signature: signature_of(raw_line),
                });
            } else if type_stack.is_empty()
                && let Some(caps) = CONST_DECL.captures(raw_line)
            {
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Const,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: visibility_of(caps.get(1)),
                    parent: None,
                    signature: signature_of(raw_line),
                });
            }
        }

        symbols
    }
}

#[cfg(test)]
#[path = "kotlin_tests.rs"]
mod tests;

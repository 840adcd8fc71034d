use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{ImportExtractor, ImportRef, SymbolExtractor};
use crate::model::{SymbolEntry, SymbolKind, Visibility};

pub struct Java;

static IMPORT_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*import\s+(?:static\s+)?([\w.]+?)(\.\*)?\s*;").unwrap());

impl ImportExtractor for Java {
    fn extensions(&self) -> &'static [&'static str] {
        &["java"]
    }

    fn extract_imports(&self, content: &str, _abs_path: &Path, _rel_path: &str) -> Vec<ImportRef> {
        let mut refs = Vec::new();
        for line in content.lines() {
            if let Some(caps) = IMPORT_DECL.captures(line) {
                let path = caps[1].replace('.', "/");
                if caps.get(2).is_some() {
                    refs.push(format!("{path}/"));
                } else {
                    refs.push(format!("{path}.java"));
                }
            }
        }
        refs
    }
}

static CLASS_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(public\s+|private\s+|protected\s+|static\s+|final\s+|abstract\s+)*class\s+(\w+)").unwrap());
static INTERFACE_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(public\s+|private\s+|protected\s+)*interface\s+(\w+)").unwrap());
static ENUM_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(public\s+|private\s+|protected\s+)*enum\s+(\w+)").unwrap());
static METHOD_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(public\s+|private\s+|protected\s+|static\s+|final\s+|abstract\s+|synchronized\s+)*[\w<>\[\],. ]+\s+(\w+)\s*\([^;]*\)\s*(?:throws\s+[\w, ]+)?\s*\{?\s*$")
        .unwrap()
});

fn signature_of(line: &str) -> String {
    line.split_once('{').map_or(line.trim(), |(head, _)| head.trim()).to_string()
}

fn visibility_of(caps: &regex::Captures<'_>) -> Option<Visibility> {
    let modifiers = caps.get(1)?.as_str();
    if modifiers.contains("public") {
        Some(Visibility::Public)
    } else if modifiers.contains("private") {
        Some(Visibility::Private)
    } else if modifiers.contains("protected") {
        Some(Visibility::Protected)
    } else {
        None
    }
}

impl SymbolExtractor for Java {
    fn extensions(&self) -> &'static [&'static str] {
        &["java"]
    }

    fn extract_symbols(&self, content: &str) -> Vec<SymbolEntry> {
        let mut symbols = Vec::new();
        let mut type_stack: Vec<(i32, String)> = Vec::new();
        let mut depth: i32 = 0;

        for (idx, raw_line) in content.lines().enumerate() {
            let line_no = idx + 1;

            if let Some(caps) = CLASS_DECL.captures(raw_line) {
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Class,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: visibility_of(&caps),
                    parent: None,
                    signature: signature_of(raw_line),
                });
                type_stack.push((depth, caps[2].to_string()));
            } else if let Some(caps) = INTERFACE_DECL.captures(raw_line) {
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Interface,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: visibility_of(&caps),
                    parent: None,
                    signature: signature_of(raw_line),
                });
                type_stack.push((depth, caps[2].to_string()));
            } else if let Some(caps) = ENUM_DECL.captures(raw_line) {
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Enum,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: visibility_of(&caps),
                    parent: None,
                    signature: signature_of(raw_line),
                });
            } else if !type_stack.is_empty()
                && let Some(caps) = METHOD_DECL.captures(raw_line)
                && !["if", "for", "while", "switch", "catch", "return", "new"].contains(&&caps[2][..])
            {
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Method,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: visibility_of(&caps),
                    parent: type_stack.last().map(|(_, name)| name.clone()),
                    signature: signature_of(raw_line),
                });
            }

            depth += raw_line.matches('{').count() as i32 - raw_line.matches('}').count() as i32;
            type_stack.retain(|(entry_depth, _)| depth > *entry_depth);
        }

        symbols
    }
}

#[cfg(test)]
#[path = "java_tests.rs"]
mod tests;

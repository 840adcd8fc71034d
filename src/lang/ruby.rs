use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{ImportExtractor, ImportRef, SymbolExtractor, dir_of};
use crate::model::{SymbolEntry, SymbolKind, Visibility};

pub struct Ruby;

static REQUIRE_RELATIVE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"require_relative\s+['"]([^'"]+)['"]"#).unwrap());

impl ImportExtractor for Ruby {
    fn extensions(&self) -> &'static [&'static str] {
        &["rb"]
    }

    fn extract_imports(&self, content: &str, _abs_path: &Path, rel_path: &str) -> Vec<ImportRef> {
        let dir = dir_of(rel_path);
        let mut refs = Vec::new();
        for line in content.lines() {
            if let Some(caps) = REQUIRE_RELATIVE.captures(line) {
                let resolved = normalize_relative(dir, &caps[1]);
                refs.push(format!("{resolved}.rb"));
            }
        }
        refs
    }
}

fn normalize_relative(dir: &str, specifier: &str) -> String {
    let mut parts: Vec<&str> = dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in specifier.split('/') {
        match segment {
            "." | "" => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts.join("/")
}

static CLASS_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)class\s+(\w+)").unwrap());
static MODULE_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)module\s+(\w+)").unwrap());
static SELF_METHOD_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)def\s+self\.(\w+)").unwrap());
static METHOD_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)def\s+(\w+[?!=]?)").unwrap());
static VISIBILITY_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(private|protected|public)\s*$").unwrap());

fn signature_of(line: &str) -> String {
    line.trim().to_string()
}

fn indent_of(spaces: &str) -> usize {
    spaces.chars().count()
}

impl SymbolExtractor for Ruby {
    fn extensions(&self) -> &'static [&'static str] {
        &["rb"]
    }

    fn extract_symbols(&self, content: &str) -> Vec<SymbolEntry> {
        let mut symbols = Vec::new();
        // Stack of (indent, name, current_visibility_mode).
        let mut scope_stack: Vec<(usize, String, Option<Visibility>)> = Vec::new();

        for (idx, raw_line) in content.lines().enumerate() {
            let line_no = idx + 1;

            if raw_line.trim().is_empty() {
                continue;
            }

            if let Some(caps) = CLASS_DECL.captures(raw_line) {
                let indent = indent_of(&caps[1]);
                close_scopes_below(&mut scope_stack, indent);
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Class,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: None,
                    parent: None,
                    signature: signature_of(raw_line),
                });
                scope_stack.push((indent, caps[2].to_string(), None));
            } else if let Some(caps) = MODULE_DECL.captures(raw_line) {
                let indent = indent_of(&caps[1]);
                close_scopes_below(&mut scope_stack, indent);
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Namespace,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: None,
                    parent: None,
                    signature: signature_of(raw_line),
                });
                scope_stack.push((indent, caps[2].to_string(), None));
            } else if let Some(caps) = SELF_METHOD_DECL.captures(raw_line) {
                let indent = indent_of(&caps[1]);
                close_scopes_below(&mut scope_stack, indent);
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Method,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: current_visibility(&scope_stack),
                    parent: current_parent(&scope_stack),
                    signature: signature_of(raw_line),
                });
            } else if let Some(caps) = METHOD_DECL.captures(raw_line) {
                let indent = indent_of(&caps[1]);
                close_scopes_below(&mut scope_stack, indent);
                let parent = current_parent(&scope_stack);
                symbols.push(SymbolEntry {
                    kind: if parent.is_some() { SymbolKind::Method } else { SymbolKind::Fn },
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: current_visibility(&scope_stack),
                    parent,
                    signature: signature_of(raw_line),
                });
            } else if let Some(caps) = VISIBILITY_DECL.captures(raw_line)
                && let Some(top) = scope_stack.last_mut()
            {
                top.2 = match &caps[1] {
                    "private" => Some(Visibility::Private),
                    "protected" => Some(Visibility::Protected),
                    _ => None,
                };
            }
        }

        symbols
    }
}

fn close_scopes_below(stack: &mut Vec<(usize, String, Option<Visibility>)>, indent: usize) {
    stack.retain(|(entry_indent, _, _)| indent > *entry_indent);
}

fn current_parent(stack: &[(usize, String, Option<Visibility>)]) -> Option<String> {
    stack.last().map(|(_, name, _)| name.clone())
}

fn current_visibility(stack: &[(usize, String, Option<Visibility>)]) -> Option<Visibility> {
    stack.last().and_then(|(_, _, visibility)| *visibility)
}

#[cfg(test)]
#[path = "ruby_tests.rs"]
mod tests;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{ImportExtractor, ImportRef, SymbolExtractor, dir_of};
use crate::model::{SymbolEntry, SymbolKind};

pub struct Python;

static IMPORT_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*import\s+([\w.]+)").unwrap());
static FROM_IMPORT_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*from\s+(\.*[\w.]*)\s+import\s+").unwrap());

impl ImportExtractor for Python {
    fn extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn extract_imports(&self, content: &str, _abs_path: &Path, rel_path: &str) -> Vec<ImportRef> {
        let dir = dir_of(rel_path);
        let mut refs = Vec::new();

        for line in content.lines() {
            if let Some(caps) = IMPORT_DECL.captures(line) {
                refs.extend(candidates_for("", &caps[1]));
            } else if let Some(caps) = FROM_IMPORT_DECL.captures(line) {
                let module = &caps[1];
                let leading_dots = module.chars().take_while(|c| *c == '.').count();
                let rest = &module[leading_dots..];
                if leading_dots == 0 {
                    refs.extend(candidates_for("", rest));
                } else {
                    let base = ascend(dir, leading_dots - 1);
                    refs.extend(candidates_for(&base, rest));
                }
            }
        }
        refs
    }
}

fn ascend(dir: &str, levels: usize) -> String {
    let mut parts: Vec<&str> = dir.split('/').filter(|s| !s.is_empty()).collect();
    for _ in 0..levels {
        parts.pop();
    }
    parts.join("/")
}

fn candidates_for(base: &str, dotted: &str) -> Vec<ImportRef> {
    let path = if dotted.is_empty() {
        base.to_string()
    } else {
        let segments: Vec<&str> = dotted.split('.').filter(|s| !s.is_empty()).collect();
        let joined = segments.join("/");
        if base.is_empty() {
            joined
        } else {
            format!("{base}/{joined}")
        }
    };
    if path.is_empty() {
        return Vec::new();
    }
    vec![format!("{path}.py"), format!("{path}/__init__.py")]
}

static CLASS_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)class\s+(\w+)").unwrap());
static DEF_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)(?:async\s+)?def\s+(\w+)").unwrap());
static CONST_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([A-Z][A-Z0-9_]*)\s*(?::[^=]+)?=").unwrap());

fn signature_of(line: &str) -> String {
    line.trim_end_matches(':').trim().to_string()
}

fn indent_of(spaces: &str) -> usize {
    spaces.chars().count()
}

impl SymbolExtractor for Python {
    fn extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn extract_symbols(&self, content: &str) -> Vec<SymbolEntry> {
        let mut symbols = Vec::new();
        let mut class_stack: Vec<(usize, String)> = Vec::new();

        for (idx, raw_line) in content.lines().enumerate() {
            let line_no = idx + 1;

            if raw_line.trim().is_empty() {
                continue;
            }

            if let Some(caps) = CLASS_DECL.captures(raw_line) {
                let indent = indent_of(&caps[1]);
                class_stack.retain(|(entry_indent, _)| indent > *entry_indent);
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Class,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: None,
                    parent: None,
                    signature: signature_of(raw_line),
                });
                class_stack.push((indent, caps[2].to_string()));
            } else if let Some(caps) = DEF_DECL.captures(raw_line) {
                let indent = indent_of(&caps[1]);
                class_stack.retain(|(entry_indent, _)| indent > *entry_indent);
                let parent = class_stack.last().map(|(_, name)| name.clone());
                symbols.push(SymbolEntry {
                    kind: if parent.is_some() { SymbolKind::Method } else { SymbolKind::Fn },
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: None,
                    parent,
                    signature: signature_of(raw_line),
                });
            } else if let Some(caps) = CONST_DECL.captures(raw_line) {
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Const,
                    name: caps[1].to_string(),
                    line: line_no,
                    visibility: None,
                    parent: None,
                    signature: signature_of(raw_line),
                });
            }
        }

        symbols
    }
}

#[cfg(test)]
#[path = "python_tests.rs"]
mod tests;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{ImportExtractor, ImportRef, SymbolExtractor, dir_of, join};
use crate::model::{SymbolEntry, SymbolKind, Visibility};

pub struct TypeScript;

static IMPORT_FROM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:import|export)\s+(?:[^'"]*\sfrom\s+)?['"](\./[^'"]+|\.\./[^'"]+)['"]"#).unwrap());
static REQUIRE_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"require\(\s*['"](\./[^'"]+|\.\./[^'"]+)['"]\s*\)"#).unwrap());

const PROBE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

impl ImportExtractor for TypeScript {
    fn extensions(&self) -> &'static [&'static str] {
        &["ts", "tsx", "js", "jsx", "mjs", "cjs"]
    }

    fn extract_imports(&self, content: &str, _abs_path: &Path, rel_path: &str) -> Vec<ImportRef> {
        let dir = dir_of(rel_path);
        let mut refs = Vec::new();
        for line in content.lines() {
            for caps in IMPORT_FROM.captures_iter(line).chain(REQUIRE_CALL.captures_iter(line)) {
                refs.extend(probe_candidates(dir, &caps[1]));
            }
        }
        refs
    }
}

fn probe_candidates(dir: &str, specifier: &str) -> Vec<ImportRef> {
    let resolved = normalize_relative(dir, specifier);
    let mut candidates = Vec::new();
    for ext in PROBE_EXTENSIONS {
        candidates.push(format!("{resolved}.{ext}"));
    }
    for ext in PROBE_EXTENSIONS {
        candidates.push(join(&resolved, &format!("index.{ext}")));
    }
    candidates.push(resolved);
    candidates
}

/// Collapses `./` and `../` segments against `dir` without touching the
/// filesystem.
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

static FUNCTION_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(export\s+)?(?:default\s+)?(?:async\s+)?function\s+(\w+)").unwrap());
static CLASS_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(export\s+)?(?:default\s+)?class\s+(\w+)").unwrap());
static INTERFACE_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(export\s+)?interface\s+(\w+)").unwrap());
static TYPE_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(export\s+)?type\s+(\w+)").unwrap());
static ENUM_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(export\s+)?enum\s+(\w+)").unwrap());
static CONST_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(export\s+)?const\s+(\w+)\s*(?::[^=]+)?=\s*(\([^)]*\)\s*=>|function\b)?").unwrap());
static METHOD_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(public\s+|private\s+|protected\s+|static\s+|async\s+)*(\w+)\s*\([^;]*\)\s*\{?\s*$").unwrap());

fn signature_of(line: &str) -> String {
    line.split_once('{').map_or(line.trim(), |(head, _)| head.trim()).to_string()
}

impl SymbolExtractor for TypeScript {
    fn extensions(&self) -> &'static [&'static str] {
        &["ts", "tsx", "js", "jsx", "mjs", "cjs"]
    }

    fn extract_symbols(&self, content: &str) -> Vec<SymbolEntry> {
        let mut symbols = Vec::new();
        let mut class_stack: Vec<(i32, String)> = Vec::new();
        let mut depth: i32 = 0;

        for (idx, raw_line) in content.lines().enumerate() {
            let line_no = idx + 1;

            if let Some(caps) = CLASS_DECL.captures(raw_line) {
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Class,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: export_visibility(caps.get(1)),
                    parent: None,
                    signature: signature_of(raw_line),
                });
                class_stack.push((depth, caps[2].to_string()));
            } else if let Some(caps) = FUNCTION_DECL.captures(raw_line) {
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Fn,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: export_visibility(caps.get(1)),
                    parent: None,
                    signature: signature_of(raw_line),
                });
            } else if let Some(caps) = INTERFACE_DECL.captures(raw_line) {
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Interface,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: export_visibility(caps.get(1)),
                    parent: None,
                    signature: signature_of(raw_line),
                });
            } else if let Some(caps) = ENUM_DECL.captures(raw_line) {
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Enum,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: export_visibility(caps.get(1)),
                    parent: None,
                    signature: signature_of(raw_line),
                });
            } else if let Some(caps) = TYPE_DECL.captures(raw_line) {
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Type,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: export_visibility(caps.get(1)),
                    parent: None,
                    signature: signature_of(raw_line),
                });
            } else if let Some(caps) = CONST_DECL.captures(raw_line) {
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Const,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: export_visibility(caps.get(1)),
                    parent: None,
                    signature: signature_of(raw_line),
                });
            } else if !class_stack.is_empty()
                && let Some(caps) = METHOD_DECL.captures(raw_line)
                && caps[2] != *"constructor"
                && !["if", "for", "while", "switch", "catch"].contains(&&caps[2][..])
            {
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Method,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: None,
                    parent: class_stack.last().map(|(_, name)| name.clone()),
                    signature: signature_of(raw_line),
                });
            }

            depth += raw_line.matches('{').count() as i32 - raw_line.matches('}').count() as i32;
            class_stack.retain(|(entry_depth, _)| depth > *entry_depth);
        }

        symbols
    }
}

fn export_visibility(export_capture: Option<regex::Match<'_>>) -> Option<Visibility> {
    export_capture.map(|_| Visibility::Export)
}

#[cfg(test)]
#[path = "ts_tests.rs"]
mod tests;

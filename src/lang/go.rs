use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex};

use regex::Regex;

use super::{ImportExtractor, ImportRef, SymbolExtractor};
use crate::model::{SymbolEntry, SymbolKind, Visibility};

/// Resolves Go imports against the enclosing module's `go.mod`, walking up
/// from each file's directory. Per-scan memoized since the same directory is
/// revisited for every file it contains.
pub struct Go {
    module_cache: Mutex<HashMap<PathBuf, Option<String>>>,
}

impl Go {
    #[must_use]
    pub fn new() -> Self {
        Self {
            module_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Finds the module path declared by the nearest ancestor `go.mod`,
    /// memoized by the file's containing directory.
    fn module_for(&self, dir: &Path) -> Option<String> {
        if let Some(cached) = self.module_cache.lock().unwrap().get(dir) {
            return cached.clone();
        }
        let resolved = Self::locate_module(dir);
        self.module_cache.lock().unwrap().insert(dir.to_path_buf(), resolved.clone());
        resolved
    }

    fn locate_module(start: &Path) -> Option<String> {
        let mut current = Some(start);
        while let Some(dir) = current {
            let candidate = dir.join("go.mod");
            if let Ok(text) = std::fs::read_to_string(&candidate) {
                if let Some(module) = MODULE_DECL.captures(&text) {
                    return Some(module[1].trim().to_string());
                }
                return None;
            }
            current = dir.parent();
        }
        None
    }
}

impl Default for Go {
    fn default() -> Self {
        Self::new()
    }
}

static MODULE_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^module\s+(\S+)").unwrap());
static SINGLE_IMPORT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^\s*import\s+"([^"]+)""#).unwrap());
static GROUPED_IMPORT_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*import\s*\(").unwrap());
static GROUPED_IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^\s*(?:\w+\s+)?"([^"]+)""#).unwrap());

impl ImportExtractor for Go {
    fn extensions(&self) -> &'static [&'static str] {
        &["go"]
    }

    fn extract_imports(&self, content: &str, abs_path: &Path, _rel_path: &str) -> Vec<ImportRef> {
        let dir = abs_path.parent().unwrap_or_else(|| Path::new("."));
        let module = match self.module_for(dir) {
            Some(module) => module,
            None => return Vec::new(),
        };

        let mut refs = Vec::new();
        let mut in_group = false;
        for line in content.lines() {
            if in_group {
                if line.trim_start().starts_with(')') {
                    in_group = false;
                    continue;
                }
                if let Some(caps) = GROUPED_IMPORT_LINE.captures(line) {
                    push_if_internal(&mut refs, &module, &caps[1]);
                }
            } else if GROUPED_IMPORT_OPEN.is_match(line) {
                in_group = true;
            } else if let Some(caps) = SINGLE_IMPORT.captures(line) {
                push_if_internal(&mut refs, &module, &caps[1]);
            }
        }
        refs
    }
}

fn push_if_internal(refs: &mut Vec<ImportRef>, module: &str, import_path: &str) {
    let Some(rest) = import_path.strip_prefix(module) else {
        return;
    };
    let relative = rest.trim_start_matches('/');
    refs.push(format!("{relative}/"));
}

static FUNC_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*func\s+(\w+)\s*\(").unwrap());
static METHOD_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*func\s+\(\s*\w+\s+\*?(\w+)\s*\)\s*(\w+)\s*\(").unwrap());
static STRUCT_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*type\s+(\w+)\s+struct\b").unwrap());
static INTERFACE_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*type\s+(\w+)\s+interface\b").unwrap());
static TYPE_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*type\s+(\w+)\s+(?!struct\b|interface\b)\S").unwrap());
static CONST_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*const\s+(\w+)").unwrap());
static VAR_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*var\s+(\w+)").unwrap());

fn signature_of(line: &str) -> String {
    line.split_once('{').map_or(line.trim(), |(head, _)| head.trim()).to_string()
}

fn visibility_of(name: &str) -> Option<Visibility> {
    name.chars().next().and_then(|c| c.is_uppercase().then_some(Visibility::Pub))
}

impl SymbolExtractor for Go {
    fn extensions(&self) -> &'static [&'static str] {
        &["go"]
    }

    fn extract_symbols(&self, content: &str) -> Vec<SymbolEntry> {
        let mut symbols = Vec::new();

        for (idx, raw_line) in content.lines().enumerate() {
            let line_no = idx + 1;

            if let Some(caps) = METHOD_DECL.captures(raw_line) {
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Method,
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: visibility_of(&caps[2]),
                    parent: Some(caps[1].to_string()),
                    signature: signature_of(raw_line),
                });
            } else if let Some(caps) = FUNC_DECL.captures(raw_line) {
                symbols.push(SymbolEntry {
                    kind: SymbolKind::Fn,
                    name: caps[1].to_string(),
                    line: line_no,
                    visibility: visibility_of(&caps[1]),
                    parent: None,
                    signature: signature_of(raw_line),
                });
            } else if let Some(caps) = STRUCT_DECL.captures(raw_line) {
                symbols.push(sym(SymbolKind::Struct, &caps[1], raw_line, line_no));
            } else if let Some(caps) = INTERFACE_DECL.captures(raw_line) {
                symbols.push(sym(SymbolKind::Interface, &caps[1], raw_line, line_no));
            } else if let Some(caps) = TYPE_DECL.captures(raw_line) {
                symbols.push(sym(SymbolKind::Type, &caps[1], raw_line, line_no));
            } else if let Some(caps) = CONST_DECL.captures(raw_line) {
                symbols.push(sym(SymbolKind::Const, &caps[1], raw_line, line_no));
            } else if let Some(caps) = VAR_DECL.captures(raw_line) {
                symbols.push(sym(SymbolKind::Var, &caps[1], raw_line, line_no));
            }
        }

        symbols
    }
}

fn sym(kind: SymbolKind, name: &str, line: &str, line_no: usize) -> SymbolEntry {
    SymbolEntry {
        kind,
        name: name.to_string(),
        line: line_no,
        visibility: visibility_of(name),
        parent: None,
        signature: signature_of(line),
    }
}

#[cfg(test)]
#[path = "go_tests.rs"]
mod tests;

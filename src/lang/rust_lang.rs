use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{ImportExtractor, ImportRef, SymbolExtractor, dir_of, join};
use crate::model::{SymbolEntry, SymbolKind, Visibility};

pub struct Rust;

static MOD_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(?:pub(?:\([^)]*\))?\s+)?mod\s+(\w+)\s*;").unwrap());
static USE_CRATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:pub(?:\([^)]*\))?\s+)?use\s+crate::([\w:]+?)\s*(?:as\s+\w+\s*)?;").unwrap());
static USE_SUPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:pub(?:\([^)]*\))?\s+)?use\s+super::([\w:]+?)\s*(?:as\s+\w+\s*)?;").unwrap());

impl ImportExtractor for Rust {
    fn extensions(&self) -> &'static [&'static str] {
        &["rs"]
    }

    fn extract_imports(&self, content: &str, _abs_path: &Path, rel_path: &str) -> Vec<ImportRef> {
        let dir = dir_of(rel_path);
        let mut refs = Vec::new();

        for line in content.lines() {
            if let Some(caps) = MOD_DECL.captures(line) {
                let name = &caps[1];
                refs.push(join(dir, &format!("{name}.rs")));
                refs.push(join(dir, &format!("{name}/mod.rs")));
            } else if let Some(caps) = USE_CRATE.captures(line) {
                refs.extend(resolve_crate_path(&caps[1]));
            } else if let Some(caps) = USE_SUPER.captures(line) {
                let parent = dir_of(dir);
                refs.extend(resolve_relative_path(parent, &caps[1]));
            }
        }
        refs
    }
}

fn resolve_crate_path(path: &str) -> Vec<ImportRef> {
    resolve_relative_path("src", path)
}

fn resolve_relative_path(base: &str, path: &str) -> Vec<ImportRef> {
    let segments: Vec<&str> = path.split("::").filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return Vec::new();
    }
    let mut refs = Vec::new();
    // Treat the whole path as a module chain (e.g. `use crate::a::b;` where
    // `b` is itself a module).
    let as_module = join(base, &format!("{}.rs", segments.join("/")));
    refs.push(as_module);
    refs.push(join(base, &format!("{}/mod.rs", segments.join("/"))));
    // Treat the last segment as an imported item, so the module is the
    // prefix (e.g. `use crate::util::X;` -> `src/util.rs`).
    if segments.len() > 1 {
        let module_path = segments[..segments.len() - 1].join("/");
        refs.push(join(base, &format!("{module_path}.rs")));
        refs.push(join(base, &format!("{module_path}/mod.rs")));
    }
    refs
}

static FN_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(pub(?:\([^)]*\))?\s+)?(?:async\s+)?(?:unsafe\s+)?fn\s+(\w+)").unwrap());
static STRUCT_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(pub(?:\([^)]*\))?\s+)?struct\s+(\w+)").unwrap());
static ENUM_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(pub(?:\([^)]*\))?\s+)?enum\s+(\w+)").unwrap());
static TRAIT_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(pub(?:\([^)]*\))?\s+)?trait\s+(\w+)").unwrap());
static TYPE_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(pub(?:\([^)]*\))?\s+)?type\s+(\w+)").unwrap());
static CONST_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(pub(?:\([^)]*\))?\s+)?const\s+(\w+)").unwrap());
static MOD_DECL_SYM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(pub(?:\([^)]*\))?\s+)?mod\s+(\w+)").unwrap());
static IMPL_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*impl(?:<[^>]*>)?\s+(?:[\w:<>, ]+\s+for\s+)?([\w:]+)").unwrap());

fn signature_of(line: &str) -> String {
    line.split_once('{').map_or(line.trim(), |(head, _)| head.trim()).to_string()
}

fn visibility_of(pub_capture: Option<regex::Match<'_>>) -> Option<Visibility> {
    pub_capture.map(|_| Visibility::Pub)
}

impl SymbolExtractor for Rust {
    fn extensions(&self) -> &'static [&'static str] {
        &["rs"]
    }

    fn extract_symbols(&self, content: &str) -> Vec<SymbolEntry> {
        let mut symbols = Vec::new();
        // Stack of (brace_depth_at_entry, impl_target) to attribute methods
        // to their enclosing `impl` block by brace depth.
        let mut impl_stack: Vec<(i32, String)> = Vec::new();
        let mut depth: i32 = 0;

        for (idx, raw_line) in content.lines().enumerate() {
            let line_no = idx + 1;

            if let Some(caps) = IMPL_DECL.captures(raw_line) {
                impl_stack.push((depth, caps[1].to_string()));
            } else if let Some(caps) = FN_DECL.captures(raw_line) {
                let parent = impl_stack.last().map(|(_, name)| name.clone());
                symbols.push(SymbolEntry {
                    kind: if parent.is_some() { SymbolKind::Method } else { SymbolKind::Fn },
                    name: caps[2].to_string(),
                    line: line_no,
                    visibility: visibility_of(caps.get(1)),
                    parent,
                    signature: signature_of(raw_line),
                });
            } else if let Some(caps) = STRUCT_DECL.captures(raw_line) {
                symbols.push(sym(SymbolKind::Struct, &caps, raw_line, line_no));
            } else if let Some(caps) = ENUM_DECL.captures(raw_line) {
                symbols.push(sym(SymbolKind::Enum, &caps, raw_line, line_no));
            } else if let Some(caps) = TRAIT_DECL.captures(raw_line) {
                symbols.push(sym(SymbolKind::Trait, &caps, raw_line, line_no));
            } else if let Some(caps) = TYPE_DECL.captures(raw_line) {
                symbols.push(sym(SymbolKind::Type, &caps, raw_line, line_no));
            } else if let Some(caps) = CONST_DECL.captures(raw_line) {
                symbols.push(sym(SymbolKind::Const, &caps, raw_line, line_no));
            } else if let Some(caps) = MOD_DECL_SYM.captures(raw_line) {
                symbols.push(sym(SymbolKind::Mod, &caps, raw_line, line_no));
            }

            depth += raw_line.matches('{').count() as i32 - raw_line.matches('}').count() as i32;
            impl_stack.retain(|(entry_depth, _)| depth > *entry_depth);
        }

        symbols
    }
}

fn sym(kind: SymbolKind, caps: &regex::Captures<'_>, line: &str, line_no: usize) -> SymbolEntry {
    SymbolEntry {
        kind,
        name: caps[2].to_string(),
        line: line_no,
        visibility: visibility_of(caps.get(1)),
        parent: None,
        signature: signature_of(line),
    }
}

#[cfg(test)]
#[path = "rust_lang_tests.rs"]
mod tests;

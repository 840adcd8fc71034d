//! External-configuration constants: the kind of thing an operator might
//! reasonably want to tweak without touching the scanning logic.
//!
//! These tables are intentionally plain compile-time data, `const`/static
//! tables rather than a loaded config file; the engine behaves correctly for
//! any such set.

/// Directory and file basenames pruned by default when `--no-defaults` is
/// absent.
pub const DEFAULT_EXCLUDED_NAMES: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "target",
    "dist",
    "build",
    "out",
    ".next",
    ".nuxt",
    "vendor",
    "venv",
    ".venv",
    "__pycache__",
    ".mypy_cache",
    ".pytest_cache",
    ".tox",
    "bin",
    "obj",
    ".idea",
    ".vscode",
    "coverage",
    ".cache",
    ".gradle",
    ".terraform",
];

/// Extensions (without the leading dot) considered "source" for tree, stats,
/// and symbol modes.
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "rs", "ts", "tsx", "js", "jsx", "mjs", "cjs", "cs", "go", "py", "pyi", "java", "kt", "kts",
    "rb", "c", "h", "cc", "cpp", "cxx", "hpp", "hh", "swift", "scala", "php", "sh", "bash",
    "yaml", "yml", "toml", "json", "md", "proto", "sql", "lua",
];

#[must_use]
pub fn is_recognized_source_extension(ext: &str) -> bool {
    SOURCE_EXTENSIONS
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(ext))
}

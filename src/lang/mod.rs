//! Language-pluggable analyzers. Two orthogonal capability traits, dispatched
//! by file extension; a language binding may implement one, both, or
//! neither.

mod csharp;
mod go;
mod java;
mod kotlin;
mod python;
mod ruby;
mod rust_lang;
mod ts;

use std::path::Path;

use crate::model::SymbolEntry;

/// A raw, language-specific import reference. A file-form reference is an
/// exact root-relative path; a directory-form reference carries a trailing
/// `/` and resolves against every project file with that prefix.
pub type ImportRef = String;

pub trait ImportExtractor: Send + Sync {
    fn extensions(&self) -> &'static [&'static str];

    /// `abs_path` is the file's absolute path (used by handlers, Go in
    /// particular, that need to look at sibling/ancestor files like
    /// `go.mod`); `rel_path` is its root-relative, forward-slash path.
    fn extract_imports(&self, content: &str, abs_path: &Path, rel_path: &str) -> Vec<ImportRef>;
}

pub trait SymbolExtractor: Send + Sync {
    fn extensions(&self) -> &'static [&'static str];

    fn extract_symbols(&self, content: &str) -> Vec<SymbolEntry>;
}

/// Extension-keyed dispatch table. At most one handler per capability per
/// extension.
pub struct LanguageRegistry {
    import_handlers: Vec<Box<dyn ImportExtractor>>,
    symbol_handlers: Vec<Box<dyn SymbolExtractor>>,
}

impl LanguageRegistry {
    #[must_use]
    pub fn with_builtin_languages() -> Self {
        let import_handlers: Vec<Box<dyn ImportExtractor>> = vec![
            Box::new(rust_lang::Rust),
            Box::new(ts::TypeScript),
            Box::new(csharp::CSharp),
            Box::new(go::Go::new()),
            Box::new(python::Python),
            Box::new(java::Java),
            Box::new(kotlin::Kotlin),
            Box::new(ruby::Ruby),
        ];
        let symbol_handlers: Vec<Box<dyn SymbolExtractor>> = vec![
            Box::new(rust_lang::Rust),
            Box::new(ts::TypeScript),
            Box::new(csharp::CSharp),
            Box::new(go::Go::new()),
            Box::new(python::Python),
            Box::new(java::Java),
            Box::new(kotlin::Kotlin),
            Box::new(ruby::Ruby),
        ];
        Self {
            import_handlers,
            symbol_handlers,
        }
    }

    #[must_use]
    pub fn import_extractor_for(&self, extension: &str) -> Option<&dyn ImportExtractor> {
        self.import_handlers
            .iter()
            .find(|handler| handler.extensions().iter().any(|e| e.eq_ignore_ascii_case(extension)))
            .map(std::convert::AsRef::as_ref)
    }

    #[must_use]
    pub fn symbol_extractor_for(&self, extension: &str) -> Option<&dyn SymbolExtractor> {
        self.symbol_handlers
            .iter()
            .find(|handler| handler.extensions().iter().any(|e| e.eq_ignore_ascii_case(extension)))
            .map(std::convert::AsRef::as_ref)
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::with_builtin_languages()
    }
}

/// Splits `rel_path` into its directory component (empty string for a
/// root-level file), used by several handlers to resolve relative imports.
#[must_use]
pub(crate) fn dir_of(rel_path: &str) -> &str {
    rel_path.rfind('/').map_or("", |idx| &rel_path[..idx])
}

#[must_use]
pub(crate) fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

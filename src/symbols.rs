//! Symbol-extraction orchestrator. Dispatches each candidate file to its
//! language's `SymbolExtractor` and attaches the root-relative path the
//! extractor itself never sees.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::cancel::CancelToken;
use crate::content::reader;
use crate::lang::LanguageRegistry;
use crate::model::FileEntry;
use crate::pathutil;

/// Extracts symbols from every file in `paths` whose extension has a
/// registered `SymbolExtractor`. Files with no handler, or that look
/// binary, are silently skipped.
#[must_use]
pub fn extract_symbols(paths: &[PathBuf], root: &Path, cancelled: &CancelToken) -> Vec<FileEntry> {
    let registry = LanguageRegistry::with_builtin_languages();

    let mut entries: Vec<FileEntry> = paths
        .par_iter()
        .filter_map(|path| {
            if cancelled.is_cancelled() {
                return None;
            }
            let extension = path.extension().and_then(|e| e.to_str())?;
            let extractor = registry.symbol_extractor_for(extension)?;

            let bytes = match reader::open(path) {
                Ok(Some(bytes)) => bytes,
                Ok(None) | Err(_) => return None,
            };
            if reader::looks_binary(&bytes) {
                return None;
            }
            let content = String::from_utf8_lossy(&bytes);

            let mut entry = FileEntry::with_path(pathutil::normalize(root, path));
            entry.symbols = Some(extractor.extract_symbols(&content));
            Some(entry)
        })
        .collect();

    entries.sort_by(|a, b| a.path.to_lowercase().cmp(&b.path.to_lowercase()));
    entries
}

#[cfg(test)]
#[path = "symbols_tests.rs"]
mod tests;

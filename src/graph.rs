//! Import/dependency graph orchestrator. Dispatches each candidate file to
//! its language's `ImportExtractor`, resolves the raw references against the
//! project file set, and emits one `GraphEntry` per file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::cancel::CancelToken;
use crate::content::reader;
use crate::lang::LanguageRegistry;
use crate::model::GraphEntry;
use crate::pathutil;

fn project_files_with_rel_paths(paths: &[PathBuf], root: &Path) -> Vec<(PathBuf, String)> {
    paths.iter().map(|path| (path.clone(), pathutil::normalize(root, path))).collect()
}

fn resolve_reference(reference: &str, project_files: &[String], seen: &mut HashSet<String>, out: &mut Vec<String>) {
    if reference.ends_with('/') {
        for candidate in project_files {
            if candidate.starts_with(reference) && seen.insert(candidate.clone()) {
                out.push(candidate.clone());
            }
        }
    } else if project_files.iter().any(|candidate| candidate == reference) && seen.insert(reference.to_string()) {
        out.push(reference.to_string());
    }
}

/// Builds the import graph over `paths` (the caller's candidate file set,
/// already filtered by glob or by the recognized source extensions).
/// Files whose extension has no registered handler, or that look binary,
/// are silently skipped.
#[must_use]
pub fn build_graph(paths: &[PathBuf], root: &Path, cancelled: &CancelToken) -> Vec<GraphEntry> {
    let registry = LanguageRegistry::with_builtin_languages();
    let project_files = project_files_with_rel_paths(paths, root);
    let project_paths: Vec<String> = project_files.iter().map(|(_, rel)| rel.clone()).collect();

    let mut entries: Vec<GraphEntry> = project_files
        .par_iter()
        .filter_map(|(abs_path, rel_path)| {
            if cancelled.is_cancelled() {
                return None;
            }
            let extension = abs_path.extension().and_then(|e| e.to_str())?;
            let extractor = registry.import_extractor_for(extension)?;

            let bytes = reader::open(abs_path).ok().flatten()?;
            if reader::looks_binary(&bytes) {
                return None;
            }
            let content = String::from_utf8_lossy(&bytes);

            let raw_refs = extractor.extract_imports(&content, abs_path, rel_path);
            let mut seen = HashSet::new();
            let mut resolved = Vec::new();
            for reference in &raw_refs {
                resolve_reference(reference, &project_paths, &mut seen, &mut resolved);
            }
            resolved.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));

            Some(GraphEntry {
                file: rel_path.clone(),
                imports: resolved,
            })
        })
        .collect();

    entries.sort_by(|a, b| a.file.to_lowercase().cmp(&b.file.to_lowercase()));
    entries
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;

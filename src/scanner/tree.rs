use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::cancel::CancelToken;
use crate::defaults::is_recognized_source_extension;
use crate::exclude::ExclusionFilter;
use crate::model::ScanResult;

/// Parallel directory walk producing a pruned tree: a node survives only if
/// it or a descendant carries a recognized source file.
#[must_use]
pub fn scan_tree(
    root: &Path,
    filter: &ExclusionFilter,
    cancelled: &CancelToken,
    files_scanned: &AtomicU64,
) -> Option<ScanResult> {
    scan_dir(root, filter, cancelled, files_scanned)
}

fn scan_dir(
    dir: &Path,
    filter: &ExclusionFilter,
    cancelled: &CancelToken,
    files_scanned: &AtomicU64,
) -> Option<ScanResult> {
    if cancelled.is_cancelled() {
        return None;
    }

    let mut file_names = Vec::new();
    let mut subdirs = Vec::new();
    let mut logged_error = false;

    let walker = WalkDir::new(dir).min_depth(1).max_depth(1).into_iter();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if !logged_error {
                    log::warn!("skipping unreadable entry under {}: {err}", dir.display());
                    logged_error = true;
                }
                continue;
            }
        };
        let path = entry.path().to_path_buf();
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry.file_type();
        if file_type.is_dir() {
            if !filter.is_excluded(&name) {
                subdirs.push(path);
            }
        } else if file_type.is_file() {
            files_scanned.fetch_add(1, Ordering::Relaxed);
            let is_source = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(is_recognized_source_extension);
            if is_source && !filter.is_excluded(&name) {
                file_names.push(name);
            }
        }
    }

    let mut children: Vec<ScanResult> = subdirs
        .par_iter()
        .filter_map(|path| scan_dir(path, filter, cancelled, files_scanned))
        .collect();

    file_names.sort_by_key(|name| name.to_lowercase());
    children.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    if file_names.is_empty() && children.is_empty() {
        return None;
    }

    let name = dir
        .file_name()
        .map_or_else(|| dir.display().to_string(), |n| n.to_string_lossy().into_owned());

    Some(ScanResult {
        name,
        children: (!children.is_empty()).then_some(children),
        files: (!file_names.is_empty()).then_some(file_names),
    })
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ignore::{WalkBuilder, WalkState};

use crate::cancel::CancelToken;
use crate::exclude::ExclusionFilter;
use crate::glob;

/// Parallel directory walk returning every file whose basename matches any
/// of `globs` and is not excluded.
///
/// Unreadable directories are skipped silently and do not abort the walk;
/// `cancelled` is polled by each worker between entries.
#[must_use]
pub fn find_files(root: &Path, globs: &[String], filter: &ExclusionFilter, cancelled: &CancelToken) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .require_git(false)
        .parents(false)
        .standard_filters(false)
        .filter_entry({
            let filter = filter.clone();
            move |entry| {
                if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    !filter.is_excluded(&entry.file_name().to_string_lossy())
                } else {
                    true
                }
            }
        });

    let files: Mutex<Vec<PathBuf>> = Mutex::new(Vec::new());

    builder.build_parallel().run(|| {
        let files = &files;
        let filter = filter.clone();
        let cancelled = cancelled.clone();
        Box::new(move |entry| {
            if cancelled.is_cancelled() {
                return WalkState::Quit;
            }
            let Ok(entry) = entry else {
                return WalkState::Continue;
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                return WalkState::Continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if filter.is_excluded(&name) {
                return WalkState::Continue;
            }
            if glob::matches_any(&name, globs) {
                if let Ok(mut guard) = files.lock() {
                    guard.push(entry.into_path());
                }
            }
            WalkState::Continue
        })
    });

    files.into_inner().unwrap_or_default()
}

#[cfg(test)]
#[path = "flat_tests.rs"]
mod tests;

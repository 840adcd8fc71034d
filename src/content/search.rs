use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;

use super::matcher::Matcher;
use super::ranges::windows_around_matches;
use super::reader;
use crate::cancel::CancelToken;
use crate::model::{FileChunk, FileEntry};
use crate::pathutil;

/// Aggregate counters alongside the per-file entries, used to populate
/// `MetaInfo`.
pub struct SearchOutcome {
    pub entries: Vec<FileEntry>,
    pub files_scanned: u64,
    pub files_matched: u64,
    pub total_matches: u64,
}

/// Content-search parallelism is capped at `2 * logical processor count`
/// rather than rayon's default of one thread per core, since
/// per-file work is I/O-heavy and benefits from oversubscription.
fn bounded_pool() -> &'static rayon::ThreadPool {
    static POOL: OnceLock<rayon::ThreadPool> = OnceLock::new();
    POOL.get_or_init(|| {
        let threads = std::thread::available_parallelism()
            .map_or(2, |n| n.get())
            .saturating_mul(2);
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .expect("building the bounded content-search pool")
    })
}

/// Renders lines `start..=end` (0-based, inclusive) from `lines`, optionally
/// prefixing each with its 1-based line number.
#[must_use]
pub fn render_chunk_lines(lines: &[String], start: usize, end: usize, line_numbers: bool) -> String {
    let mut rendered = String::new();
    for (offset, line) in lines[start..=end].iter().enumerate() {
        if offset > 0 {
            rendered.push('\n');
        }
        if line_numbers {
            rendered.push_str(&format!("{}.  ", start + offset + 1));
        }
        rendered.push_str(line);
    }
    rendered
}

fn build_chunks(
    lines: &[String],
    windows: &[(usize, usize)],
    line_numbers: bool,
    cancelled: &CancelToken,
) -> Vec<FileChunk> {
    let mut chunks = Vec::with_capacity(windows.len());
    for &(start, end) in windows {
        if cancelled.is_cancelled() {
            break;
        }
        chunks.push(FileChunk {
            start_line: start + 1,
            end_line: end + 1,
            content: render_chunk_lines(lines, start, end, line_numbers),
        });
    }
    chunks
}

fn process_one_for_search(
    path: &Path,
    root: &Path,
    matcher: &Matcher,
    pad: usize,
    line_numbers: bool,
    cancelled: &CancelToken,
) -> Option<FileEntry> {
    if cancelled.is_cancelled() {
        return None;
    }
    let rel_path = pathutil::normalize(root, path);

    let bytes = match reader::open(path) {
        Ok(None) => return None,
        Ok(Some(bytes)) => bytes,
        Err(err) => {
            return Some(FileEntry {
                error: Some(err.to_string()),
                ..FileEntry::with_path(rel_path)
            });
        }
    };
    if reader::looks_binary(&bytes) {
        return None;
    }

    let lines = reader::split_lines(&bytes);
    let line_count = lines.len();
    let matched_indices: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| matcher.is_match(line))
        .map(|(i, _)| i)
        .collect();

    if matched_indices.is_empty() {
        return None;
    }

    let windows = windows_around_matches(matched_indices, pad, line_count);
    let chunks = build_chunks(&lines, &windows, line_numbers, cancelled);

    let mut entry = FileEntry::with_path(rel_path);
    // Whole-file collapse.
    if chunks.len() == 1 && chunks[0].start_line == 1 && chunks[0].end_line == line_count {
        entry.contents = Some(chunks[0].content.clone());
    } else {
        entry.chunks = Some(chunks);
    }
    Some(entry)
}

fn process_one_for_count(
    path: &Path,
    root: &Path,
    matcher: &Matcher,
    include_zero: bool,
    cancelled: &CancelToken,
) -> Option<(FileEntry, u64)> {
    if cancelled.is_cancelled() {
        return None;
    }
    let rel_path = pathutil::normalize(root, path);

    let bytes = match reader::open(path) {
        Ok(None) => return None,
        Ok(Some(bytes)) => bytes,
        Err(err) => {
            let entry = FileEntry {
                error: Some(err.to_string()),
                ..FileEntry::with_path(rel_path)
            };
            return Some((entry, 0));
        }
    };
    if reader::looks_binary(&bytes) {
        return None;
    }

    let lines = reader::split_lines(&bytes);
    let count = lines.iter().filter(|line| matcher.is_match(line)).count() as u64;

    if count == 0 && !include_zero {
        return None;
    }

    let mut entry = FileEntry::with_path(rel_path);
    entry.count = Some(count);
    Some((entry, count))
}

/// Search mode: matches, merges, and renders chunks across `paths` in
/// parallel.
#[must_use]
pub fn search_files(
    paths: &[PathBuf],
    root: &Path,
    matcher: &Matcher,
    pad: usize,
    line_numbers: bool,
    cancelled: &CancelToken,
) -> SearchOutcome {
    let scanned = AtomicU64::new(0);
    let mut entries: Vec<FileEntry> = bounded_pool().install(|| {
        paths
            .par_iter()
            .filter_map(|path| {
                scanned.fetch_add(1, Ordering::Relaxed);
                process_one_for_search(path, root, matcher, pad, line_numbers, cancelled)
            })
            .collect()
    });
    entries.sort_by(|a, b| a.path.to_lowercase().cmp(&b.path.to_lowercase()));

    SearchOutcome {
        files_matched: entries.len() as u64,
        files_scanned: scanned.load(Ordering::Relaxed),
        total_matches: 0,
        entries,
    }
}

/// Count mode: shares the search pipeline's reading and matching but counts
/// matching lines instead of building chunks.
#[must_use]
pub fn count_files(
    paths: &[PathBuf],
    root: &Path,
    matcher: &Matcher,
    include_zero: bool,
    cancelled: &CancelToken,
) -> SearchOutcome {
    let scanned = AtomicU64::new(0);
    let mut results: Vec<(FileEntry, u64)> = bounded_pool().install(|| {
        paths
            .par_iter()
            .filter_map(|path| {
                scanned.fetch_add(1, Ordering::Relaxed);
                process_one_for_count(path, root, matcher, include_zero, cancelled)
            })
            .collect()
    });
    results.sort_by(|a, b| a.0.path.to_lowercase().cmp(&b.0.path.to_lowercase()));

    let total_matches = results.iter().map(|(_, count)| count).sum();
    let entries = results.into_iter().map(|(entry, _)| entry).collect::<Vec<_>>();

    SearchOutcome {
        files_matched: entries.len() as u64,
        files_scanned: scanned.load(Ordering::Relaxed),
        total_matches,
        entries,
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;

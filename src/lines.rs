//! Line extractor: pulls exact ranges out of named files,
//! merging overlapping/adjacent ranges per file and validating specs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cancel::CancelToken;
use crate::content::reader;
use crate::content::{merge_intervals, render_chunk_lines};
use crate::error::{CodemapError, Result};
use crate::model::{FileChunk, FileEntry};

/// A single `path:start:end` request, 1-based inclusive.
#[derive(Debug, Clone)]
pub struct LineSpec {
    pub path: String,
    pub start_line: usize,
    pub end_line: usize,
}

/// Parses `"path:start:end"`. Malformed specs are a configuration error;
/// `start > end` is swapped, not rejected.
pub fn parse_spec(raw: &str) -> Result<LineSpec> {
    let mut parts = raw.rsplitn(3, ':');
    let end: &str = parts
        .next()
        .ok_or_else(|| CodemapError::InvalidLineSpec(raw.to_string(), "missing ':'"))?;
    let start: &str = parts
        .next()
        .ok_or_else(|| CodemapError::InvalidLineSpec(raw.to_string(), "missing ':'"))?;
    let path: &str = parts
        .next()
        .ok_or_else(|| CodemapError::InvalidLineSpec(raw.to_string(), "missing ':'"))?;
    if parts.next().is_some() {
        return Err(CodemapError::InvalidLineSpec(raw.to_string(), "too many ':' fields"));
    }

    let start: i64 = start
        .parse()
        .map_err(|_| CodemapError::InvalidLineSpec(raw.to_string(), "non-integer start"))?;
    let end: i64 = end
        .parse()
        .map_err(|_| CodemapError::InvalidLineSpec(raw.to_string(), "non-integer end"))?;
    if start <= 0 || end <= 0 {
        return Err(CodemapError::InvalidLineSpec(raw.to_string(), "line numbers must be positive"));
    }

    let (start, end) = if start > end {
        (end as usize, start as usize)
    } else {
        (start as usize, end as usize)
    };

    Ok(LineSpec {
        path: path.to_string(),
        start_line: start,
        end_line: end,
    })
}

fn extract_from_file(
    rel_path: &str,
    abs_path: &Path,
    specs: &[&LineSpec],
    line_numbers: bool,
    cancelled: &CancelToken,
) -> FileEntry {
    if !abs_path.exists() {
        return FileEntry {
            error: Some(format!("File not found: {rel_path}")),
            ..FileEntry::with_path(rel_path.to_string())
        };
    }

    let bytes = match reader::open(abs_path) {
        Ok(None) => {
            return FileEntry {
                chunks: Some(Vec::new()),
                ..FileEntry::with_path(rel_path.to_string())
            };
        }
        Ok(Some(bytes)) => bytes,
        Err(err) => {
            return FileEntry {
                error: Some(err.to_string()),
                ..FileEntry::with_path(rel_path.to_string())
            };
        }
    };

    if reader::looks_binary(&bytes) {
        return FileEntry {
            error: Some(format!("binary file skipped: {rel_path}")),
            ..FileEntry::with_path(rel_path.to_string())
        };
    }

    let lines = reader::split_lines(&bytes);
    let line_count = lines.len();

    if line_count == 0 {
        return FileEntry {
            error: Some("range out of bounds".to_string()),
            ..FileEntry::with_path(rel_path.to_string())
        };
    }

    // Both bounds are clamped into `[1, line_count]`: a range whose start
    // lands past the end of a short file still yields its last line rather
    // than erroring ("10:8" on a 5-line file swaps to "8:10" then clamps to
    // `[5,5]`, not an out-of-bounds error).
    let last_index = line_count - 1;
    let intervals = specs
        .iter()
        .map(|spec| {
            let start = (spec.start_line - 1).min(last_index);
            let end = (spec.end_line - 1).min(last_index);
            (start, end)
        })
        .collect();
    let merged = merge_intervals(intervals);

    let mut chunks = Vec::with_capacity(merged.len());
    for (start, end) in merged {
        if cancelled.is_cancelled() {
            break;
        }
        chunks.push(FileChunk {
            start_line: start + 1,
            end_line: end + 1,
            content: render_chunk_lines(&lines, start, end, line_numbers),
        });
    }

    let mut entry = FileEntry::with_path(rel_path.to_string());
    if chunks.len() == 1 && chunks[0].start_line == 1 && chunks[0].end_line == line_count {
        entry.contents = Some(chunks[0].content.clone());
    } else {
        entry.chunks = Some(chunks);
    }
    entry
}

/// Extracts exact ranges from many files. Specs are grouped
/// by resolved path so each file is read once.
#[must_use]
pub fn extract(
    root: &Path,
    specs: &[LineSpec],
    line_numbers: bool,
    cancelled: &CancelToken,
) -> Vec<FileEntry> {
    let mut by_path: HashMap<&str, Vec<&LineSpec>> = HashMap::new();
    for spec in specs {
        by_path.entry(spec.path.as_str()).or_default().push(spec);
    }

    let mut entries: Vec<FileEntry> = by_path
        .into_iter()
        .map(|(rel_path, specs)| {
            let abs_path: PathBuf = root.join(rel_path);
            extract_from_file(rel_path, &abs_path, &specs, line_numbers, cancelled)
        })
        .collect();

    entries.sort_by(|a, b| a.path.to_lowercase().cmp(&b.path.to_lowercase()));
    entries
}

#[cfg(test)]
#[path = "lines_tests.rs"]
mod tests;

//! Statistics aggregator: per-extension file/line/byte totals and the ten
//! largest files by size.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::cancel::CancelToken;
use crate::content::reader;
use crate::model::{LanguageStat, LargestFile, StatsResult, Totals};
use crate::pathutil;

struct FileStat {
    path: String,
    extension: String,
    bytes: u64,
    lines: u64,
}

fn stat_one(path: &Path, root: &Path) -> Option<FileStat> {
    let metadata = std::fs::metadata(path).ok()?;
    let bytes = metadata.len();
    let extension = path
        .extension()
        .map_or_else(String::new, |e| e.to_string_lossy().to_lowercase());

    // Binary files still count toward bytes but their line count is
    // conservative: a sniffed binary file is recorded as zero
    // lines rather than attempting to split it.
    let lines = match reader::open(path) {
        Ok(Some(contents)) if !reader::looks_binary(&contents) => count_newlines(&contents),
        _ => 0,
    };

    Some(FileStat {
        path: pathutil::normalize(root, path),
        extension,
        bytes,
        lines,
    })
}

fn count_newlines(bytes: &[u8]) -> u64 {
    bytes.iter().filter(|&&b| b == b'\n').count() as u64
}

/// Aggregates stats over `paths`. `cancelled` is polled once
/// per file.
#[must_use]
pub fn aggregate(paths: &[PathBuf], root: &Path, cancelled: &CancelToken) -> StatsResult {
    let file_stats: Vec<FileStat> = paths
        .par_iter()
        .filter_map(|path| {
            if cancelled.is_cancelled() {
                return None;
            }
            stat_one(path, root)
        })
        .collect();

    let mut by_extension: HashMap<String, (u64, u64, u64)> = HashMap::new();
    for stat in &file_stats {
        let entry = by_extension.entry(stat.extension.clone()).or_insert((0, 0, 0));
        entry.0 += 1;
        entry.1 += stat.lines;
        entry.2 += stat.bytes;
    }

    let mut languages: Vec<LanguageStat> = by_extension
        .into_iter()
        .map(|(extension, (files, lines, bytes))| LanguageStat { extension, files, lines, bytes })
        .collect();
    languages.sort_by(|a, b| b.lines.cmp(&a.lines).then_with(|| a.extension.cmp(&b.extension)));

    let totals = file_stats.iter().fold(Totals::default(), |mut acc, stat| {
        acc.files += 1;
        acc.lines += stat.lines;
        acc.bytes += stat.bytes;
        acc
    });

    let mut largest: Vec<LargestFile> = file_stats
        .iter()
        .map(|stat| LargestFile {
            path: stat.path.clone(),
            bytes: stat.bytes,
        })
        .collect();
    largest.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.path.cmp(&b.path)));
    largest.truncate(10);

    StatsResult { languages, totals, largest }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;

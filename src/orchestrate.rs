//! Mode dispatch. Builds the exclusion filter and
//! cancellation token once per invocation, picks exactly one mode by the
//! fixed priority order, and wraps the result into an `OutputEnvelope`.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::cancel::CancelToken;
use crate::cli::Cli;
use crate::content::{Matcher, count_files, search_files};
use crate::defaults::SOURCE_EXTENSIONS;
use crate::error::{CodemapError, Result};
use crate::exclude::ExclusionFilter;
use crate::graph;
use crate::lines;
use crate::model::{FileEntry, MetaInfo, OutputEnvelope};
use crate::pathutil;
use crate::scanner;
use crate::stats;
use crate::symbols;

/// Exit code for a successful run (including "no matches").
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for a configuration error (bad flag, bad regex, missing root).
pub const EXIT_USER_ERROR: i32 = 1;
/// Exit code when the timeout watchdog fired before the scan finished.
pub const EXIT_TIMEOUT: i32 = 2;
/// Exit code when cancelled by an external interrupt signal.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Runs the selected mode and returns the envelope plus the process exit
/// code. Configuration errors never panic or propagate past this
/// function; they are captured into an error envelope instead.
#[must_use]
pub fn run(cli: &Cli, cancelled: &CancelToken) -> (OutputEnvelope, i32) {
    let start = Instant::now();
    match run_inner(cli, cancelled, start) {
        Ok(envelope) => {
            let code = if envelope.meta.timeout { EXIT_TIMEOUT } else { EXIT_SUCCESS };
            (envelope, code)
        }
        Err(err) => (OutputEnvelope::error(err.to_string()), EXIT_USER_ERROR),
    }
}

fn run_inner(cli: &Cli, cancelled: &CancelToken, start: Instant) -> Result<OutputEnvelope> {
    cli.validate()?;

    let root = resolve_root(cli.dir.as_deref())?;
    if let Some(timeout_secs) = cli.timeout {
        cancelled.arm_timeout(Duration::from_secs(timeout_secs));
    }
    let filter = ExclusionFilter::new(&cli.exclude, cli.no_defaults);
    let line_numbers = cli.line_numbers_enabled();

    let mut envelope = if !cli.lines.is_empty() {
        run_lines(cli, &root, line_numbers, cancelled)?
    } else if cli.graph {
        run_graph(cli, &root, &filter, cancelled)
    } else if cli.symbols {
        run_symbols(cli, &root, &filter, cancelled)
    } else if cli.stats {
        run_stats(cli, &root, &filter, cancelled)
    } else if cli.find.is_some() && cli.count {
        run_count(cli, &root, &filter, cancelled)?
    } else if cli.find.is_some() {
        run_search(cli, &root, &filter, line_numbers, cancelled)?
    } else if !cli.glob.is_empty() {
        run_glob_only(cli, &root, &filter, cancelled)
    } else {
        run_tree(&root, &filter, cancelled)
    };

    if let Some(limit) = cli.limit {
        apply_limit(&mut envelope, limit);
    }

    envelope.meta.elapsed_ms = start.elapsed().as_millis() as u64;
    if cancelled.is_cancelled() {
        envelope.meta.timeout = true;
    }
    Ok(envelope)
}

fn resolve_root(dir: Option<&Path>) -> Result<PathBuf> {
    let root = match dir {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().map_err(CodemapError::from)?,
    };
    if !root.exists() {
        return Err(CodemapError::RootNotFound(root));
    }
    if !root.is_dir() {
        return Err(CodemapError::RootNotADirectory(root));
    }
    Ok(root)
}

/// Globs for the recognized-source-extensions filter, used whenever a mode
/// other than plain content search has no explicit `--glob`.
fn source_extension_globs() -> Vec<String> {
    SOURCE_EXTENSIONS.iter().map(|ext| format!("*.{ext}")).collect()
}

fn candidate_files_for_source_modes(root: &Path, cli: &Cli, filter: &ExclusionFilter, cancelled: &CancelToken) -> Vec<PathBuf> {
    let globs = if cli.glob.is_empty() { source_extension_globs() } else { cli.glob.clone() };
    scanner::find_files(root, &globs, filter, cancelled)
}

fn run_tree(root: &Path, filter: &ExclusionFilter, cancelled: &CancelToken) -> OutputEnvelope {
    let files_scanned = AtomicU64::new(0);
    let tree = scanner::scan_tree(root, filter, cancelled, &files_scanned);
    OutputEnvelope {
        meta: MetaInfo {
            files_scanned: Some(files_scanned.load(Ordering::Relaxed)),
            ..MetaInfo::default()
        },
        tree,
        ..OutputEnvelope::default()
    }
}

fn run_glob_only(cli: &Cli, root: &Path, filter: &ExclusionFilter, cancelled: &CancelToken) -> OutputEnvelope {
    let mut paths = scanner::find_files(root, &cli.glob, filter, cancelled);
    paths.sort_by(|a, b| a.to_string_lossy().to_lowercase().cmp(&b.to_string_lossy().to_lowercase()));
    let files_scanned = paths.len() as u64;
    let entries: Vec<FileEntry> = paths.iter().map(|path| FileEntry::with_path(pathutil::normalize(root, path))).collect();

    OutputEnvelope {
        meta: MetaInfo {
            files_scanned: Some(files_scanned),
            ..MetaInfo::default()
        },
        files: Some(entries),
        ..OutputEnvelope::default()
    }
}

fn run_search(cli: &Cli, root: &Path, filter: &ExclusionFilter, line_numbers: bool, cancelled: &CancelToken) -> Result<OutputEnvelope> {
    let pattern = cli.find.as_deref().unwrap_or_default();
    let matcher = Matcher::build(pattern, cli.regex)?;
    let globs = if cli.glob.is_empty() { vec!["*".to_string()] } else { cli.glob.clone() };
    let paths = scanner::find_files(root, &globs, filter, cancelled);
    let outcome = search_files(&paths, root, &matcher, cli.pad, line_numbers, cancelled);

    Ok(OutputEnvelope {
        meta: MetaInfo {
            files_scanned: Some(outcome.files_scanned),
            files_matched: Some(outcome.files_matched),
            ..MetaInfo::default()
        },
        files: Some(outcome.entries),
        ..OutputEnvelope::default()
    })
}

fn run_count(cli: &Cli, root: &Path, filter: &ExclusionFilter, cancelled: &CancelToken) -> Result<OutputEnvelope> {
    let pattern = cli.find.as_deref().unwrap_or_default();
    let matcher = Matcher::build(pattern, cli.regex)?;
    let globs = if cli.glob.is_empty() { vec!["*".to_string()] } else { cli.glob.clone() };
    let paths = scanner::find_files(root, &globs, filter, cancelled);
    // `count_files`'s `include_zero` stays false: zero-count files are
    // dropped from the report by default.
    let outcome = count_files(&paths, root, &matcher, false, cancelled);

    Ok(OutputEnvelope {
        meta: MetaInfo {
            files_scanned: Some(outcome.files_scanned),
            files_matched: Some(outcome.files_matched),
            total_matches: Some(outcome.total_matches),
            ..MetaInfo::default()
        },
        counts: Some(outcome.entries),
        ..OutputEnvelope::default()
    })
}

fn run_lines(cli: &Cli, root: &Path, line_numbers: bool, cancelled: &CancelToken) -> Result<OutputEnvelope> {
    let mut specs = Vec::new();
    for group in &cli.lines {
        for raw in group.split_whitespace() {
            specs.push(lines::parse_spec(raw)?);
        }
    }
    let entries = lines::extract(root, &specs, line_numbers, cancelled);
    let files_scanned = entries.len() as u64;

    Ok(OutputEnvelope {
        meta: MetaInfo {
            files_scanned: Some(files_scanned),
            ..MetaInfo::default()
        },
        files: Some(entries),
        ..OutputEnvelope::default()
    })
}

fn run_graph(cli: &Cli, root: &Path, filter: &ExclusionFilter, cancelled: &CancelToken) -> OutputEnvelope {
    let paths = candidate_files_for_source_modes(root, cli, filter, cancelled);
    let entries = graph::build_graph(&paths, root, cancelled);
    let files_scanned = entries.len() as u64;

    OutputEnvelope {
        meta: MetaInfo {
            files_scanned: Some(files_scanned),
            ..MetaInfo::default()
        },
        graph: Some(entries),
        ..OutputEnvelope::default()
    }
}

fn run_symbols(cli: &Cli, root: &Path, filter: &ExclusionFilter, cancelled: &CancelToken) -> OutputEnvelope {
    let paths = candidate_files_for_source_modes(root, cli, filter, cancelled);
    let entries = symbols::extract_symbols(&paths, root, cancelled);
    let files_scanned = paths.len() as u64;

    OutputEnvelope {
        meta: MetaInfo {
            files_scanned: Some(files_scanned),
            ..MetaInfo::default()
        },
        symbols: Some(entries),
        ..OutputEnvelope::default()
    }
}

fn run_stats(cli: &Cli, root: &Path, filter: &ExclusionFilter, cancelled: &CancelToken) -> OutputEnvelope {
    let paths = candidate_files_for_source_modes(root, cli, filter, cancelled);
    let files_scanned = paths.len() as u64;
    let result = stats::aggregate(&paths, root, cancelled);

    OutputEnvelope {
        meta: MetaInfo {
            files_scanned: Some(files_scanned),
            ..MetaInfo::default()
        },
        stats: Some(result),
        ..OutputEnvelope::default()
    }
}

/// Caps the number of file entries in whichever section the active mode
/// populated.
fn apply_limit(envelope: &mut OutputEnvelope, limit: usize) {
    if let Some(files) = &mut envelope.files {
        files.truncate(limit);
    }
    if let Some(counts) = &mut envelope.counts {
        counts.truncate(limit);
    }
    if let Some(symbols) = &mut envelope.symbols {
        symbols.truncate(limit);
    }
    if let Some(graph) = &mut envelope.graph {
        graph.truncate(limit);
    }
}

#[cfg(test)]
#[path = "orchestrate_tests.rs"]
mod tests;

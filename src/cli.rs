//! Command-line surface. A single flag-based `clap::Parser` struct, since
//! every mode here is a mutually exclusive flag rather than a verb.

use std::path::PathBuf;

use clap::Parser;

use crate::error::{CodemapError, Result};
use crate::output::Format;

#[derive(Debug, Parser)]
#[command(name = "codemap", version, about = "Parallel source-tree scanner emitting a structured YAML/JSON envelope")]
pub struct Cli {
    /// Root directory to scan (default: current working directory).
    #[arg(long = "dir", short = 'd')]
    pub dir: Option<PathBuf>,

    /// Glob pattern for the flat-find mode; repeatable.
    #[arg(long = "glob", short = 'g')]
    pub glob: Vec<String>,

    /// Content-search pattern; requires no other mode flag.
    #[arg(long = "find", short = 'f')]
    pub find: Option<String>,

    /// Space-separated `path:start:end` specs; repeatable.
    #[arg(long = "lines")]
    pub lines: Vec<String>,

    /// Emit the project-internal import/dependency graph.
    #[arg(long = "graph")]
    pub graph: bool,

    /// Emit language-level symbol declarations.
    #[arg(long = "symbols", short = 's')]
    pub symbols: bool,

    /// Count matching lines per file instead of rendering chunks; requires `--find`.
    #[arg(long = "count", short = 'c')]
    pub count: bool,

    /// Emit per-extension codebase statistics.
    #[arg(long = "stats", short = 'S')]
    pub stats: bool,

    /// Treat `--find`'s pattern as a regular expression.
    #[arg(long = "regex", short = 'E')]
    pub regex: bool,

    /// Context lines around each search match (default 0).
    #[arg(long = "pad", default_value_t = 0)]
    pub pad: usize,

    /// Set to `off` to suppress `"{n}.  "` line-number prefixes.
    #[arg(long = "line-numbers", default_value = "on")]
    pub line_numbers: String,

    /// Cap the number of file entries in the output.
    #[arg(long = "limit", short = 'L')]
    pub limit: Option<usize>,

    /// Additional directory/file basenames to exclude; repeatable.
    #[arg(long = "exclude")]
    pub exclude: Vec<String>,

    /// Suppress the built-in default exclusion set.
    #[arg(long = "no-defaults")]
    pub no_defaults: bool,

    /// Abort the scan after this many seconds and emit partial results.
    #[arg(long = "timeout")]
    pub timeout: Option<u64>,

    /// Output format.
    #[arg(long = "format", short = 'F', value_enum, default_value_t = CliFormat::Yaml)]
    pub format: CliFormat,

    /// Shorthand for `--format json`.
    #[arg(long = "json")]
    pub json: bool,

    /// Write the envelope to a file instead of stdout.
    #[arg(long = "output", short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    Yaml,
    Json,
}

impl Cli {
    #[must_use]
    pub fn resolved_format(&self) -> Format {
        if self.json || self.format == CliFormat::Json {
            Format::Json
        } else {
            Format::Yaml
        }
    }

    /// Whether `"{n}.  "` line-number prefixes are enabled.
    #[must_use]
    pub fn line_numbers_enabled(&self) -> bool {
        !self.line_numbers.eq_ignore_ascii_case("off")
    }

    /// Validates mutually-exclusive mode combinations beyond the priority
    /// ordering (`--count` without `--find` is a configuration error, not
    /// silently demoted).
    pub fn validate(&self) -> Result<()> {
        if self.count && self.find.is_none() {
            return Err(CodemapError::CountWithoutFind);
        }
        Ok(())
    }
}

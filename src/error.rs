use std::path::PathBuf;

use thiserror::Error;

/// Configuration-level errors: anything that prevents a scan from starting at
/// all. Per-file I/O problems are never represented here; they are captured
/// into `FileEntry.error` and never abort the scan (see `model::FileEntry`).
#[derive(Error, Debug)]
pub enum CodemapError {
    #[error("directory not found: {0}")]
    RootNotFound(PathBuf),

    #[error("{0} is not a directory")]
    RootNotADirectory(PathBuf),

    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("invalid line range spec '{0}': {1}")]
    InvalidLineSpec(String, &'static str),

    #[error("mutually exclusive flags: {0}")]
    ConflictingModes(String),

    #[error("--count requires --find")]
    CountWithoutFind,

    #[error("{}", format_io_error(source, path, operation))]
    Io {
        #[source]
        source: std::io::Error,
        path: Option<PathBuf>,
        operation: Option<&'static str>,
    },
}

#[allow(clippy::ref_option)]
fn format_io_error(
    source: &std::io::Error,
    path: &Option<PathBuf>,
    operation: &Option<&'static str>,
) -> String {
    match (path.as_ref(), *operation) {
        (Some(p), Some(op)) => format!("I/O error ({op} '{}'): {source}", p.display()),
        (Some(p), None) => format!("I/O error ('{}'): {source}", p.display()),
        (None, Some(op)) => format!("I/O error ({op}): {source}"),
        (None, None) => format!("I/O error: {source}"),
    }
}

impl From<std::io::Error> for CodemapError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            path: None,
            operation: None,
        }
    }
}

impl CodemapError {
    #[must_use]
    pub fn io_with_path(source: std::io::Error, path: PathBuf, operation: &'static str) -> Self {
        Self::Io {
            source,
            path: Some(path),
            operation: Some(operation),
        }
    }
}

pub type Result<T> = std::result::Result<T, CodemapError>;

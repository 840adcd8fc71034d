//! Output writer: a single pass over the envelope that serializes it as
//! YAML (bespoke, hand-rolled renderer) or JSON (`serde_json`, reusing
//! `model`'s `camelCase` derives).

mod json;
mod yaml;

use std::io::Write;
use std::path::Path;

use crate::error::{CodemapError, Result};
use crate::model::OutputEnvelope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

/// Renders `envelope` in `format` and writes it either to `output_path` or
/// to stdout when none is given.
pub fn write_envelope(envelope: &OutputEnvelope, format: Format, output_path: Option<&Path>) -> Result<()> {
    let rendered = match format {
        Format::Yaml => yaml::render(envelope),
        Format::Json => json::render(envelope),
    };

    match output_path {
        Some(path) => {
            std::fs::write(path, rendered).map_err(|source| CodemapError::io_with_path(source, path.to_path_buf(), "writing output"))?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(rendered.as_bytes())
                .map_err(CodemapError::from)?;
        }
    }
    Ok(())
}

use std::path::Path;

/// Produces `path` relative to `root` with `/` as the separator,
/// regardless of host path-separator conventions.
#[must_use]
pub fn normalize(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut parts = Vec::new();
    for component in relative.components() {
        if let std::path::Component::Normal(part) = component {
            parts.push(part.to_string_lossy().into_owned());
        }
    }
    parts.join("/")
}

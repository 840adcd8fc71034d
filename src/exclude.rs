use std::collections::HashSet;

use crate::defaults::DEFAULT_EXCLUDED_NAMES;

/// Case-insensitive set of directory/file basenames to prune.
///
/// Constructed once per invocation and shared read-only across the parallel
/// walk.
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    names: HashSet<String>,
}

impl ExclusionFilter {
    #[must_use]
    pub fn new(additions: &[String], suppress_defaults: bool) -> Self {
        let mut names: HashSet<String> = HashSet::new();
        if !suppress_defaults {
            names.extend(DEFAULT_EXCLUDED_NAMES.iter().map(|s| s.to_lowercase()));
        }
        names.extend(additions.iter().map(|s| s.to_lowercase()));
        Self { names }
    }

    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self::new(&[], false)
    }
}

//! Matcher variants: literal, multi-term, and regex, selected by the
//! orchestrator from the raw `--find` pattern and the `--regex` flag.

use regex::Regex;

use crate::error::{CodemapError, Result};

pub enum Matcher {
    Literal(String),
    MultiTerm(Vec<String>),
    Regex(Regex),
}

impl Matcher {
    /// Builds a matcher from the raw CLI pattern. A pattern containing `|`
    /// is treated as multi-term unless `use_regex` is set, in which case it
    /// compiles as a single case-insensitive regex.
    pub fn build(pattern: &str, use_regex: bool) -> Result<Self> {
        if use_regex {
            let regex = Regex::new(&format!("(?i){pattern}")).map_err(CodemapError::InvalidRegex)?;
            return Ok(Self::Regex(regex));
        }
        if pattern.contains('|') {
            let terms = pattern
                .split('|')
                .map(|term| term.trim().to_lowercase())
                .filter(|term| !term.is_empty())
                .collect::<Vec<_>>();
            if terms.len() > 1 {
                return Ok(Self::MultiTerm(terms));
            }
        }
        Ok(Self::Literal(pattern.to_lowercase()))
    }

    #[must_use]
    pub fn is_match(&self, line: &str) -> bool {
        match self {
            Self::Literal(needle) => line.to_lowercase().contains(needle.as_str()),
            Self::MultiTerm(terms) => {
                let lowered = line.to_lowercase();
                terms.iter().any(|term| lowered.contains(term.as_str()))
            }
            Self::Regex(regex) => regex.is_match(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_is_case_insensitive_substring() {
        let matcher = Matcher::build("TODO", false).unwrap();
        assert!(matcher.is_match("// todo: fix"));
        assert!(!matcher.is_match("// done"));
    }

    #[test]
    fn multi_term_splits_on_pipe_and_trims() {
        let matcher = Matcher::build("TODO | FIXME", false).unwrap();
        assert!(matcher.is_match("// fixme later"));
        assert!(matcher.is_match("// TODO later"));
        assert!(!matcher.is_match("// done"));
    }

    #[test]
    fn regex_flag_forces_regex_even_with_pipe() {
        let matcher = Matcher::build("foo|bar", true).unwrap();
        assert!(matcher.is_match("a foo b"));
        assert!(matcher.is_match("a BAR b"));
    }

    #[test]
    fn invalid_regex_is_a_user_error() {
        let err = Matcher::build("(unclosed", true).unwrap_err();
        assert!(matches!(err, CodemapError::InvalidRegex(_)));
    }
}

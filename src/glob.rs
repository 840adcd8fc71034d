//! Single-component, case-insensitive glob matching.
//!
//! Deliberately not `globset` or `ignore`'s globbing: those match across path
//! separators, and matching here is single-component only (`*` never
//! crosses `/`).

#[must_use]
pub fn matches(name: &str, pattern: &str) -> bool {
    let name: Vec<char> = name.to_lowercase().chars().collect();
    let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
    matches_impl(&name, &pattern)
}

#[must_use]
pub fn matches_any(name: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|p| matches(name, p))
}

fn matches_impl(name: &[char], pattern: &[char]) -> bool {
    // Classic two-pointer glob match with backtracking on `*`.
    let (mut ni, mut pi) = (0usize, 0usize);
    let (mut star_pi, mut star_ni) = (None, 0usize);

    while ni < name.len() {
        if pi < pattern.len() && (pattern[pi] == '?' || pattern[pi] == name[ni]) {
            ni += 1;
            pi += 1;
        } else if pi < pattern.len() && pattern[pi] == '*' {
            star_pi = Some(pi);
            star_ni = ni;
            pi += 1;
        } else if let Some(sp) = star_pi {
            pi = sp + 1;
            star_ni += 1;
            ni = star_ni;
        } else {
            return false;
        }
    }
    while pi < pattern.len() && pattern[pi] == '*' {
        pi += 1;
    }
    pi == pattern.len()
}

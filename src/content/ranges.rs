//! Context-window merging. Ranges are 0-based inclusive line indices
//! throughout this module; callers convert to 1-based `startLine`/`endLine`
//! when building `FileChunk`s.

/// Merges a set of already-formed intervals into the minimal disjoint,
/// non-adjacent set: an interval merges into the previous one whenever its
/// start is `<= previous.end + 1`. Assumes nothing about input order.
#[must_use]
pub fn merge_intervals(mut intervals: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    intervals.sort_unstable();
    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 + 1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }
    merged
}

/// Expands each match line index into a `[i-pad, i+pad]` window clamped to
/// `[0, line_count-1]`, then merges the windows.
#[must_use]
pub fn windows_around_matches(
    mut indices: Vec<usize>,
    pad: usize,
    line_count: usize,
) -> Vec<(usize, usize)> {
    indices.sort_unstable();
    indices.dedup();
    let last_line = line_count.saturating_sub(1);
    let intervals = indices
        .into_iter()
        .map(|i| (i.saturating_sub(pad), (i + pad).min(last_line)))
        .collect();
    merge_intervals(intervals)
}

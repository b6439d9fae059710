//! Letters-only, case-insensitive edit distance.
//!
//! Both inputs are lowercased and stripped of everything outside `a..=z`
//! before comparison, so `"rust-lang"` and `"Rust Lang"` compare equal. The
//! degenerate fallbacks when a side normalizes to empty are deliberately
//! asymmetric (see [`distance`]) and are part of the documented contract.

/// Minimum number of single-char insertions, deletions, or substitutions to
/// turn `a` into `b`, after normalization.
///
/// Returns `None` when either raw input is empty: the distance is not
/// computable and callers must check before doing arithmetic with it.
///
/// Degenerate fallbacks, preserved exactly as the scoring pipeline has always
/// behaved: when `a` normalizes to empty the result is `Some(0)` (the
/// normalized length of `a`); when only `b` normalizes to empty the result is
/// the *raw* char length of `b`. The two sides are intentionally not
/// symmetric in these cases.
#[must_use]
pub fn distance(a: &str, b: &str) -> Option<usize> {
    if a.is_empty() || b.is_empty() {
        return None;
    }

    let s = normalize(a);
    let t = normalize(b);

    if s.is_empty() {
        return Some(0);
    }
    if t.is_empty() {
        return Some(b.chars().count());
    }

    // Full DP table; inputs here are autocomplete labels, not documents.
    let mut table = vec![vec![0usize; s.len() + 1]; t.len() + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=s.len() {
        table[0][j] = j;
    }
    for i in 1..=t.len() {
        for j in 1..=s.len() {
            let cost = usize::from(t[i - 1] != s[j - 1]);
            table[i][j] = (table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1)
                .min(table[i - 1][j - 1] + cost);
        }
    }

    Some(table[t.len()][s.len()])
}

fn normalize(input: &str) -> Vec<char> {
    input
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_lowercase)
        .collect()
}

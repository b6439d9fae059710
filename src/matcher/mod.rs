//! Approximate substring location.
//!
//! [`Matcher::locate`] finds the best position where a pattern occurs in a
//! text near an expected anchor, tolerating errors. The fuzzy path is the
//! Bitap algorithm: a bit-parallel dynamic program over increasing error
//! budgets, with a distance-weighted score deciding which candidate position
//! wins and a per-error-level binary search bounding how far from the anchor
//! the scan needs to look.
//!
//! All offsets are char offsets, not byte offsets. The pattern must fit in
//! the 32-bit match word (one bit per char).

mod alphabet;

use alphabet::alphabet;
use tracing::trace;

use crate::config::MatchConfig;
use crate::error::{Error, Result};

/// Approximate matcher configured with a score threshold and distance factor.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    threshold: f64,
    distance: u32,
    max_pattern_bits: usize,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

impl Matcher {
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self {
            threshold: config.threshold,
            distance: config.distance,
            max_pattern_bits: config.max_pattern_bits,
        }
    }

    /// Locate the best instance of `pattern` in `text` near char offset `loc`.
    ///
    /// Returns `Ok(None)` when no position scores within the threshold. An
    /// empty pattern matches universally and returns the (clamped) anchor.
    ///
    /// # Errors
    ///
    /// [`Error::PatternTooLong`] when the pattern needs more bits than the
    /// match word has and none of the exact-match shortcuts applied.
    pub fn locate(&self, text: &str, pattern: &str, loc: usize) -> Result<Option<usize>> {
        let text: Vec<char> = text.chars().collect();
        let pattern: Vec<char> = pattern.chars().collect();
        let loc = loc.min(text.len());

        if text == pattern {
            // Shortcut (potentially not guaranteed by the algorithm).
            return Ok(Some(0));
        }
        if text.is_empty() {
            // Nothing to match.
            return Ok(None);
        }
        if text.len() - loc >= pattern.len() && text[loc..loc + pattern.len()] == pattern[..] {
            // Perfect match at the perfect spot (includes the empty pattern).
            return Ok(Some(loc));
        }
        self.bitap(&text, &pattern, loc)
    }

    /// Bit-parallel fuzzy scan around `loc`.
    fn bitap(&self, text: &[char], pattern: &[char], loc: usize) -> Result<Option<usize>> {
        if pattern.len() > self.max_pattern_bits {
            return Err(Error::PatternTooLong {
                len: pattern.len(),
                max: self.max_pattern_bits,
            });
        }

        let table = alphabet(pattern);

        // Score for a match with `errors` errors at char offset `x`; lower is
        // better, and anything above the running threshold is rejected.
        let score = |errors: usize, x: usize| -> f64 {
            let accuracy = errors as f64 / pattern.len() as f64;
            let proximity = loc.abs_diff(x);
            if self.distance == 0 {
                // Zero distance factor: only the exact anchor is tolerable.
                return if proximity == 0 { accuracy } else { 1.0 };
            }
            accuracy + proximity as f64 / f64::from(self.distance)
        };

        // Seed the acceptance threshold from any exact occurrence near the
        // anchor, in both directions. This only tightens pruning; the
        // seeded location still has to be rediscovered by the scan to win.
        let mut score_threshold = self.threshold;
        if let Some(exact) = index_of(text, pattern, loc) {
            score_threshold = score(0, exact).min(score_threshold);
            if let Some(exact) = last_index_of(text, pattern, loc + pattern.len()) {
                score_threshold = score(0, exact).min(score_threshold);
            }
        }

        let match_mask: u32 = 1 << (pattern.len() - 1);
        let mut best_loc: Option<usize> = None;

        let mut bin_max = pattern.len() + text.len();
        let mut last_rd: Vec<u32> = Vec::new();
        for d in 0..pattern.len() {
            // How far from `loc` can a match with d errors still score within
            // the threshold? Binary search; this bounds the window scanned at
            // this error level, it never excludes a viable position.
            let mut bin_min = 0;
            let mut bin_mid = bin_max;
            while bin_min < bin_mid {
                if score(d, loc + bin_mid) <= score_threshold {
                    bin_min = bin_mid;
                } else {
                    bin_max = bin_mid;
                }
                bin_mid = (bin_max - bin_min) / 2 + bin_min;
            }
            // Use the result from this iteration as the maximum for the next.
            bin_max = bin_mid;
            let mut start = (loc.saturating_sub(bin_mid) + 1).max(1);
            let finish = (loc + bin_mid).min(text.len()) + pattern.len();

            let mut rd = vec![0u32; finish + 2];
            rd[finish + 1] = (1 << d) - 1;
            let mut j = finish;
            while j >= start {
                let char_match = if j <= text.len() {
                    table.get(&text[j - 1]).copied().unwrap_or(0)
                } else {
                    // Out of range; no character to match.
                    0
                };
                rd[j] = if d == 0 {
                    // First pass: exact match.
                    ((rd[j + 1] << 1) | 1) & char_match
                } else {
                    // Subsequent passes: fuzzy match.
                    (((rd[j + 1] << 1) | 1) & char_match)
                        | (((prev(&last_rd, j + 1) | prev(&last_rd, j)) << 1) | 1)
                        | prev(&last_rd, j + 1)
                };
                if rd[j] & match_mask != 0 {
                    let candidate = score(d, j - 1);
                    // This match will almost certainly be better than any
                    // existing match. But check anyway. Ties go to the first
                    // discovery: once a best location exists, a later find
                    // must be strictly better to replace it.
                    let accept = if best_loc.is_none() {
                        candidate <= score_threshold
                    } else {
                        candidate < score_threshold
                    };
                    if accept {
                        score_threshold = candidate;
                        best_loc = Some(j - 1);
                        trace!(d, loc = j - 1, score = candidate, "bitap candidate");
                        if j - 1 > loc {
                            // When passing loc, don't exceed our current
                            // distance from loc.
                            start = (2 * loc).saturating_sub(j - 1).max(1);
                        } else {
                            // Already passed loc; later positions only score
                            // worse at this error level.
                            break;
                        }
                    }
                }
                j -= 1;
            }
            // No hope for a (better) match at greater error levels.
            if score(d + 1, loc) > score_threshold {
                break;
            }
            last_rd = rd;
        }
        Ok(best_loc)
    }
}

/// Read from the previous error level's bit-vector, treating out-of-range
/// positions as all-zero.
#[inline]
fn prev(last_rd: &[u32], j: usize) -> u32 {
    last_rd.get(j).copied().unwrap_or(0)
}

/// First occurrence of `pattern` in `text` at char offset >= `from`.
fn index_of(text: &[char], pattern: &[char], from: usize) -> Option<usize> {
    if pattern.is_empty() {
        return Some(from.min(text.len()));
    }
    if pattern.len() > text.len() {
        return None;
    }
    (from.min(text.len())..=text.len() - pattern.len())
        .find(|&i| text[i..i + pattern.len()] == pattern[..])
}

/// Last occurrence of `pattern` in `text` starting at char offset <= `from`.
fn last_index_of(text: &[char], pattern: &[char], from: usize) -> Option<usize> {
    if pattern.is_empty() {
        return Some(from.min(text.len()));
    }
    if pattern.len() > text.len() {
        return None;
    }
    (0..=from.min(text.len() - pattern.len()))
        .rev()
        .find(|&i| text[i..i + pattern.len()] == pattern[..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(threshold: f64, distance: u32) -> Matcher {
        Matcher::new(MatchConfig {
            threshold,
            distance,
            max_pattern_bits: 32,
        })
    }

    #[test]
    fn identical_text_and_pattern_match_at_zero() {
        let m = Matcher::default();
        assert_eq!(m.locate("abcdef", "abcdef", 1000).unwrap(), Some(0));
    }

    #[test]
    fn empty_text_never_matches() {
        let m = Matcher::default();
        assert_eq!(m.locate("", "abcdef", 1).unwrap(), None);
    }

    #[test]
    fn empty_pattern_matches_at_the_anchor() {
        let m = Matcher::default();
        assert_eq!(m.locate("abcdef", "", 3).unwrap(), Some(3));
        // Anchor clamps into the text.
        assert_eq!(m.locate("abcdef", "", 100).unwrap(), Some(6));
    }

    #[test]
    fn exact_substring_at_the_anchor_wins() {
        let m = Matcher::default();
        assert_eq!(m.locate("abcdef", "de", 3).unwrap(), Some(3));
    }

    #[test]
    fn fuzzy_match_with_one_error() {
        // "defy" against "abcdef": one trailing error, anchored at 4.
        let m = matcher(0.5, 100);
        assert_eq!(m.locate("abcdef", "defy", 4).unwrap(), Some(3));
    }

    #[test]
    fn no_plausible_alignment_within_default_threshold() {
        let m = Matcher::default();
        assert_eq!(m.locate("abcdefg", "xyz", 0).unwrap(), None);
    }

    #[test]
    fn distant_occurrence_rejected_when_distance_factor_is_tight() {
        // Exact occurrence exists at 20, but 20 chars from the anchor at
        // distance factor 10 adds 2.0 to the score.
        let m = matcher(0.3, 10);
        let text = "xxxxxxxxxxxxxxxxxxxxneedle";
        assert_eq!(m.locate(text, "needle", 0).unwrap(), None);
    }

    #[test]
    fn distant_occurrence_accepted_with_a_loose_distance_factor() {
        let m = matcher(0.3, 1000);
        let text = "xxxxxxxxxxxxxxxxxxxxneedle";
        assert_eq!(m.locate(text, "needle", 0).unwrap(), Some(20));
    }

    #[test]
    fn zero_distance_factor_requires_the_exact_anchor() {
        let m = matcher(0.5, 0);
        // Exact occurrence at the anchor: fast path, fine.
        assert_eq!(m.locate("abcdef", "cde", 2).unwrap(), Some(2));
        // Off-anchor occurrences score 1.0 and get rejected.
        assert_eq!(m.locate("abcdef", "cde", 5).unwrap(), None);
    }

    #[test]
    fn oversized_pattern_is_a_hard_error() {
        let m = Matcher::default();
        let pattern: String = std::iter::repeat_n('a', 33).collect();
        let err = m.locate("some unrelated text", &pattern, 0).unwrap_err();
        assert!(matches!(err, Error::PatternTooLong { len: 33, max: 32 }));
    }

    #[test]
    fn full_width_pattern_is_still_accepted() {
        let m = matcher(0.5, 1000);
        let pattern: String = ('a'..='z').chain('0'..='5').collect();
        assert_eq!(pattern.chars().count(), 32);
        let text = format!("prefix {pattern} suffix");
        assert_eq!(m.locate(&text, &pattern, 0).unwrap(), Some(7));
    }

    #[test]
    fn equal_score_occurrences_keep_the_first_discovery() {
        // Occurrences at 4 and 10; anchored at 7 both are 3 away. The scan
        // runs from the far edge of the window backwards, so offset 10 is
        // discovered first and the equal-scoring offset 4 must not replace it.
        let m = matcher(0.5, 100);
        assert_eq!(m.locate("xxxxababxxabab", "abab", 7).unwrap(), Some(10));
    }

    #[test]
    fn multibyte_text_uses_char_offsets() {
        let m = matcher(0.5, 100);
        assert_eq!(m.locate("héllo wörld", "wörld", 6).unwrap(), Some(6));
    }

    #[test]
    fn index_of_helpers_mirror_substring_search() {
        let text: Vec<char> = "abcabc".chars().collect();
        let pat: Vec<char> = "abc".chars().collect();
        assert_eq!(index_of(&text, &pat, 0), Some(0));
        assert_eq!(index_of(&text, &pat, 1), Some(3));
        assert_eq!(index_of(&text, &pat, 4), None);
        assert_eq!(last_index_of(&text, &pat, 6), Some(3));
        assert_eq!(last_index_of(&text, &pat, 2), Some(0));
    }
}

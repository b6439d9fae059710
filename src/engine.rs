//! Per-candidate evaluation: locate, score, highlight, rank.
//!
//! [`QueryEngine::evaluate`] drives the whole pipeline for one candidate
//! list: the approximate matcher runs against each lowercased candidate name,
//! non-matches are skipped, and survivors get a composite `match_score` of
//! edit distance plus match location (lower is better). The score mixes two
//! unrelated units on purpose; it is only meaningful within a single query
//! execution and must never be compared across queries.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::MatchConfig;
use crate::distance::distance;
use crate::error::Result;
use crate::matcher::Matcher;

/// Hard cap on matches accumulated per list. Autocomplete results are an aid
/// while the user narrows in on a target; an exhaustive search past this
/// point only adds latency.
pub const MATCH_CAP: usize = 100;

/// A candidate label plus whatever extra fields the caller's records carry.
/// Extra fields are opaque JSON and pass through evaluation untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Candidate {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }
}

/// A candidate annotated with its rank signal for one query execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub name: String,
    /// Name with `<strong>` markup around chars that occur in the query.
    pub highlighted: String,
    /// Edit distance + match location; lower is better, single-query scope.
    pub match_score: usize,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Ranks a candidate list against a typed query.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryEngine {
    matcher: Matcher,
}

impl QueryEngine {
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self {
            matcher: Matcher::new(config),
        }
    }

    /// Evaluate `candidates` against `query`, ascending by `match_score`.
    ///
    /// Returns `Ok(None)` for an empty query: an empty query is an expected
    /// state (the user has not typed yet), not a trivial match-everything.
    /// At most [`MATCH_CAP`] candidates are returned; evaluation stops as
    /// soon as the cap is reached.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::Error::PatternTooLong`] when the query exceeds the
    /// matcher's word width.
    pub fn evaluate(
        &self,
        candidates: &[Candidate],
        query: &str,
    ) -> Result<Option<Vec<ScoredCandidate>>> {
        if query.is_empty() {
            return Ok(None);
        }

        let mut matches = Vec::new();
        for candidate in candidates {
            let lowered = candidate.name.to_lowercase();
            let Some(location) = self.matcher.locate(&lowered, query, 0)? else {
                continue;
            };
            // The edit distance runs on the raw name; a name with no letters
            // at all is not scorable and contributes nothing.
            let dist = distance(&candidate.name, query).unwrap_or(0);
            matches.push(ScoredCandidate {
                name: candidate.name.clone(),
                highlighted: highlight(&candidate.name, query),
                match_score: dist + location,
                extra: candidate.extra.clone(),
            });
            if matches.len() >= MATCH_CAP {
                break;
            }
        }

        debug!(
            query,
            candidates = candidates.len(),
            matched = matches.len(),
            "evaluated candidate list"
        );

        matches.sort_unstable_by_key(|m| m.match_score);
        Ok(Some(matches))
    }
}

/// Wrap every char of `name` that occurs anywhere in `query`
/// (case-insensitively) in `<strong>` markup. Presentation aid only;
/// independent of where the match was located.
#[must_use]
pub fn highlight(name: &str, query: &str) -> String {
    let query_chars: HashSet<char> = query.to_lowercase().chars().collect();
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        let hit = !query_chars.is_empty() && ch.to_lowercase().all(|lc| query_chars.contains(&lc));
        if hit {
            out.push_str("<strong>");
            out.push(ch);
            out.push_str("</strong>");
        } else {
            out.push(ch);
        }
    }
    out
}

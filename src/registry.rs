//! Named candidate lists and the query surface over them.
//!
//! The registry owns the candidate data; the engine only ever reads it.
//! Every list carries its own LRU memo of recent query results keyed by the
//! verbatim query string (query case affects matching, so no folding).
//! Replacing or removing a list drops its memo with it — that is the whole
//! invalidation story, since results never outlive the list they came from.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use crate::config::MatchConfig;
use crate::engine::{Candidate, QueryEngine, ScoredCandidate};
use crate::error::Result;

/// Reserved meta-list name selecting every registered list.
pub const META_LIST_ALL: &str = "all";

/// Memoized queries kept per list. Interactive use rarely has more than a
/// few dozen distinct prefixes in flight.
const MEMO_CAPACITY: NonZeroUsize = NonZeroUsize::new(64).unwrap();

/// Which lists a query runs against.
#[derive(Debug, Clone, Copy)]
pub enum ListSelector<'a> {
    /// Every registered list (the "all" meta-list).
    All,
    One(&'a str),
    Many(&'a [&'a str]),
}

#[derive(Debug)]
struct CandidateList {
    data: Vec<Candidate>,
    memo: Mutex<LruCache<String, Vec<ScoredCandidate>>>,
}

impl CandidateList {
    fn new(data: Vec<Candidate>) -> Self {
        Self {
            data,
            memo: Mutex::new(LruCache::new(MEMO_CAPACITY)),
        }
    }
}

/// Registry of named candidate lists sharing one matcher configuration.
#[derive(Debug)]
pub struct ListRegistry {
    engine: QueryEngine,
    lists: HashMap<String, CandidateList>,
}

impl ListRegistry {
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self {
            engine: QueryEngine::new(config),
            lists: HashMap::new(),
        }
    }

    /// Register a list, replacing any previous list of the same name (and
    /// dropping its memoized results). Returns `false` without registering
    /// when `name` is the reserved meta-list name.
    pub fn add_list(&mut self, name: &str, data: Vec<Candidate>) -> bool {
        if name == META_LIST_ALL {
            return false;
        }
        debug!(list = name, candidates = data.len(), "registering list");
        self.lists.insert(name.to_owned(), CandidateList::new(data));
        true
    }

    /// Remove a list and its memoized results. Returns whether it existed.
    pub fn remove_list(&mut self, name: &str) -> bool {
        self.lists.remove(name).is_some()
    }

    /// Registered list names, sorted for stable output.
    #[must_use]
    pub fn list_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.lists.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Candidates of one list, if registered.
    #[must_use]
    pub fn candidates(&self, name: &str) -> Option<&[Candidate]> {
        self.lists.get(name).map(|list| list.data.as_slice())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Run `query` against the selected lists.
    ///
    /// Returns `Ok(None)` when the query is empty or any selected list is
    /// not registered — both are expected states signaled as sentinels, not
    /// errors. Each list is evaluated independently (each with its own
    /// 100-match cap); results are concatenated in selection order and
    /// re-sorted by `match_score` only when more than one list was selected.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::Error::PatternTooLong`] from the matcher.
    pub fn query(
        &self,
        selector: ListSelector<'_>,
        query: &str,
    ) -> Result<Option<Vec<ScoredCandidate>>> {
        if query.is_empty() {
            // No query, no matches.
            return Ok(None);
        }

        let names: Vec<&str> = match selector {
            ListSelector::All => self.list_names(),
            ListSelector::One(name) => vec![name],
            ListSelector::Many(names) => names.to_vec(),
        };

        // Check every selected list up front; partial results for a
        // half-valid selection would be misleading.
        if names.iter().any(|name| !self.lists.contains_key(*name)) {
            return Ok(None);
        }

        let mut combined = Vec::new();
        for name in &names {
            combined.extend(self.query_list(name, query)?);
        }

        if names.len() > 1 {
            combined.sort_unstable_by_key(|m| m.match_score);
        }
        Ok(Some(combined))
    }

    fn query_list(&self, name: &str, query: &str) -> Result<Vec<ScoredCandidate>> {
        let list = &self.lists[name];

        if let Some(hit) = list.memo.lock().get(query) {
            debug!(list = name, query, "memoized result");
            return Ok(hit.clone());
        }

        let matches = self
            .engine
            .evaluate(&list.data, query)?
            .unwrap_or_default();
        list.memo.lock().put(query.to_owned(), matches.clone());
        Ok(matches)
    }
}

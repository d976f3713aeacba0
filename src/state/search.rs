//! Search state machine.
//!
//! SearchPhase is derived from the state and takes one of four values:
//! - Idle: No search issued yet this session
//! - Searching: A request is in flight
//! - ResultsNonEmpty: The latest search returned at least one card
//! - ResultsEmpty: The latest search returned no cards (or failed)

use crate::model::{ClientError, GameId};
use crate::state::command::{ApplyOutcome, SearchPayload, SearchRequest};
use crate::state::epoch::{EpochCounter, RequestEpoch};
use crate::state::selection::ResultSet;
use tracing::{debug, info, warn};

/// Upper bound on cards requested per search.
pub const MAX_SEARCH_LIMIT: usize = 50;

// ===== SearchQuery =====

/// Validated search query. Never empty or whitespace-only.
/// Smart constructor enforces the invariant; the text is kept as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Smart constructor: validates query is non-empty.
    /// Returns None if query is empty or whitespace-only.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let s = raw.into();
        if s.trim().is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// ===== SearchPhase =====

/// Display-relevant phase of the search flow.
///
/// `Idle → Searching → {ResultsNonEmpty, ResultsEmpty}`. Searching can be
/// re-entered from either results phase; Idle is never re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Searching,
    ResultsNonEmpty,
    ResultsEmpty,
}

// ===== SearchState =====

/// Current result set plus the sequencing of full searches.
#[derive(Debug, Clone)]
pub struct SearchState {
    results: ResultSet,
    loading: bool,
    has_searched: bool,
    epoch: EpochCounter,
    limit: usize,
    total: Option<u64>,
    active_query: Option<SearchQuery>,
    last_error: Option<ClientError>,
}

impl SearchState {
    /// Create idle state. `limit` is clamped to `1..=MAX_SEARCH_LIMIT`.
    pub fn new(limit: usize) -> Self {
        Self {
            results: ResultSet::empty(),
            loading: false,
            has_searched: false,
            epoch: EpochCounter::new(),
            limit: limit.clamp(1, MAX_SEARCH_LIMIT),
            total: None,
            active_query: None,
            last_error: None,
        }
    }

    /// Start a search for `query`.
    ///
    /// Returns None (and changes nothing) for empty or whitespace-only
    /// queries. Otherwise enters Searching: the previous results and
    /// selection are cleared before any response can arrive, and the
    /// search epoch advances so older responses become stale.
    pub fn begin(&mut self, query: &str, game: Option<&GameId>) -> Option<SearchRequest> {
        let query = SearchQuery::new(query)?;

        self.loading = true;
        self.has_searched = true;
        self.results.clear();
        self.total = None;
        self.last_error = None;

        let epoch = self.epoch.advance();
        info!(%epoch, query = query.as_str(), game = ?game.map(GameId::as_str), "Search started");

        let request = SearchRequest {
            epoch,
            query: query.as_str().to_string(),
            limit: self.limit,
            game: game.cloned(),
        };
        self.active_query = Some(query);
        Some(request)
    }

    /// Apply a response captured at `epoch`.
    pub fn apply(
        &mut self,
        epoch: RequestEpoch,
        outcome: Result<SearchPayload, ClientError>,
    ) -> ApplyOutcome {
        if !self.epoch.is_current(epoch) {
            debug!(%epoch, current = %self.epoch.current(), "Discarding stale search response");
            return ApplyOutcome::Stale;
        }

        self.loading = false;
        match outcome {
            Ok(payload) => {
                info!(%epoch, cards = payload.cards.len(), total = ?payload.total, "Search completed");
                self.total = payload.total;
                self.results = ResultSet::new(payload.cards);
                ApplyOutcome::Accepted
            }
            Err(err) => {
                warn!(%epoch, kind = err.kind(), error = %err, "Search request failed");
                self.last_error = Some(err);
                ApplyOutcome::Failed
            }
        }
    }

    pub fn phase(&self) -> SearchPhase {
        if !self.has_searched {
            SearchPhase::Idle
        } else if self.loading {
            SearchPhase::Searching
        } else if self.results.is_empty() {
            SearchPhase::ResultsEmpty
        } else {
            SearchPhase::ResultsNonEmpty
        }
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut ResultSet {
        &mut self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    /// Server-reported match count of the latest accepted search.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Query of the most recently issued search.
    pub fn active_query(&self) -> Option<&SearchQuery> {
        self.active_query.as_ref()
    }

    /// Failure of the most recent search, cleared when the next one starts.
    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    pub fn epoch(&self) -> RequestEpoch {
        self.epoch.current()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(MAX_SEARCH_LIMIT)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;

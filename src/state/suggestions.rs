//! Autocomplete suggestion state.
//!
//! Query text changes produce at most one [`SuggestionRequest`]. Responses
//! are fenced by [`EpochCounter`]: only the most recently issued request may
//! replace the visible list.

use crate::model::{ClientError, GameId};
use crate::state::command::{ApplyOutcome, SuggestionRequest};
use crate::state::epoch::{EpochCounter, RequestEpoch};
use tracing::{debug, warn};

/// Upper bound on suggestions requested per keystroke.
pub const MAX_SUGGESTION_LIMIT: usize = 10;

/// Suggestion list plus its request sequencing.
#[derive(Debug, Clone)]
pub struct SuggestionState {
    items: Vec<String>,
    visible: bool,
    epoch: EpochCounter,
    limit: usize,
}

impl SuggestionState {
    /// Create empty state. `limit` is clamped to `1..=MAX_SUGGESTION_LIMIT`.
    pub fn new(limit: usize) -> Self {
        Self {
            items: Vec::new(),
            visible: false,
            epoch: EpochCounter::new(),
            limit: limit.clamp(1, MAX_SUGGESTION_LIMIT),
        }
    }

    /// React to new query text.
    ///
    /// Empty text clears and hides the list and fences every in-flight
    /// request, so a late response cannot repopulate it. Non-empty text
    /// advances the epoch and returns the request to issue.
    pub fn on_query_changed(
        &mut self,
        text: &str,
        game: Option<&GameId>,
    ) -> Option<SuggestionRequest> {
        if text.is_empty() {
            self.epoch.advance();
            self.items.clear();
            self.visible = false;
            return None;
        }

        let epoch = self.epoch.advance();
        Some(SuggestionRequest {
            epoch,
            query: text.to_string(),
            limit: self.limit,
            game: game.cloned(),
        })
    }

    /// Apply a response captured at `epoch`.
    ///
    /// Stale responses are dropped silently. Transport failures are logged
    /// and leave the previous list untouched; a malformed reply empties it.
    pub fn apply(
        &mut self,
        epoch: RequestEpoch,
        outcome: Result<Vec<String>, ClientError>,
    ) -> ApplyOutcome {
        if !self.epoch.is_current(epoch) {
            debug!(%epoch, current = %self.epoch.current(), "Discarding stale suggestions");
            return ApplyOutcome::Stale;
        }

        match outcome {
            Ok(items) => {
                debug!(%epoch, count = items.len(), "Suggestions updated");
                self.items = items;
                self.visible = true;
                ApplyOutcome::Accepted
            }
            Err(err) => {
                warn!(%epoch, kind = err.kind(), error = %err, "Autocomplete request failed");
                // An unreadable reply for the current query means no suggestions
                if err.is_malformed() {
                    self.items.clear();
                }
                ApplyOutcome::Failed
            }
        }
    }

    /// Hide the list and fence in-flight requests.
    ///
    /// Items are kept; the next accepted response replaces them.
    pub fn hide(&mut self) {
        self.visible = false;
        self.epoch.advance();
    }

    /// True when there is something to show.
    pub fn is_visible(&self) -> bool {
        self.visible && !self.items.is_empty()
    }

    /// The list as last accepted, regardless of visibility.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// The list to display: empty while hidden.
    pub fn visible_items(&self) -> &[String] {
        if self.visible {
            &self.items
        } else {
            &[]
        }
    }

    pub fn epoch(&self) -> RequestEpoch {
        self.epoch.current()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for SuggestionState {
    fn default() -> Self {
        Self::new(MAX_SUGGESTION_LIMIT)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "suggestions_tests.rs"]
mod tests;

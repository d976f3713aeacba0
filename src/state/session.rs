//! The client session: one mutable value composing every controller.
//!
//! All user intents and API events funnel through [`Session`]. Methods that
//! need the network return a [`Command`] for the shell to execute; they never
//! perform I/O themselves.

use crate::model::{Card, ClientError, GameId};
use crate::state::command::{ApiEvent, ApplyOutcome, Command};
use crate::state::games::GamesCatalog;
use crate::state::search::{SearchPhase, SearchState, MAX_SEARCH_LIMIT};
use crate::state::selection::ResultSet;
use crate::state::suggestions::{SuggestionState, MAX_SUGGESTION_LIMIT};
use tracing::debug;

/// Construction parameters for a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub suggestion_limit: usize,
    pub search_limit: usize,
    /// Game filter in effect when the session starts.
    pub initial_game: Option<GameId>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            suggestion_limit: MAX_SUGGESTION_LIMIT,
            search_limit: MAX_SEARCH_LIMIT,
            initial_game: None,
        }
    }
}

/// Query text, game filter, suggestions, results and selection.
#[derive(Debug, Clone)]
pub struct Session {
    query: String,
    game_filter: Option<GameId>,
    games: GamesCatalog,
    suggestions: SuggestionState,
    search: SearchState,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            query: String::new(),
            game_filter: config.initial_game,
            games: GamesCatalog::new(),
            suggestions: SuggestionState::new(config.suggestion_limit),
            search: SearchState::new(config.search_limit),
        }
    }

    /// Commands to run once when the session starts.
    pub fn start(&self) -> Vec<Command> {
        vec![Command::LoadGames]
    }

    // ===== Query and suggestions =====

    /// Replace the query text.
    ///
    /// The query updates immediately. Non-empty text yields an autocomplete
    /// command; empty text clears the suggestion list synchronously.
    pub fn on_query_changed(&mut self, text: impl Into<String>) -> Option<Command> {
        self.query = text.into();
        self.suggestions
            .on_query_changed(&self.query, self.game_filter.as_ref())
            .map(Command::Suggest)
    }

    /// Accept a suggestion: it becomes the query and is searched at once.
    pub fn select_suggestion(&mut self, suggestion: &str) -> Option<Command> {
        debug!(suggestion, "Suggestion selected");
        self.search_for(suggestion)
    }

    /// Set the query to `text` and search for it without autocompleting.
    ///
    /// Empty text behaves like clearing the query: suggestions are emptied
    /// and nothing is searched.
    pub fn search_for(&mut self, text: &str) -> Option<Command> {
        if text.is_empty() {
            return self.on_query_changed(text);
        }
        self.query = text.to_string();
        self.suggestions.hide();
        self.submit(None)
    }

    /// Hide the suggestion list without changing the query.
    pub fn dismiss_suggestions(&mut self) {
        self.suggestions.hide();
    }

    // ===== Search =====

    /// Run a full search for `query_override`, or the current query.
    ///
    /// Blank effective queries are a no-op. Otherwise suggestions are hidden,
    /// the previous results and selection are cleared, and a search command is
    /// returned. The query text itself is left as it is.
    pub fn submit(&mut self, query_override: Option<&str>) -> Option<Command> {
        let effective = query_override.unwrap_or(&self.query);
        if effective.trim().is_empty() {
            return None;
        }
        let effective = effective.to_string();

        self.suggestions.hide();
        self.search
            .begin(&effective, self.game_filter.as_ref())
            .map(Command::Search)
    }

    // ===== Game filter =====

    /// Change the game filter.
    ///
    /// When the value actually changes and the query is non-blank, the
    /// current query is resubmitted under the new filter.
    pub fn set_game_filter(&mut self, game: Option<GameId>) -> Option<Command> {
        if self.game_filter == game {
            return None;
        }
        debug!(game = ?game.as_ref().map(GameId::as_str), "Game filter changed");
        self.game_filter = game;
        self.submit(None)
    }

    /// Advance the filter through all games → each catalog game → all games.
    pub fn cycle_game_filter(&mut self) -> Option<Command> {
        let next = self.games.next_filter(self.game_filter.as_ref());
        self.set_game_filter(next)
    }

    // ===== Selection =====

    /// Display `card` if it belongs to the current results.
    pub fn select(&mut self, card: &Card) -> bool {
        self.search.results_mut().select(card)
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        self.search.results_mut().select_index(index)
    }

    pub fn select_next(&mut self) -> bool {
        self.search.results_mut().select_next()
    }

    pub fn select_previous(&mut self) -> bool {
        self.search.results_mut().select_previous()
    }

    // ===== Events =====

    /// Apply the outcome of a command, in arrival order.
    pub fn apply(&mut self, event: ApiEvent) -> ApplyOutcome {
        match event {
            ApiEvent::GamesLoaded(outcome) => {
                let failed = outcome.is_err();
                self.games.apply(outcome);
                if failed {
                    ApplyOutcome::Failed
                } else {
                    ApplyOutcome::Accepted
                }
            }
            ApiEvent::SuggestionsReceived { epoch, outcome } => {
                self.suggestions.apply(epoch, outcome)
            }
            ApiEvent::SearchCompleted { epoch, outcome } => self.search.apply(epoch, outcome),
        }
    }

    // ===== Accessors =====

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn game_filter(&self) -> Option<&GameId> {
        self.game_filter.as_ref()
    }

    pub fn games(&self) -> &GamesCatalog {
        &self.games
    }

    pub fn suggestions(&self) -> &SuggestionState {
        &self.suggestions
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn results(&self) -> &ResultSet {
        self.search.results()
    }

    /// The card currently displayed, if any.
    pub fn selected_card(&self) -> Option<&Card> {
        self.search.results().selected()
    }

    pub fn phase(&self) -> SearchPhase {
        self.search.phase()
    }

    pub fn is_loading(&self) -> bool {
        self.search.is_loading()
    }

    pub fn last_search_error(&self) -> Option<&ClientError> {
        self.search.last_error()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

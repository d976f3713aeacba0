//! Requests the pure core asks the shell to perform, and the events the
//! shell feeds back.
//!
//! The core never performs I/O. State transitions return a [`Command`]; the
//! dispatcher executes it and later delivers an [`ApiEvent`] carrying the
//! epoch captured when the command was created.

use crate::model::{Card, ClientError, GameId};
use crate::state::epoch::RequestEpoch;

/// Parameters of one autocomplete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub epoch: RequestEpoch,
    pub query: String,
    pub limit: usize,
    pub game: Option<GameId>,
}

/// Parameters of one full search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub epoch: RequestEpoch,
    pub query: String,
    pub limit: usize,
    pub game: Option<GameId>,
}

/// Decoded body of a successful search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchPayload {
    /// Cards in server order.
    pub cards: Vec<Card>,
    /// Total number of matches reported by the service, when it reports one.
    pub total: Option<u64>,
}

impl SearchPayload {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards, total: None }
    }
}

/// Work the shell must perform on behalf of the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch the list of games known to the service.
    LoadGames,
    /// Fetch autocomplete suggestions.
    Suggest(SuggestionRequest),
    /// Run a full search.
    Search(SearchRequest),
}

impl Command {
    /// Short name for log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadGames => "games",
            Self::Suggest(_) => "autocomplete",
            Self::Search(_) => "search",
        }
    }
}

/// Outcome of a command, delivered back to the session in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEvent {
    GamesLoaded(Result<Vec<GameId>, ClientError>),
    SuggestionsReceived {
        epoch: RequestEpoch,
        outcome: Result<Vec<String>, ClientError>,
    },
    SearchCompleted {
        epoch: RequestEpoch,
        outcome: Result<SearchPayload, ClientError>,
    },
}

/// What applying an [`ApiEvent`] did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The payload replaced the category's visible state.
    Accepted,
    /// A newer request in the same category superseded this one; ignored.
    Stale,
    /// The request failed; state degraded to its safe fallback.
    Failed,
}

//! Client session state machine (pure).
//!
//! All state transitions are pure functions testable without network or TUI.
//! Transitions that need I/O return a [`Command`]; the shell executes it and
//! feeds back an [`ApiEvent`].

pub mod command;
pub mod epoch;
pub mod games;
pub mod query_input;
pub mod search;
pub mod selection;
pub mod session;
pub mod suggestions;

// Re-export for convenience
pub use command::{
    ApiEvent, ApplyOutcome, Command, SearchPayload, SearchRequest, SuggestionRequest,
};
pub use epoch::{EpochCounter, RequestEpoch};
pub use games::{CatalogStatus, GamesCatalog};
pub use query_input::QueryInput;
pub use search::{SearchPhase, SearchQuery, SearchState, MAX_SEARCH_LIMIT};
pub use selection::ResultSet;
pub use session::{Session, SessionConfig};
pub use suggestions::{SuggestionState, MAX_SUGGESTION_LIMIT};

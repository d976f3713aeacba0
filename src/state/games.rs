//! Catalog of games known to the service.

use crate::model::{ClientError, GameId};
use tracing::{info, warn};

/// Load status of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStatus {
    NotLoaded,
    Loaded,
    Failed,
}

/// Game identifiers fetched once at session start.
#[derive(Debug, Clone)]
pub struct GamesCatalog {
    games: Vec<GameId>,
    status: CatalogStatus,
}

impl GamesCatalog {
    pub fn new() -> Self {
        Self {
            games: Vec::new(),
            status: CatalogStatus::NotLoaded,
        }
    }

    /// Replace the catalog with a games response. Failures leave it empty.
    pub fn apply(&mut self, outcome: Result<Vec<GameId>, ClientError>) {
        match outcome {
            Ok(games) => {
                info!(count = games.len(), "Games catalog loaded");
                self.games = games;
                self.status = CatalogStatus::Loaded;
            }
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "Failed to load games catalog");
                self.games.clear();
                self.status = CatalogStatus::Failed;
            }
        }
    }

    pub fn games(&self) -> &[GameId] {
        &self.games
    }

    pub fn status(&self) -> CatalogStatus {
        self.status
    }

    pub fn contains(&self, game: &GameId) -> bool {
        self.games.contains(game)
    }

    /// The filter value that follows `current` when cycling.
    ///
    /// All games → first game → ... → last game → all games. A current
    /// value missing from the catalog cycles back to all games.
    pub fn next_filter(&self, current: Option<&GameId>) -> Option<GameId> {
        match current {
            None => self.games.first().cloned(),
            Some(game) => self
                .games
                .iter()
                .position(|g| g == game)
                .and_then(|idx| self.games.get(idx + 1))
                .cloned(),
        }
    }
}

impl Default for GamesCatalog {
    fn default() -> Self {
        Self::new()
    }
}

//! Identifier newtypes with smart constructors.
//!
//! All identifiers validate non-empty strings at construction time, including
//! when deserialized from a service response.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a card record (e.g. "OP01-024").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardId(String);

impl CardId {
    /// Smart constructor: validates non-empty card ID
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidCardId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidCardId::Empty);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CardId {
    type Error = InvalidCardId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CardId> for String {
    fn from(value: CardId) -> Self {
        value.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Game identifier as published by the service (e.g. "pokemon", "one_piece").
///
/// The set of games is owned by the service, so this is an open identifier
/// rather than a closed enum. The catalog fetched at startup lists the
/// values the service currently knows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameId(String);

impl GameId {
    /// Smart constructor: validates non-empty, trimmed game ID
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidGameId> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidGameId::Empty);
        }
        if trimmed.len() == raw.len() {
            Ok(Self(raw))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-facing label: underscores become spaces, letters upper-cased.
    ///
    /// `one_piece` renders as `ONE PIECE`.
    pub fn label(&self) -> String {
        self.0.replace('_', " ").to_uppercase()
    }
}

impl TryFrom<String> for GameId {
    type Error = InvalidGameId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GameId> for String {
    fn from(value: GameId) -> Self {
        value.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ===== Error Types =====

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCardId {
    #[error("Card ID cannot be empty")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidGameId {
    #[error("Game ID cannot be empty")]
    Empty,
}

// ===== Tests =====

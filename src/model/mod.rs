//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod card;
pub mod error;
pub mod identifiers;
pub mod key_action;

// Re-export for convenience
pub use card::{Card, CardDetails};
pub use error::{AppError, ClientError};
pub use identifiers::{CardId, GameId, InvalidCardId, InvalidGameId};
pub use key_action::KeyAction;

//! tcgs: terminal client for trading-card search services
//!
//! Live autocomplete, full search with a selectable result list and a card
//! detail pane. Follows the Pure Core / Impure Shell architecture:
//! [`state`] holds the session state machine and never performs I/O,
//! [`integration`] executes its commands against [`api`], and [`view`]
//! owns the terminal.

pub mod api;
pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;

// Re-export main loop integration
pub mod integration;

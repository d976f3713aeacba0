//! Error types for the tcgs client.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via
//! `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all startup/shell failures
//!   - [`ConfigError`] - Config file loading and server URL validation
//!   - [`LoggingError`] - Tracing subscriber initialization
//!   - [`EndpointError`] - API root could not be derived from the server URL
//!   - `reqwest::Error` - HTTP client construction
//!   - `std::io::Error` - Terminal/TUI rendering failures
//! - [`ClientError`] - Remote service failures (transport or malformed response)
//!
//! # Error Recovery Strategy
//!
//! `ClientError` is **non-fatal**: it is caught where a response is applied to
//! the session, logged, and the session degrades to the nearest safe state
//! (empty suggestions, empty results, loading flag cleared). It never reaches
//! `AppError`. Configuration, logging and terminal errors are fatal and
//! propagate to `main`.

use crate::api::EndpointError;
use crate::config::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// Top-level application error.
///
/// Returned from `main`-level logic. Every variant is fatal: the client
/// cannot start (or keep drawing) without a valid config, log sink and
/// terminal.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file could not be read or parsed, or the server URL is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Server URL and API base do not form a usable API root.
    #[error("Endpoint error: {0}")]
    Endpoint(#[from] EndpointError),

    /// HTTP client could not be constructed (TLS backend initialization).
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Terminal or TUI rendering error.
    ///
    /// Failures in the crossterm/ratatui layer such as broken pipes or resize
    /// failures. Without a working terminal the UI cannot function.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failure of one request to the remote card service.
///
/// Two categories:
///
/// - **TransportFailure**: [`ClientError::Transport`] (unreachable host,
///   timeout, connection reset) and [`ClientError::Status`] (non-2xx reply).
/// - **MalformedResponse**: [`ClientError::MalformedResponse`] (body is not
///   JSON, or lacks an expected field such as `suggestions` or `cards`).
///
/// `Clone + PartialEq` so the latest search failure can be kept in session
/// state and compared in tests.
///
/// # Examples
///
/// ```
/// use tcgs::model::ClientError;
///
/// let err = ClientError::Status {
///     url: "http://localhost:8000/api/search?q=pika".to_string(),
///     status: 503,
/// };
/// assert!(err.is_transport());
/// assert!(err.to_string().contains("503"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("Request to {url} failed: {reason}")]
    Transport {
        /// Full request URL including query string.
        url: String,
        /// Transport-level reason (connect error, timeout, ...).
        reason: String,
    },

    /// The service answered with a non-success status.
    #[error("Request to {url} returned HTTP {status}")]
    Status {
        /// Full request URL including query string.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("Malformed response from {url}: {reason}")]
    MalformedResponse {
        /// Full request URL including query string.
        url: String,
        /// Decoder error message.
        reason: String,
    },
}

impl ClientError {
    /// True for failures in the TransportFailure category.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Status { .. })
    }

    /// True for failures in the MalformedResponse category.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }

    /// Short category label for status lines and log fields.
    pub fn kind(&self) -> &'static str {
        if self.is_transport() {
            "transport"
        } else {
            "malformed-response"
        }
    }
}

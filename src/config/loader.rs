//! Configuration file loading with precedence handling.

use crate::model::GameId;
use crate::state::{MAX_SEARCH_LIMIT, MAX_SUGGESTION_LIMIT};
use reqwest::Url;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Server assumed when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Per-request timeout in seconds when nothing else is configured.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Rows shown in the results list when nothing else is configured.
pub const DEFAULT_RESULTS_DISPLAY_CAP: usize = 20;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Configured server URL is not an absolute http(s) URL.
    #[error("Invalid server URL '{url}': {reason}")]
    InvalidServerUrl {
        /// URL as configured.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/tcgs/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Server the client talks to (e.g., "https://cards.example.com/tcg/").
    #[serde(default)]
    pub server_url: Option<String>,

    /// API base path overriding deployment-based resolution.
    #[serde(default)]
    pub api_base: Option<String>,

    /// Game filter applied at startup.
    #[serde(default)]
    pub game: Option<String>,

    /// Maximum suggestions per autocomplete request (1..=10).
    #[serde(default)]
    pub suggestion_limit: Option<usize>,

    /// Maximum cards per search request (1..=50).
    #[serde(default)]
    pub search_limit: Option<usize>,

    /// Per-request timeout in seconds; 0 disables.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Rows shown in the results list.
    #[serde(default)]
    pub results_display_cap: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Server URL as configured; validated by [`ResolvedConfig::parsed_server_url`].
    pub server_url: String,
    /// API base override.
    pub api_base: Option<String>,
    /// Startup game filter.
    pub game: Option<String>,
    /// Suggestion limit, clamped.
    pub suggestion_limit: usize,
    /// Search limit, clamped.
    pub search_limit: usize,
    /// Request timeout in seconds; 0 means none.
    pub request_timeout_secs: u64,
    /// Results list rows, at least 1.
    pub results_display_cap: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            api_base: None,
            game: None,
            suggestion_limit: MAX_SUGGESTION_LIMIT,
            search_limit: MAX_SEARCH_LIMIT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            results_display_cap: DEFAULT_RESULTS_DISPLAY_CAP,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Parse and validate the server URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidServerUrl`] if the URL does not parse or
    /// its scheme is not http/https.
    pub fn parsed_server_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.server_url).map_err(|e| ConfigError::InvalidServerUrl {
            url: self.server_url.clone(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidServerUrl {
                url: self.server_url.clone(),
                reason: format!("unsupported scheme '{other}'"),
            }),
        }
    }

    /// Startup game filter; blank values mean all games.
    pub fn game_id(&self) -> Option<GameId> {
        self.game.as_deref().and_then(|g| GameId::new(g).ok())
    }

    /// Request timeout, or `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/tcgs/tcgs.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("tcgs").join("tcgs.log")
    } else {
        PathBuf::from("tcgs.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/tcgs/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tcgs").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TCGS_CONFIG` environment variable
/// 3. Default path `~/.config/tcgs/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("TCGS_CONFIG") {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(
                "TCGS_CONFIG is set but empty".to_string(),
            ));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// Limits are clamped to what the service accepts.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        server_url: config.server_url.unwrap_or(defaults.server_url),
        api_base: config.api_base.or(defaults.api_base),
        game: config.game.or(defaults.game),
        suggestion_limit: config
            .suggestion_limit
            .unwrap_or(defaults.suggestion_limit)
            .clamp(1, MAX_SUGGESTION_LIMIT),
        search_limit: config
            .search_limit
            .unwrap_or(defaults.search_limit)
            .clamp(1, MAX_SEARCH_LIMIT),
        request_timeout_secs: config
            .request_timeout_secs
            .unwrap_or(defaults.request_timeout_secs),
        results_display_cap: config
            .results_display_cap
            .unwrap_or(defaults.results_display_cap)
            .max(1),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `TCGS_SERVER_URL`: Override server URL
/// - `TCGS_API_BASE`: Override API base path
/// - `TCGS_GAME`: Override startup game filter
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(url) = std::env::var("TCGS_SERVER_URL") {
        config.server_url = url;
    }

    if let Ok(base) = std::env::var("TCGS_API_BASE") {
        config.api_base = Some(base);
    }

    if let Ok(game) = std::env::var("TCGS_GAME") {
        config.game = Some(game);
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    server_override: Option<String>,
    api_base_override: Option<String>,
    game_override: Option<String>,
) -> ResolvedConfig {
    if let Some(url) = server_override {
        config.server_url = url;
    }

    if let Some(base) = api_base_override {
        config.api_base = Some(base);
    }

    if let Some(game) = game_override {
        config.game = Some(game);
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

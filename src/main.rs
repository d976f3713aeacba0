//! tcgs - Entry Point

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tcgs::api::{ApiEndpoint, HttpCardApi};
use tcgs::integration::Dispatcher;
use tcgs::model::AppError;
use tcgs::state::{Session, SessionConfig};
use tcgs::view::{ColorConfig, ViewOptions};
use tracing::info;

/// tcgs - search trading-card databases from the terminal
#[derive(Parser, Debug)]
#[command(name = "tcgs")]
#[command(version)]
#[command(about = "Terminal client for searching trading-card databases with live autocomplete")]
pub struct Args {
    /// Server URL (e.g. https://cards.example.com/tcg/)
    #[arg(long)]
    pub server: Option<String>,

    /// API base path, overriding deployment-based resolution
    #[arg(long)]
    pub api_base: Option<String>,

    /// Restrict searches to one game
    #[arg(short, long)]
    pub game: Option<String>,

    /// Run this search on startup
    #[arg(short, long)]
    pub query: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = tcgs::config::load_config_with_precedence(args.config.clone())?;
        let merged = tcgs::config::merge_config(config_file);
        let with_env = tcgs::config::apply_env_overrides(merged);
        tcgs::config::apply_cli_overrides(
            with_env,
            args.server.clone(),
            args.api_base.clone(),
            args.game.clone(),
        )
    };

    // Guard flushes buffered log lines on exit
    let _log_guard = tcgs::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let server_url = config.parsed_server_url()?;
    let endpoint = ApiEndpoint::new(&server_url, config.api_base.as_deref())?;
    let api = HttpCardApi::new(endpoint, config.request_timeout())?;
    info!(root = %api.endpoint().root(), "Card service client ready");
    let (dispatcher, events) = Dispatcher::new(Arc::new(api));

    let session = Session::new(SessionConfig {
        suggestion_limit: config.suggestion_limit,
        search_limit: config.search_limit,
        initial_game: config.game_id(),
    });
    let options = ViewOptions {
        display_cap: config.results_display_cap,
        colors: ColorConfig::from_env_and_args(args.no_color),
    };

    tcgs::view::run_app(session, options, dispatcher, events, args.query.as_deref()).await?;

    info!("Exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        // Help returns Err with DisplayHelp, which is success
        let result = Args::try_parse_from(["tcgs", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["tcgs", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["tcgs"]);
        assert_eq!(args.server, None);
        assert_eq!(args.api_base, None);
        assert_eq!(args.game, None);
        assert_eq!(args.query, None);
        assert!(!args.no_color);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_query_short_flag() {
        let args = Args::parse_from(["tcgs", "-q", "pikachu"]);
        assert_eq!(args.query, Some("pikachu".to_string()));
    }

    #[test]
    fn test_game_long_flag() {
        let args = Args::parse_from(["tcgs", "--game", "magic"]);
        assert_eq!(args.game, Some("magic".to_string()));
    }

    #[test]
    fn test_positional_args_rejected() {
        let result = Args::try_parse_from(["tcgs", "pikachu"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_combined_flags() {
        let args = Args::parse_from([
            "tcgs",
            "--server",
            "https://cards.example.com/tcg/",
            "--api-base",
            "/v2/api",
            "-g",
            "pokemon",
            "--no-color",
            "--config",
            "/custom/config.toml",
        ]);
        assert_eq!(
            args.server.as_deref(),
            Some("https://cards.example.com/tcg/")
        );
        assert_eq!(args.api_base.as_deref(), Some("/v2/api"));
        assert_eq!(args.game.as_deref(), Some("pokemon"));
        assert!(args.no_color);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_server_flows_through_config_precedence_chain() {
        use tcgs::config::{apply_cli_overrides, merge_config, ConfigFile};

        let merged = merge_config(Some(ConfigFile {
            server_url: Some("https://file.example.com".to_string()),
            ..ConfigFile::default()
        }));
        assert_eq!(merged.server_url, "https://file.example.com");

        let with_cli = apply_cli_overrides(
            merged,
            Some("http://127.0.0.1:8000".to_string()),
            None,
            None,
        );
        assert_eq!(
            with_cli.server_url, "http://127.0.0.1:8000",
            "CLI server should override all other sources"
        );
    }
}

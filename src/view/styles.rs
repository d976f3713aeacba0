//! Styling for the search screen.
//!
//! Colors can be switched off wholesale; modifiers (bold, reversed) are kept
//! so focus and selection stay visible on monochrome terminals.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors explicitly on or off, ignoring the environment.
    pub fn fixed(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Styles =====

/// Styles shared by every widget on the search screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Styles {
    pub focused_border: Style,
    pub border: Style,
    pub highlight: Style,
    pub title: Style,
    pub label: Style,
    pub muted: Style,
    pub price: Style,
    pub error: Style,
    pub cursor: Style,
}

impl Styles {
    /// Styles honoring `config`. With colors off only modifiers remain.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let reversed = Style::default().add_modifier(Modifier::REVERSED);

        if config.colors_enabled() {
            Self {
                focused_border: Style::default().fg(Color::Cyan),
                border: Style::default().fg(Color::DarkGray),
                highlight: reversed.fg(Color::Yellow),
                title: bold.fg(Color::White),
                label: Style::default().fg(Color::Cyan),
                muted: Style::default().fg(Color::DarkGray),
                price: Style::default().fg(Color::Green),
                error: Style::default().fg(Color::Red),
                cursor: bold.bg(Color::White).fg(Color::Black),
            }
        } else {
            Self {
                focused_border: bold,
                border: Style::default(),
                highlight: reversed,
                title: bold,
                label: Style::default(),
                muted: Style::default(),
                price: Style::default(),
                error: bold,
                cursor: reversed,
            }
        }
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====

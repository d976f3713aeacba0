//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Text editing keys in the search input are handled before bindings are
/// consulted, so printable characters only reach bindings when the results
/// pane has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Movement (interpreted by focus: suggestions in input, cards in results)
    /// Move highlight up. Default: k/↑
    MoveUp,
    /// Move highlight down. Default: j/↓
    MoveDown,
    /// Jump to the first result. Default: g/Home
    MoveToTop,
    /// Jump to the last displayed result. Default: G/End
    MoveToBottom,

    // Focus
    /// Toggle focus between the search input and the results list. Default: Tab
    CycleFocus,

    // Search
    /// Submit the query, or accept the highlighted suggestion. Default: Enter
    Submit,
    /// Hide suggestions, or return focus to the input. Default: Esc
    Dismiss,
    /// Clear the query text. Default: Ctrl+u
    ClearQuery,

    // Filter
    /// Cycle the game filter: all → each known game → all. Default: Ctrl+g
    CycleGameFilter,

    // Application controls
    /// Quit the application. Default: q (results pane), Ctrl+c anywhere
    Quit,
}

impl KeyAction {
    /// Short description for the footer hint line.
    pub fn description(self) -> &'static str {
        match self {
            Self::MoveUp => "up",
            Self::MoveDown => "down",
            Self::MoveToTop => "first",
            Self::MoveToBottom => "last",
            Self::CycleFocus => "focus",
            Self::Submit => "search",
            Self::Dismiss => "back",
            Self::ClearQuery => "clear",
            Self::CycleGameFilter => "game",
            Self::Quit => "quit",
        }
    }
}

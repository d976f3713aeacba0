//! One-line status bar: filter, search progress, last failure, key hints.

use crate::model::KeyAction;
use crate::state::{CatalogStatus, SearchPhase, Session};
use crate::view::styles::Styles;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Label for the current game filter.
///
/// "All games (N)" when the catalog loaded, otherwise the game's label.
pub fn filter_label(session: &Session) -> String {
    match session.game_filter() {
        Some(game) => game.label(),
        None => match session.games().status() {
            CatalogStatus::Loaded => format!("All games ({})", session.games().games().len()),
            CatalogStatus::NotLoaded | CatalogStatus::Failed => "All games".to_string(),
        },
    }
}

/// Progress of the current search, for the status bar.
pub fn search_status(session: &Session) -> String {
    match session.phase() {
        SearchPhase::Idle => "Ready".to_string(),
        SearchPhase::Searching => "Searching...".to_string(),
        SearchPhase::ResultsEmpty => match session.last_search_error() {
            Some(err) => format!("Search failed ({})", err.kind()),
            None => "No results".to_string(),
        },
        SearchPhase::ResultsNonEmpty => {
            let count = session.results().len();
            let noun = if count == 1 { "card" } else { "cards" };
            match session.search().total() {
                Some(total) if total > count as u64 => format!("{count} of {total} {noun}"),
                _ => format!("{count} {noun}"),
            }
        }
    }
}

const KEY_HINTS: [(&str, KeyAction); 5] = [
    ("Enter", KeyAction::Submit),
    ("Tab", KeyAction::CycleFocus),
    ("^G", KeyAction::CycleGameFilter),
    ("Esc", KeyAction::Dismiss),
    ("^C", KeyAction::Quit),
];

/// Footer hint text, e.g. "Enter search · Tab focus".
pub fn key_hints() -> String {
    KEY_HINTS
        .iter()
        .map(|(key, action)| format!("{key} {}", action.description()))
        .collect::<Vec<_>>()
        .join(" · ")
}

/// Status bar widget.
pub struct StatusLine<'a> {
    session: &'a Session,
    styles: &'a Styles,
}

impl<'a> StatusLine<'a> {
    pub fn new(session: &'a Session, styles: &'a Styles) -> Self {
        Self { session, styles }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let status_style = if self.session.last_search_error().is_some() {
            self.styles.error
        } else {
            self.styles.label
        };

        let mut spans = vec![
            Span::raw(format!(" {} ", filter_label(self.session))),
            Span::styled("│ ", self.styles.muted),
            Span::styled(search_status(self.session), status_style),
        ];
        if self.session.games().status() == CatalogStatus::Failed {
            spans.push(Span::styled(" │ games unavailable", self.styles.muted));
        }

        let hints = key_hints();
        let hints_width = hints.chars().count() as u16 + 1;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(hints_width)])
            .split(area);

        Paragraph::new(Line::from(spans)).render(chunks[0], buf);
        Paragraph::new(Line::styled(hints, self.styles.muted)).render(chunks[1], buf);
    }
}

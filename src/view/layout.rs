//! Screen layout: search input on top, results and card detail side by
//! side, status bar at the bottom, suggestions dropped over the body.

use crate::state::{QueryInput, Session};
use crate::view::card_detail::CardDetail;
use crate::view::results::ResultsList;
use crate::view::search_input::SearchInput;
use crate::view::status::{filter_label, StatusLine};
use crate::view::styles::Styles;
use crate::view::suggestions::SuggestionList;
use crate::view::FocusPane;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Everything the screen draws, borrowed for one frame.
pub struct Screen<'a> {
    pub session: &'a Session,
    pub input: &'a QueryInput,
    pub focus: FocusPane,
    pub suggestion_cursor: Option<usize>,
    pub display_cap: usize,
    pub styles: &'a Styles,
}

/// Areas of the main regions for a frame of size `area`.
pub struct Regions {
    pub input: Rect,
    pub results: Rect,
    pub detail: Rect,
    pub status: Rect,
}

pub fn calculate_regions(area: Rect) -> Regions {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Results + detail
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(vertical[1]);

    Regions {
        input: vertical[0],
        results: body[0],
        detail: body[1],
        status: vertical[2],
    }
}

pub fn render_layout(frame: &mut Frame, screen: &Screen) {
    let regions = calculate_regions(frame.area());
    let session = screen.session;
    let label = filter_label(session);

    frame.render_widget(
        SearchInput::new(screen.input, &label, screen.styles)
            .focused(screen.focus == FocusPane::Input),
        regions.input,
    );

    frame.render_widget(
        ResultsList::new(session.results(), session.phase(), screen.styles)
            .cap(screen.display_cap)
            .total(session.search().total())
            .focused(screen.focus == FocusPane::Results),
        regions.results,
    );

    frame.render_widget(
        CardDetail::new(session.selected_card(), screen.styles),
        regions.detail,
    );

    frame.render_widget(StatusLine::new(session, screen.styles), regions.status);

    // Dropdown last so it overlays the body
    let items = session.suggestions().visible_items();
    if screen.focus == FocusPane::Input && !items.is_empty() {
        let area = SuggestionList::area(regions.input, items.len(), frame.area());
        frame.render_widget(
            SuggestionList::new(items, screen.suggestion_cursor, screen.styles),
            area,
        );
    }
}

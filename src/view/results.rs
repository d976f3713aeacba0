//! Results list: the first cards of the current search.

use crate::state::{ResultSet, SearchPhase};
use crate::view::format::truncate_to_width;
use crate::view::styles::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Bordered list of result rows, or a phase message when there are none.
pub struct ResultsList<'a> {
    results: &'a ResultSet,
    phase: SearchPhase,
    total: Option<u64>,
    cap: usize,
    focused: bool,
    styles: &'a Styles,
}

impl<'a> ResultsList<'a> {
    pub fn new(results: &'a ResultSet, phase: SearchPhase, styles: &'a Styles) -> Self {
        Self {
            results,
            phase,
            total: None,
            cap: usize::MAX,
            focused: false,
            styles,
        }
    }

    /// Show at most `cap` rows.
    pub fn cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    /// Server-reported match count for the title.
    pub fn total(mut self, total: Option<u64>) -> Self {
        self.total = total;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn title(&self) -> String {
        let shown = self.results.len().min(self.cap);
        match self.total {
            Some(total) if total > shown as u64 => format!(" Results ({shown} of {total}) "),
            _ if self.results.len() > shown => {
                format!(" Results ({shown} of {}) ", self.results.len())
            }
            _ => format!(" Results ({shown}) "),
        }
    }

    fn placeholder(&self) -> &'static str {
        match self.phase {
            SearchPhase::Idle => "Type a card name and press Enter",
            SearchPhase::Searching => "Searching...",
            SearchPhase::ResultsEmpty => "No cards found",
            SearchPhase::ResultsNonEmpty => "",
        }
    }
}

/// First row to draw so that `selected` stays within `height` rows.
pub fn scroll_offset(selected: Option<usize>, height: usize) -> usize {
    match selected {
        Some(idx) if height > 0 && idx >= height => idx + 1 - height,
        _ => 0,
    }
}

impl Widget for ResultsList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.styles.focused_border
        } else {
            self.styles.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.title());

        if self.results.is_empty() {
            Paragraph::new(Line::styled(self.placeholder(), self.styles.muted))
                .block(block)
                .render(area, buf);
            return;
        }

        let inner_width = usize::from(area.width.saturating_sub(2));
        let height = usize::from(area.height.saturating_sub(2));
        let selected = self.results.selected_index();
        let offset = scroll_offset(selected, height);

        let lines: Vec<Line> = self
            .results
            .cards()
            .iter()
            .enumerate()
            .take(self.cap)
            .skip(offset)
            .take(height)
            .map(|(idx, card)| {
                let row = format!("{}  [{}]", card.name(), card.game().label());
                let text = truncate_to_width(&row, inner_width);
                if Some(idx) == selected {
                    Line::styled(text, self.styles.highlight)
                } else {
                    Line::from(text)
                }
            })
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

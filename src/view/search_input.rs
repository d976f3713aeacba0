//! Search input widget for rendering the query line.

use crate::state::QueryInput;
use crate::view::styles::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Bordered query line with the active game filter in its title.
pub struct SearchInput<'a> {
    input: &'a QueryInput,
    filter_label: &'a str,
    focused: bool,
    styles: &'a Styles,
}

impl<'a> SearchInput<'a> {
    pub fn new(input: &'a QueryInput, filter_label: &'a str, styles: &'a Styles) -> Self {
        Self {
            input,
            filter_label,
            focused: false,
            styles,
        }
    }

    /// Draw the cursor and a highlighted border.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = if self.focused {
            let (before, after) = self.input.split_at_cursor();
            let mut rest = after.chars();
            let cursor_char = rest.next().map(String::from).unwrap_or_else(|| " ".into());
            Line::from(vec![
                Span::raw(before.to_string()),
                Span::styled(cursor_char, self.styles.cursor),
                Span::raw(rest.as_str().to_string()),
            ])
        } else {
            Line::from(self.input.text().to_string())
        };

        let border_style = if self.focused {
            self.styles.focused_border
        } else {
            self.styles.border
        };
        let title = format!(" Search · {} ", self.filter_label);

        Paragraph::new(line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(title),
            )
            .render(area, buf);
    }
}

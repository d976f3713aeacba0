//! Autocomplete dropdown shown under the search input.

use crate::view::format::truncate_to_width;
use crate::view::styles::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Dropdown listing suggestions, one per row.
pub struct SuggestionList<'a> {
    items: &'a [String],
    highlighted: Option<usize>,
    styles: &'a Styles,
}

impl<'a> SuggestionList<'a> {
    pub fn new(items: &'a [String], highlighted: Option<usize>, styles: &'a Styles) -> Self {
        Self {
            items,
            highlighted,
            styles,
        }
    }

    /// Area for the dropdown directly below `anchor`, clipped to `bounds`.
    pub fn area(anchor: Rect, item_count: usize, bounds: Rect) -> Rect {
        let y = anchor.bottom();
        let wanted = u16::try_from(item_count).unwrap_or(u16::MAX).saturating_add(2);
        let height = wanted.min(bounds.bottom().saturating_sub(y));
        Rect::new(anchor.x, y, anchor.width, height)
    }
}

impl Widget for SuggestionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || self.items.is_empty() {
            return;
        }
        Clear.render(area, buf);

        let inner_width = usize::from(area.width.saturating_sub(2));
        let lines: Vec<Line> = self
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let text = truncate_to_width(item, inner_width);
                if Some(idx) == self.highlighted {
                    Line::styled(text, self.styles.highlight)
                } else {
                    Line::from(text)
                }
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.styles.focused_border),
            )
            .render(area, buf);
    }
}

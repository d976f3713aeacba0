//! Detail pane for the selected card.
//!
//! Only fields the service actually supplied are shown. Blank text fields
//! count as missing; a numeric zero is a real value.

use crate::model::Card;
use crate::view::format::{
    format_price, format_stat, present, truncate_chars, EFFECT_PREVIEW_CHARS,
};
use crate::view::styles::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Lines describing `card`, in display order.
pub fn detail_lines(card: &Card, styles: &Styles) -> Vec<Line<'static>> {
    let details = card.details();
    let mut lines = vec![
        Line::styled(card.name().to_string(), styles.title),
        field_line("Game", card.game().label(), styles),
    ];

    let text_fields = [
        ("Type", details.card_type.as_deref()),
        ("Rarity", details.rarity.as_deref()),
        ("Cost", details.cost.as_deref()),
        ("Color", details.color.as_deref()),
        ("Power", details.power.as_deref()),
    ];
    for (label, value) in text_fields {
        if let Some(value) = present(value) {
            lines.push(field_line(label, value.to_string(), styles));
        }
    }

    if let Some(hp) = details.hp {
        lines.push(field_line("HP", format_stat(hp), styles));
    }
    if let Some(toughness) = details.toughness {
        lines.push(field_line("Toughness", format_stat(toughness), styles));
    }
    if let Some(price) = details.price_usd {
        lines.push(Line::from(vec![
            Span::styled("Price: ", styles.label),
            Span::styled(format_price(price), styles.price),
        ]));
    }
    if let Some(archetype) = present(details.archetype.as_deref()) {
        lines.push(field_line("Archetype", archetype.to_string(), styles));
    }
    if let Some(abilities) = present(details.abilities.as_deref()) {
        lines.push(field_line("Abilities", abilities.to_string(), styles));
    }
    if let Some(effect) = present(details.effect.as_deref()) {
        lines.push(Line::default());
        lines.push(Line::from(truncate_chars(effect, EFFECT_PREVIEW_CHARS)));
    }
    if let Some(image) = present(Some(card.image_url())) {
        lines.push(Line::default());
        lines.push(Line::styled(format!("Image: {image}"), styles.muted));
    }

    lines
}

fn field_line(label: &str, value: String, styles: &Styles) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), styles.label),
        Span::raw(value),
    ])
}

/// Bordered pane with the selected card, or a hint when nothing is selected.
pub struct CardDetail<'a> {
    card: Option<&'a Card>,
    styles: &'a Styles,
}

impl<'a> CardDetail<'a> {
    pub fn new(card: Option<&'a Card>, styles: &'a Styles) -> Self {
        Self { card, styles }
    }
}

impl Widget for CardDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.styles.border)
            .title(" Card ");

        let lines = match self.card {
            Some(card) => detail_lines(card, self.styles),
            None => vec![Line::styled("No card selected", self.styles.muted)],
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

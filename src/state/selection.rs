//! Result set and the single displayed card.
//!
//! `ResultSet` owns the cards of one search together with the selection,
//! and the selection is an index into those cards. A selection therefore
//! always refers to a member of the current result set; replacing the set
//! replaces the selection with it.

use crate::model::Card;

/// Ordered cards of one search plus the selected card, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    cards: Vec<Card>,
    selected: Option<usize>,
}

impl ResultSet {
    /// Result set from a fresh response: selects the first card when non-empty.
    pub fn new(cards: Vec<Card>) -> Self {
        let selected = if cards.is_empty() { None } else { Some(0) };
        Self { cards, selected }
    }

    /// No cards, no selection.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The displayed card.
    pub fn selected(&self) -> Option<&Card> {
        self.selected.and_then(|idx| self.cards.get(idx))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Select `card` if it is a member of this result set.
    ///
    /// Membership is by `card_id`. Returns false (and leaves the selection
    /// unchanged) for cards from any other result set.
    pub fn select(&mut self, card: &Card) -> bool {
        match self.cards.iter().position(|c| c.is_same_record(card)) {
            Some(idx) => {
                self.selected = Some(idx);
                true
            }
            None => false,
        }
    }

    /// Select by position. Out-of-range indices are ignored.
    pub fn select_index(&mut self, index: usize) -> bool {
        if index < self.cards.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// Move the selection down one card, stopping at the last.
    pub fn select_next(&mut self) -> bool {
        let next = match self.selected {
            Some(idx) => idx + 1,
            None => 0,
        };
        self.select_index(next)
    }

    /// Move the selection up one card, stopping at the first.
    pub fn select_previous(&mut self) -> bool {
        match self.selected {
            Some(idx) if idx > 0 => self.select_index(idx - 1),
            Some(_) => false,
            None => self.select_index(0),
        }
    }

    /// Drop all cards and the selection.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CardId, GameId};

    fn card(id: &str) -> Card {
        Card::new(
            CardId::new(id).unwrap(),
            format!("Card {id}"),
            GameId::new("pokemon").unwrap(),
            "",
        )
    }

    #[test]
    fn new_selects_first_card() {
        let set = ResultSet::new(vec![card("a"), card("b")]);
        assert_eq!(set.selected().map(|c| c.card_id().as_str()), Some("a"));
    }

    #[test]
    fn new_with_no_cards_has_no_selection() {
        let set = ResultSet::new(Vec::new());
        assert!(set.selected().is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn select_member_changes_selection() {
        let mut set = ResultSet::new(vec![card("a"), card("b")]);

        assert!(set.select(&card("b")));
        assert_eq!(set.selected_index(), Some(1));
    }

    #[test]
    fn select_non_member_is_noop() {
        let mut set = ResultSet::new(vec![card("a"), card("b")]);

        assert!(!set.select(&card("z")));
        assert_eq!(set.selected_index(), Some(0));
    }

    #[test]
    fn select_index_out_of_range_is_noop() {
        let mut set = ResultSet::new(vec![card("a")]);

        assert!(!set.select_index(3));
        assert_eq!(set.selected_index(), Some(0));
    }

    #[test]
    fn select_next_stops_at_last_card() {
        let mut set = ResultSet::new(vec![card("a"), card("b")]);

        assert!(set.select_next());
        assert!(!set.select_next());
        assert_eq!(set.selected_index(), Some(1));
    }

    #[test]
    fn select_previous_stops_at_first_card() {
        let mut set = ResultSet::new(vec![card("a"), card("b")]);

        assert!(!set.select_previous());
        assert_eq!(set.selected_index(), Some(0));
    }

    #[test]
    fn movement_on_empty_set_is_noop() {
        let mut set = ResultSet::empty();

        assert!(!set.select_next());
        assert!(!set.select_previous());
        assert!(set.selected().is_none());
    }

    #[test]
    fn clear_drops_cards_and_selection() {
        let mut set = ResultSet::new(vec![card("a")]);

        set.clear();

        assert!(set.is_empty());
        assert!(set.selected().is_none());
    }
}

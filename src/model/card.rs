//! Card records as served by the search service.

use super::identifiers::{CardId, GameId};
use serde::{Deserialize, Serialize};

/// One searchable trading-card record.
///
/// Immutable once received. Identity is `card_id`: two cards with the same
/// ID are the same record even if their optional fields differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    card_id: CardId,
    name: String,
    game: GameId,
    image_url: String,
    #[serde(flatten)]
    details: CardDetails,
}

/// Optional descriptive fields of a card.
///
/// Absent and `null` both deserialize to `None`; nothing is defaulted to a
/// zero or empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardDetails {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toughness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abilities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archetype: Option<String>,
}

impl Card {
    pub fn new(
        card_id: CardId,
        name: impl Into<String>,
        game: GameId,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            card_id,
            name: name.into(),
            game,
            image_url: image_url.into(),
            details: CardDetails::default(),
        }
    }

    /// Replace the optional descriptive fields.
    pub fn with_details(mut self, details: CardDetails) -> Self {
        self.details = details;
        self
    }

    pub fn card_id(&self) -> &CardId {
        &self.card_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn game(&self) -> &GameId {
        &self.game
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn details(&self) -> &CardDetails {
        &self.details
    }

    /// Same record as `other` (compares `card_id` only).
    pub fn is_same_record(&self, other: &Card) -> bool {
        self.card_id == other.card_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_record() {
        let json = r#"{
            "card_id": "base1-4",
            "name": "Charizard",
            "game": "pokemon",
            "image_url": "https://img.example/base1-4.png",
            "type": "Fire",
            "rarity": "Rare Holo",
            "hp": 120,
            "price_usd": 350.5,
            "effect": "Energy Burn"
        }"#;

        let card: Card = serde_json::from_str(json).expect("valid card");

        assert_eq!(card.card_id().as_str(), "base1-4");
        assert_eq!(card.name(), "Charizard");
        assert_eq!(card.game().as_str(), "pokemon");
        assert_eq!(card.details().card_type.as_deref(), Some("Fire"));
        assert_eq!(card.details().hp, Some(120.0));
        assert_eq!(card.details().price_usd, Some(350.5));
    }

    #[test]
    fn missing_and_null_optionals_are_absent() {
        let json = r#"{
            "card_id": "OP01-024",
            "name": "Monkey.D.Luffy",
            "game": "one_piece",
            "image_url": "",
            "hp": null,
            "price_usd": null
        }"#;

        let card: Card = serde_json::from_str(json).expect("valid card");

        assert_eq!(card.details(), &CardDetails::default());
    }

    #[test]
    fn zero_price_is_present_not_absent() {
        let json = r#"{"card_id":"x","name":"X","game":"magic","image_url":"","price_usd":0}"#;

        let card: Card = serde_json::from_str(json).expect("valid card");

        assert_eq!(card.details().price_usd, Some(0.0));
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let json = r#"{"card_id":"x","game":"magic","image_url":""}"#;

        let result: Result<Card, _> = serde_json::from_str(json);

        assert!(result.is_err(), "name is required");
    }

    #[test]
    fn same_record_compares_card_id_only() {
        let a = Card::new(
            CardId::new("id-1").unwrap(),
            "Pikachu",
            GameId::new("pokemon").unwrap(),
            "",
        );
        let b = a.clone().with_details(CardDetails {
            rarity: Some("Common".to_string()),
            ..CardDetails::default()
        });

        assert!(a.is_same_record(&b));
        assert_ne!(a, b);
    }
}

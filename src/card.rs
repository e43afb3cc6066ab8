use crate::ids::CardId;
use crate::types::{CardType, InkColor};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// An ability as listed by the card database's authors.
///
/// Only the validation harness reads these; the parser works from
/// `full_text_sections` alone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "camelCase", default))]
pub struct AuthoredAbility {
    pub name: Option<String>,
    pub effect: Option<String>,
    pub full_text: Option<String>,
    pub keyword: Option<String>,
    #[cfg_attr(feature = "serialization", serde(rename = "type"))]
    pub kind: Option<String>,
}

/// Printed card data as delivered by the card database.
///
/// Immutable input to the parser; owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "camelCase"))]
pub struct RawCard {
    pub id: CardId,
    pub name: String,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub full_name: String,
    #[cfg_attr(feature = "serialization", serde(rename = "type"))]
    pub card_type: CardType,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub cost: u32,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub inkwell: bool,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub color: InkColor,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub full_text_sections: Vec<String>,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub abilities: Vec<AuthoredAbility>,
}

impl RawCard {
    pub fn new(id: CardId, name: impl Into<String>, card_type: CardType) -> Self {
        let name = name.into();
        Self {
            id,
            full_name: name.clone(),
            name,
            card_type,
            cost: 0,
            inkwell: false,
            color: InkColor::Other,
            full_text_sections: Vec::new(),
            abilities: Vec::new(),
        }
    }

    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    pub fn cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    pub fn inkwell(mut self, inkwell: bool) -> Self {
        self.inkwell = inkwell;
        self
    }

    pub fn color(mut self, color: InkColor) -> Self {
        self.color = color;
        self
    }

    pub fn text_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.full_text_sections = sections.into_iter().map(Into::into).collect();
        self
    }

    pub fn authored_abilities(mut self, abilities: Vec<AuthoredAbility>) -> Self {
        self.abilities = abilities;
        self
    }

    /// A card with no printed ability text.
    pub fn is_vanilla(&self) -> bool {
        self.full_text_sections
            .iter()
            .all(|section| section.trim().is_empty())
    }
}

#[cfg(feature = "serialization")]
#[derive(Debug, thiserror::Error)]
pub enum CardLoadError {
    #[error("malformed card JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(feature = "serialization")]
impl RawCard {
    /// Load a single card from the card database's JSON shape.
    pub fn from_json(json: &str) -> Result<Self, CardLoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a list of cards; accepts either a bare array or an object with a
    /// `cards` array.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, CardLoadError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum CardList {
            Bare(Vec<RawCard>),
            Wrapped { cards: Vec<RawCard> },
        }

        Ok(match serde_json::from_str(json)? {
            CardList::Bare(cards) | CardList::Wrapped { cards } => cards,
        })
    }
}

#[cfg(all(test, feature = "serialization"))]
mod tests {
    use super::*;

    #[test]
    fn test_card_loads_from_database_shape() {
        let json = r#"{
            "id": 7,
            "name": "Stitch",
            "fullName": "Stitch - Rock Star",
            "type": "Character",
            "cost": 6,
            "inkwell": true,
            "color": "Amber",
            "fullTextSections": ["Shift 4 (You may pay 4 ⬡ to play this on top of one of your characters named Stitch.)"],
            "abilities": [{"keyword": "Shift", "type": "keyword", "fullText": "Shift 4"}]
        }"#;

        let card = RawCard::from_json(json).expect("card should deserialize");
        assert_eq!(card.id, CardId::from_raw(7));
        assert_eq!(card.card_type, CardType::Character);
        assert_eq!(card.color, InkColor::Amber);
        assert_eq!(card.full_text_sections.len(), 1);
        assert_eq!(card.abilities[0].keyword.as_deref(), Some("Shift"));
        assert_eq!(card.abilities[0].kind.as_deref(), Some("keyword"));
    }

    #[test]
    fn test_unknown_color_and_missing_sections_default() {
        let json = r#"{"id": 1, "name": "Dinglehopper", "type": "Item", "color": "Amber-Steel"}"#;
        let card = RawCard::from_json(json).expect("card should deserialize");
        assert_eq!(card.color, InkColor::Other);
        assert!(card.is_vanilla());
    }

    #[test]
    fn test_list_accepts_wrapped_cards_array() {
        let json = r#"{"cards": [{"id": 1, "name": "A", "type": "Action"}, {"id": 2, "name": "B", "type": "Location"}]}"#;
        let cards = RawCard::list_from_json(json).expect("list should deserialize");
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].card_type, CardType::Location);
    }

    #[test]
    fn test_malformed_json_reports_load_error() {
        let err = RawCard::from_json("{not json").unwrap_err();
        assert!(err.to_string().starts_with("malformed card JSON"));
    }
}

use std::fmt;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Card identifier, as assigned by the card database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(transparent))]
pub struct CardId(pub u32);

/// Ability identifier: the owning card plus the position of the ability unit
/// the definition was built from.
///
/// Derived only from card identity and unit order, so reparsing the same card
/// text always yields the same ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct AbilityId {
    pub card: CardId,
    pub index: usize,
}

impl CardId {
    /// Create a card ID from a specific value.
    pub fn from_raw(id: u32) -> Self {
        Self(id)
    }
}

impl AbilityId {
    pub fn new(card: CardId, index: usize) -> Self {
        Self { card, index }
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.card, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_from_raw() {
        let c1 = CardId::from_raw(100);
        let c2 = CardId::from_raw(200);
        assert_ne!(c1, c2);
        assert_eq!(c1.0, 100);
        assert_eq!(c2.0, 200);
    }

    #[test]
    fn test_ability_id_display_includes_card_and_position() {
        let id = AbilityId::new(CardId::from_raw(42), 3);
        assert_eq!(id.to_string(), "42-3");
    }

    #[test]
    fn test_ability_id_orders_by_card_then_position() {
        let a = AbilityId::new(CardId::from_raw(1), 5);
        let b = AbilityId::new(CardId::from_raw(2), 0);
        let c = AbilityId::new(CardId::from_raw(2), 1);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_ability_ids_stay_distinct_past_u16_positions() {
        let card = CardId::from_raw(7);
        let last_small = AbilityId::new(card, usize::from(u16::MAX));
        let next = AbilityId::new(card, usize::from(u16::MAX) + 1);
        assert_ne!(last_small, next);
        assert!(last_small < next);
        assert_eq!(next.to_string(), "7-65536");
    }
}

//! Card-level entry points for the rules-text parser.
//!
//! Parsing is a pure function of the card's printed text: the same card
//! always yields the same abilities with the same ids, and cards can be
//! parsed independently on any number of threads.

pub mod builders;

pub use builders::CardTextError;

use crate::ability::AbilityDefinition;
use crate::card::RawCard;
use crate::ids::CardId;
use crate::types::CardType;

/// Parse every ability printed on `card`.
///
/// The author-supplied `abilities` list is ignored. A vanilla card yields an
/// empty list.
pub fn parse_card(card: &RawCard) -> Vec<AbilityDefinition> {
    if card.is_vanilla() {
        log::trace!("card {} ({}) has no ability text", card.id, card.name);
        return Vec::new();
    }
    parse_text_sections(card.id, &card.name, card.card_type, &card.full_text_sections)
}

/// Parse printed text sections for a card that is not held as a [`RawCard`].
pub fn parse_text_sections<S: AsRef<str>>(
    card_id: CardId,
    card_name: &str,
    card_type: CardType,
    sections: &[S],
) -> Vec<AbilityDefinition> {
    builders::parse_text_sections(card_id, card_name, card_type, sections)
}

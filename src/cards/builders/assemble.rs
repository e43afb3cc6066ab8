use super::*;

use crate::ids::AbilityId;

/// Parsed parts of one ability unit, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityDraft {
    pub category: AbilityCategory,
    pub raw_text: String,
    pub name: Option<String>,
    pub keyword: Option<Keyword>,
    pub keyword_value: Option<i32>,
    pub reminder_text: Option<String>,
    pub triggers: Vec<Trigger>,
    pub once_per_turn: bool,
    pub costs: Vec<Cost>,
    pub effects: Vec<Effect>,
}

/// Build the final definition for the unit at `index` of a card.
///
/// An empty effect list falls back to the printed text as a single `Custom`
/// effect. Any other structural defect is an upstream bug and fails a debug
/// assertion.
pub(super) fn assemble(card_id: CardId, index: usize, draft: AbilityDraft) -> AbilityDefinition {
    let mut effects = draft.effects;
    if effects.is_empty() {
        log::debug!(
            "card {card_id}: unit {index} produced no effects, keeping printed text"
        );
        effects.push(Effect::custom(draft.raw_text.clone()));
    }

    let ability = AbilityDefinition {
        id: AbilityId::new(card_id, index),
        card_id,
        category: draft.category,
        raw_text: draft.raw_text,
        name: draft.name,
        keyword: draft.keyword,
        keyword_value: draft.keyword_value,
        reminder_text: draft.reminder_text,
        triggers: draft.triggers,
        once_per_turn: draft.once_per_turn,
        costs: draft.costs,
        effects,
    };

    let checked = ability.validate();
    debug_assert!(checked.is_ok(), "{checked:?}");
    if let Err(violation) = checked {
        log::error!("{violation}");
    }
    if ability.needs_manual_review() {
        log::debug!("ability {} needs manual review: '{}'", ability.id, ability.raw_text);
    }
    ability
}

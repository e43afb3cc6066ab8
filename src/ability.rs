//! Ability definitions produced by the rules-text parser.
//!
//! Abilities come in three execution categories:
//! - Static: a standing modifier in effect whenever its (optional) condition holds
//! - Triggered: resolves in response to a game event
//! - Activated: the controller pays a cost to resolve it

use crate::cost::Cost;
use crate::effect::Effect;
use crate::ids::{AbilityId, CardId};
use crate::keywords::Keyword;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum AbilityCategory {
    Static,
    Triggered,
    Activated,
}

/// Game events a triggered ability can listen for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum TriggerEvent {
    Quests,
    Challenges,
    IsChallenged,
    /// The subject is played (enters play)
    Played,
    Banished,
    BanishedInChallenge,
    /// The subject banishes another character in a challenge
    BanishesInChallenge,
    Sings,
    DealtDamage,
    Exerted,
    Readied,
    DrawsCard,
    /// A card is put into the inkwell
    Inks,
    MovesToLocation,
    LeavesPlay,
    ReturnedToHand,
    /// An opponent chooses the subject for an action (Vanish)
    ChosenByOpponentAction,
    TurnStart,
    TurnEnd,
    Custom(String),
}

/// Whose action fires the trigger.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum TriggerSubject {
    This,
    You,
    Opponent,
    AnyPlayer,
    YourCharacters,
    YourOtherCharacters,
    OpposingCharacters,
    AnyCharacter,
    /// Printed subject, kept verbatim ("a song", "an item named …")
    Described(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Trigger {
    pub event: TriggerEvent,
    pub subject: TriggerSubject,
    /// Event clause as printed
    pub text: String,
}

impl Trigger {
    pub fn new(event: TriggerEvent, subject: TriggerSubject, text: impl Into<String>) -> Self {
        Self {
            event,
            subject,
            text: text.into(),
        }
    }
}

/// A complete, validated ability definition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct AbilityDefinition {
    pub id: AbilityId,
    pub card_id: CardId,
    pub category: AbilityCategory,
    /// Printed unit text, reminder text included
    pub raw_text: String,
    /// Printed ability name; absent for keywords and unnamed abilities
    pub name: Option<String>,
    pub keyword: Option<Keyword>,
    pub keyword_value: Option<i32>,
    pub reminder_text: Option<String>,
    /// Events that fire a triggered ability; empty for other categories
    pub triggers: Vec<Trigger>,
    /// "Once per turn" / "Once during your turn" limit
    pub once_per_turn: bool,
    pub costs: Vec<Cost>,
    pub effects: Vec<Effect>,
}

/// Structural defects in an assembled ability.
///
/// These indicate bugs in the parsing stages, never bad card text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("ability {0} has no effects")]
    NoEffects(AbilityId),
    #[error("ability {0} is {1:?} but carries costs")]
    CostsOnNonActivated(AbilityId, AbilityCategory),
    #[error("ability {0} is activated but has no costs")]
    ActivatedWithoutCosts(AbilityId),
    #[error("ability {0} is {1:?} but carries triggers")]
    TriggersOnNonTriggered(AbilityId, AbilityCategory),
    #[error("ability {0} is triggered but has no trigger event")]
    TriggeredWithoutTrigger(AbilityId),
    #[error("ability {0} has a keyword value but no keyword")]
    KeywordValueWithoutKeyword(AbilityId),
    #[error("ability {0} belongs to card {1} but its id names card {2}")]
    ForeignId(AbilityId, CardId, CardId),
}

impl AbilityDefinition {
    /// Check the structural invariants every emitted ability must satisfy.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if self.effects.is_empty() {
            return Err(InvariantViolation::NoEffects(self.id));
        }
        if self.id.card != self.card_id {
            return Err(InvariantViolation::ForeignId(
                self.id,
                self.card_id,
                self.id.card,
            ));
        }
        match self.category {
            AbilityCategory::Activated if self.costs.is_empty() => {
                return Err(InvariantViolation::ActivatedWithoutCosts(self.id));
            }
            AbilityCategory::Static | AbilityCategory::Triggered if !self.costs.is_empty() => {
                return Err(InvariantViolation::CostsOnNonActivated(
                    self.id,
                    self.category,
                ));
            }
            _ => {}
        }
        match self.category {
            AbilityCategory::Triggered if self.triggers.is_empty() => {
                return Err(InvariantViolation::TriggeredWithoutTrigger(self.id));
            }
            AbilityCategory::Static | AbilityCategory::Activated if !self.triggers.is_empty() => {
                return Err(InvariantViolation::TriggersOnNonTriggered(
                    self.id,
                    self.category,
                ));
            }
            _ => {}
        }
        if self.keyword.is_none() && self.keyword_value.is_some() {
            return Err(InvariantViolation::KeywordValueWithoutKeyword(self.id));
        }
        Ok(())
    }

    pub fn is_keyword(&self) -> bool {
        self.keyword.is_some()
    }

    /// True when any effect node (at any depth) is a raw-text fallback.
    pub fn needs_manual_review(&self) -> bool {
        self.effects
            .iter()
            .flat_map(Effect::iter)
            .any(Effect::is_fallback)
            || self.costs.iter().any(Cost::is_fallback)
    }
}

pub mod ability;
pub mod card;
pub mod cards;
pub mod cost;
pub mod effect;
pub mod ids;
pub mod keywords;
pub mod target;
pub mod types;

pub use ability::{
    AbilityCategory, AbilityDefinition, InvariantViolation, Trigger, TriggerEvent, TriggerSubject,
};
pub use card::{AuthoredAbility, RawCard};
#[cfg(feature = "serialization")]
pub use card::CardLoadError;
pub use cards::builders::{CardTextError, TextSpan};
pub use cards::{parse_card, parse_text_sections};
pub use cost::{Cost, CostKind};
pub use effect::{Amount, Condition, Effect, Join, PreventedAction, Until, Verb};
pub use ids::{AbilityId, CardId};
pub use keywords::{KEYWORD_REGISTRY, Keyword, KeywordSpec, ModifierShape};
pub use target::{Controller, ObjectFilter, ObjectKind, Target};
pub use types::{CardType, Glyph, InkColor, Resource, Stat};

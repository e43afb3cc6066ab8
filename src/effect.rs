//! Effect trees produced by the rules-text grammar.
//!
//! An effect is a verb applied to a target, with an optional amount, duration
//! and guarding condition. Effects nest: sequencing ("then"), alternation
//! ("or", "instead") and enabling sub-actions ("pay 2 {I} to draw a card") are
//! expressed as owned child effects tagged with a `Join`. The tree never
//! shares nodes.
//!
//! Amounts that depend on live state ("equal to their {S}", "for each item you
//! have in play") are kept as expressions, never evaluated here.

use crate::keywords::Keyword;
use crate::target::{ObjectFilter, Target};
use crate::types::{Resource, Stat};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Actions a "can't" restriction forbids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PreventedAction {
    Ready,
    Quest,
    Challenge,
    BeChallenged,
    Sing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Verb {
    Banish,
    ReturnToHand,
    Draw,
    GainResource(Resource),
    LoseResource(Resource),
    ModifyStat(Stat),
    DealDamage,
    /// Damage counters placed without being dealt
    PutDamage,
    RemoveDamage,
    Exert,
    Ready,
    Discard,
    Prevent(PreventedAction),
    GrantKeyword(Keyword),
    PutIntoInkwell,
    PayInk,
    /// Modal choice; the modes are `Or` children
    ChooseOne,
    /// Verbatim clause the grammar could not decompose
    Custom,
}

/// Numeric quantity of an effect.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Amount {
    Fixed(i32),
    /// "up to N"
    UpTo(i32),
    /// "equal to <expression>"
    EqualTo(String),
    /// "<per> for each <counted>"
    ForEach { per: i32, counted: String },
}

/// How long a continuous or temporary effect lasts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Until {
    #[default]
    Forever,
    ThisTurn,
    StartOfYourNextTurn,
    /// "during their next turn", "at the start of their next turn"
    TheirNextTurn,
    /// Any other "until <event>"
    Event(String),
}

/// Guard on an effect ("if …", "while …", "during …").
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Condition {
    YourTurn,
    OpponentsTurn,
    ThisIsExerted,
    ThisHasDamage,
    ThisIsChallenging,
    ThisIsAtLocation,
    /// You have at least `at_least` objects matching the filter in play
    YouHaveInPlay { filter: ObjectFilter, at_least: u32 },
    Text(String),
}

/// Relationship between an effect and its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Join {
    /// Children happen after the parent ("…, then …")
    Then,
    /// Exactly one of the children happens (modes, "or")
    Or,
    /// Children replace the parent when their condition holds
    Instead,
    /// Children happen only if the parent (an enabling sub-action) is done
    Enables,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Effect {
    pub verb: Verb,
    pub target: Target,
    pub amount: Option<Amount>,
    pub duration: Until,
    pub condition: Option<Condition>,
    /// "you may"
    pub optional: bool,
    /// Marks A in "do A to do B"
    pub enabling: bool,
    pub join: Option<Join>,
    pub children: Vec<Effect>,
    /// Source clause the effect was parsed from
    pub text: String,
}

impl Effect {
    pub fn new(verb: Verb, target: Target) -> Self {
        Self {
            verb,
            target,
            amount: None,
            duration: Until::Forever,
            condition: None,
            optional: false,
            enabling: false,
            join: None,
            children: Vec::new(),
            text: String::new(),
        }
    }

    /// Fallback node carrying a clause the grammar could not decompose.
    ///
    /// For a static ability this reads as "apply the printed text as a
    /// continuous modifier"; consumers should surface it for manual review.
    pub fn custom(text: impl Into<String>) -> Self {
        Self::new(Verb::Custom, Target::This).with_text(text)
    }

    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_duration(mut self, duration: Until) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Attach children under a join.
    ///
    /// Children joined the same way accumulate; a different join on a node
    /// that already has children wraps onto the last child instead so that no
    /// node mixes two relationships.
    pub fn attach(&mut self, join: Join, children: Vec<Effect>) {
        if children.is_empty() {
            return;
        }
        match self.join {
            None => {
                self.join = Some(join);
                self.children = children;
            }
            Some(existing) if existing == join => self.children.extend(children),
            Some(_) => match self.children.last_mut() {
                Some(last) => last.attach(join, children),
                None => {
                    self.join = Some(join);
                    self.children = children;
                }
            },
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.verb == Verb::Custom
    }

    /// Depth-first iterator over this node and all of its descendants.
    pub fn iter(&self) -> EffectIter<'_> {
        EffectIter { stack: vec![self] }
    }
}

pub struct EffectIter<'a> {
    stack: Vec<&'a Effect>,
}

impl<'a> Iterator for EffectIter<'a> {
    type Item = &'a Effect;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_same_join_accumulates_children() {
        let mut parent = Effect::new(Verb::Draw, Target::You);
        parent.attach(Join::Then, vec![Effect::new(Verb::Discard, Target::You)]);
        parent.attach(Join::Then, vec![Effect::new(Verb::Exert, Target::This)]);
        assert_eq!(parent.join, Some(Join::Then));
        assert_eq!(parent.children.len(), 2);
    }

    #[test]
    fn attach_different_join_nests_under_last_child() {
        let mut parent = Effect::new(Verb::PayInk, Target::You);
        parent.attach(Join::Enables, vec![Effect::new(Verb::Draw, Target::You)]);
        parent.attach(Join::Then, vec![Effect::new(Verb::Discard, Target::You)]);
        assert_eq!(parent.join, Some(Join::Enables));
        assert_eq!(parent.children.len(), 1);
        assert_eq!(parent.children[0].join, Some(Join::Then));
    }

    #[test]
    fn iter_visits_depth_first() {
        let mut root = Effect::new(Verb::ChooseOne, Target::You);
        root.attach(
            Join::Or,
            vec![
                Effect::new(Verb::Draw, Target::You),
                Effect::new(Verb::Banish, Target::chosen_character()),
            ],
        );
        let verbs: Vec<Verb> = root.iter().map(|effect| effect.verb).collect();
        assert_eq!(verbs, vec![Verb::ChooseOne, Verb::Draw, Verb::Banish]);
    }
}

//! Target descriptors for effects.
//!
//! A target is resolved by the rules engine at execution time; the parser only
//! records what the printed text asks for. Ownership ("of yours", "opposing")
//! and exclusivity ("another", "other") qualifiers are predicates on the
//! filter, never separate effects.

use crate::keywords::Keyword;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum ObjectKind {
    Character,
    Item,
    Location,
    Action,
    Song,
    /// A card in a non-play zone (hand, deck, discard)
    Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Controller {
    You,
    Opponent,
}

/// Predicate over game objects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ObjectFilter {
    /// Object must be one of these kinds (empty = any)
    pub kinds: Vec<ObjectKind>,
    pub controller: Option<Controller>,
    /// Excludes the source ("another", "other")
    pub other: bool,
    /// "with Evasive"
    pub keyword: Option<Keyword>,
    /// "named Mickey Mouse"
    pub named: Option<String>,
    /// Classification such as Hero, Villain, Princess
    pub classification: Option<String>,
    /// "with cost 3 or less"
    pub cost_at_most: Option<u32>,
    pub damaged: bool,
    pub exerted: bool,
    /// "your ready characters"
    pub ready: bool,
    /// "up to 2 chosen characters"
    pub up_to: Option<u32>,
}

impl ObjectFilter {
    pub fn character() -> Self {
        Self {
            kinds: vec![ObjectKind::Character],
            ..Default::default()
        }
    }

    pub fn opposing(mut self) -> Self {
        self.controller = Some(Controller::Opponent);
        self
    }

    pub fn yours(mut self) -> Self {
        self.controller = Some(Controller::You);
        self
    }

    pub fn other(mut self) -> Self {
        self.other = true;
        self
    }

    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        self.keyword = Some(keyword);
        self
    }
}

/// What an effect applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Target {
    /// The source of the ability
    This,
    /// The controlling player
    You,
    EachOpponent,
    EachPlayer,
    /// A single object (or up to N) chosen on resolution
    Chosen(ObjectFilter),
    /// Every object matching the filter
    All(ObjectFilter),
    /// An anaphoric or otherwise unresolved reference ("them", "that character")
    Reference(String),
}

impl Target {
    pub fn chosen_character() -> Self {
        Target::Chosen(ObjectFilter::character())
    }

    pub fn chosen_opposing_character() -> Self {
        Target::Chosen(ObjectFilter::character().opposing())
    }

    pub fn filter(&self) -> Option<&ObjectFilter> {
        match self {
            Target::Chosen(filter) | Target::All(filter) => Some(filter),
            _ => None,
        }
    }
}

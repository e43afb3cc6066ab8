//! Keyword ability registry.
//!
//! Keywords are a closed catalog: each entry records the printed name, the
//! execution category, whether a numeric modifier follows the name, the event
//! for inherently triggered keywords, and the canonical reminder text. Adding a
//! keyword is a single table row.
//!
//! Matching is on the header only ("Challenger +2", "Shift 5 {I}"). Whatever
//! parenthetical follows is captured as reminder text without checking its
//! wording against the canonical reminder.

use std::fmt;

use crate::ability::{AbilityCategory, TriggerEvent};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Shape of the numeric modifier printed after a keyword name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierShape {
    None,
    /// "Shift 5", "Singer 4"
    Number,
    /// "Challenger +2", "Resist +1"
    Signed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSpec {
    pub keyword: Keyword,
    pub name: &'static str,
    pub category: AbilityCategory,
    pub modifier: ModifierShape,
    pub trigger: Option<TriggerEvent>,
    pub reminder: &'static str,
}

macro_rules! define_keywords {
    ($($variant:ident => ($name:expr, $category:ident, $modifier:ident, $trigger:expr, $reminder:expr)),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
        pub enum Keyword {
            $($variant),*
        }

        pub static KEYWORD_REGISTRY: &[KeywordSpec] = &[
            $(KeywordSpec {
                keyword: Keyword::$variant,
                name: $name,
                category: AbilityCategory::$category,
                modifier: ModifierShape::$modifier,
                trigger: $trigger,
                reminder: $reminder,
            }),*
        ];
    };
}

define_keywords! {
    Alert => ("Alert", Static, None, None,
        "This character can challenge as if they had Evasive."),
    Bodyguard => ("Bodyguard", Static, None, None,
        "This character may enter play exerted. An opposing character who challenges one of your characters must choose one with Bodyguard if able."),
    Boost => ("Boost", Static, Number, None,
        "Once during your turn, you may pay N {I} to put the top card of your deck facedown under this character."),
    Challenger => ("Challenger", Static, Signed, None,
        "While challenging, this character gets +N {S}."),
    Evasive => ("Evasive", Static, None, None,
        "Only characters with Evasive can challenge this character."),
    Reckless => ("Reckless", Static, None, None,
        "This character can't quest and must challenge each turn if able."),
    Resist => ("Resist", Static, Signed, None,
        "Damage dealt to this character is reduced by N."),
    Rush => ("Rush", Static, None, None,
        "This character can challenge the turn they're played."),
    Shift => ("Shift", Static, Number, None,
        "You may pay N {I} to play this on top of one of your characters with the same name."),
    Singer => ("Singer", Static, Number, None,
        "This character counts as cost N to sing songs."),
    SingTogether => ("Sing Together", Static, Number, None,
        "Any number of your or your teammates' characters with total cost N or more may {E} to sing this song for free."),
    Support => ("Support", Triggered, None, Some(TriggerEvent::Quests),
        "Whenever this character quests, you may add their {S} to another chosen character's {S} this turn."),
    Vanish => ("Vanish", Triggered, None, Some(TriggerEvent::ChosenByOpponentAction),
        "When an opponent chooses this character for an action, banish them."),
    Ward => ("Ward", Static, None, None,
        "Opponents can't choose this character except to challenge."),
}

impl Keyword {
    pub fn spec(self) -> &'static KeywordSpec {
        // Rows are emitted in variant order by `define_keywords!`.
        &KEYWORD_REGISTRY[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Look up a keyword by printed name, ignoring case ("gains evasive").
pub fn lookup(name: &str) -> Option<&'static KeywordSpec> {
    KEYWORD_REGISTRY
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name.trim()))
}

/// A keyword header at the start of some text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    pub spec: &'static KeywordSpec,
    pub value: Option<i32>,
    /// Reminder text without its parentheses
    pub reminder: Option<String>,
    /// Byte offset just past the header and reminder
    pub end: usize,
}

/// A unit that is exactly one keyword ability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch {
    pub spec: &'static KeywordSpec,
    pub value: Option<i32>,
    pub reminder: Option<String>,
}

/// Match a keyword header (name, modifier, optional reminder) at the start of
/// `text`. Names are case-sensitive and must end at a word boundary.
pub fn match_header(text: &str) -> Option<HeaderMatch> {
    let spec = KEYWORD_REGISTRY
        .iter()
        .filter(|spec| {
            text.strip_prefix(spec.name).is_some_and(|rest| {
                rest.chars()
                    .next()
                    .is_none_or(|ch| ch.is_whitespace() || ch == '(')
            })
        })
        .max_by_key(|spec| spec.name.len())?;

    let mut idx = spec.name.len();
    let value = match spec.modifier {
        ModifierShape::None => None,
        ModifierShape::Number | ModifierShape::Signed => {
            let (value, used) = parse_modifier(&text[idx..], spec.modifier)?;
            idx += used;
            Some(value)
        }
    };

    if value.is_some() {
        let rest = &text[idx..];
        let trimmed = rest.trim_start();
        if let Some(after) = trimmed.strip_prefix("{I}") {
            idx += rest.len() - after.len();
        }
    }

    let rest = &text[idx..];
    let trimmed = rest.trim_start();
    let mut reminder = None;
    if trimmed.starts_with('(') {
        let open = idx + (rest.len() - trimmed.len());
        let close = matching_paren(text, open)?;
        reminder = Some(text[open + 1..close].trim().to_string());
        idx = close + 1;
    }

    Some(HeaderMatch {
        spec,
        value,
        reminder,
        end: idx,
    })
}

/// Match a whole ability unit against the registry. Text after the reminder
/// means the unit is not (only) a keyword.
pub fn match_keyword(unit: &str) -> Option<KeywordMatch> {
    let unit = unit.trim();
    let header = match_header(unit)?;
    let trailing = unit[header.end..].trim();
    if !trailing.is_empty() && trailing != "." {
        return None;
    }
    Some(KeywordMatch {
        spec: header.spec,
        value: header.value,
        reminder: header.reminder,
    })
}

fn parse_modifier(text: &str, shape: ModifierShape) -> Option<(i32, usize)> {
    let trimmed = text.trim_start();
    let lead = text.len() - trimmed.len();
    if lead == 0 {
        return None;
    }

    let mut sign = 1;
    let mut start = 0;
    if let Some(ch) = trimmed.chars().next()
        && (ch == '+' || ch == '-')
    {
        if shape == ModifierShape::Number {
            return None;
        }
        if ch == '-' {
            sign = -1;
        }
        start = 1;
    }

    let digits_end = trimmed[start..]
        .find(|ch: char| !ch.is_ascii_digit())
        .map_or(trimmed.len(), |offset| start + offset);
    let digits = &trimmed[start..digits_end];
    let value = digits.parse::<i32>().ok()?;
    Some((sign * value, lead + digits_end))
}

/// Byte index of the `)` closing the `(` at `open`.
pub(crate) fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, ch) in text[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

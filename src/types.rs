#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum CardType {
    Character,
    Action,
    Item,
    Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(from = "String"))]
pub enum InkColor {
    Amber,
    Amethyst,
    Emerald,
    Ruby,
    Sapphire,
    Steel,
    // Dual-ink and unreleased colors
    #[default]
    Other,
}

impl From<&str> for InkColor {
    fn from(value: &str) -> Self {
        match value.trim() {
            "Amber" => InkColor::Amber,
            "Amethyst" => InkColor::Amethyst,
            "Emerald" => InkColor::Emerald,
            "Ruby" => InkColor::Ruby,
            "Sapphire" => InkColor::Sapphire,
            "Steel" => InkColor::Steel,
            _ => InkColor::Other,
        }
    }
}

impl From<String> for InkColor {
    fn from(value: String) -> Self {
        InkColor::from(value.as_str())
    }
}

/// Game symbols printed inline in rules text.
///
/// Every spelling the card data uses for a symbol is folded into one canonical
/// tag by the normalizer (`{E}`, `{I}`, `{S}`, `{W}`, `{L}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Glyph {
    Exert,
    Ink,
    Strength,
    Willpower,
    Lore,
}

impl Glyph {
    pub const ALL: [Glyph; 5] = [
        Glyph::Exert,
        Glyph::Ink,
        Glyph::Strength,
        Glyph::Willpower,
        Glyph::Lore,
    ];

    /// The canonical tag the normalizer emits for this glyph.
    pub fn tag(self) -> &'static str {
        match self {
            Glyph::Exert => "{E}",
            Glyph::Ink => "{I}",
            Glyph::Strength => "{S}",
            Glyph::Willpower => "{W}",
            Glyph::Lore => "{L}",
        }
    }

    pub fn from_tag_letter(letter: char) -> Option<Self> {
        match letter {
            'E' => Some(Glyph::Exert),
            'I' => Some(Glyph::Ink),
            'S' => Some(Glyph::Strength),
            'W' => Some(Glyph::Willpower),
            'L' => Some(Glyph::Lore),
            _ => None,
        }
    }

    /// Printed symbols used for this glyph in card exports.
    pub fn symbols(self) -> &'static [char] {
        match self {
            Glyph::Exert => &['⟳', '↷'],
            Glyph::Ink => &['⬡'],
            Glyph::Strength => &['¤'],
            Glyph::Willpower => &['⛉'],
            Glyph::Lore => &['◊', '⟡'],
        }
    }

    /// Brace-tag spellings (matched case-insensitively, without the braces).
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Glyph::Exert => &["e", "exert"],
            Glyph::Ink => &["i", "ink"],
            Glyph::Strength => &["s", "strength"],
            Glyph::Willpower => &["w", "willpower"],
            Glyph::Lore => &["l", "lore"],
        }
    }
}

/// Character statistics that effects can modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Stat {
    Strength,
    Willpower,
    Lore,
}

impl Stat {
    pub fn from_glyph(glyph: Glyph) -> Option<Self> {
        match glyph {
            Glyph::Strength => Some(Stat::Strength),
            Glyph::Willpower => Some(Stat::Willpower),
            Glyph::Lore => Some(Stat::Lore),
            Glyph::Exert | Glyph::Ink => None,
        }
    }
}

/// Player-level counters that effects gain or lose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Resource {
    Lore,
    Ink,
}

use super::*;

/// A non-keyword ability unit split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedUnit {
    pub category: AbilityCategory,
    pub name: Option<String>,
    pub once_per_turn: bool,
    /// Text before the em dash of an activated ability
    pub cost_clause: Option<String>,
    /// Trigger event clause, or the condition clause of a "While"/"During" static
    pub lead_clause: Option<String>,
    pub effect_clause: String,
}

/// Structural cue a classifier rule looks for at the start of the residual.
#[derive(Debug, Clone, Copy)]
enum Cue {
    /// Cost-looking clause followed by a top-level em dash
    CostThenDash,
    /// One of the lead phrases, followed by a clause ending at the first top-level comma
    Lead(&'static [&'static str]),
    Always,
}

struct ClassifierRule {
    cue: Cue,
    category: AbilityCategory,
}

/// First match wins.
const CLASSIFIER_RULES: &[ClassifierRule] = &[
    ClassifierRule {
        cue: Cue::CostThenDash,
        category: AbilityCategory::Activated,
    },
    ClassifierRule {
        cue: Cue::Lead(&["Whenever", "When", "At the start of", "At the end of"]),
        category: AbilityCategory::Triggered,
    },
    ClassifierRule {
        cue: Cue::Lead(&["While", "During"]),
        category: AbilityCategory::Static,
    },
    ClassifierRule {
        cue: Cue::Always,
        category: AbilityCategory::Static,
    },
];

const ONCE_PER_TURN_PREFIXES: &[&str] = &["Once per turn,", "Once during your turn,"];

/// Words that can follow a Title-Case ability name.
const NAME_FOLLOWERS: &[&str] = &["Whenever", "When", "While", "During"];

/// Lowercase words allowed inside a Title-Case name ("Fan the Flames").
const NAME_CONNECTIVES: &[&str] = &["of", "the", "a", "an", "to", "and", "in", "on", "for"];

struct CueSplit<'a> {
    cost: Option<&'a str>,
    lead: Option<&'a str>,
    effect: &'a str,
}

impl Cue {
    fn split(self, residual: &str) -> Option<CueSplit<'_>> {
        match self {
            Cue::CostThenDash => {
                let dash = top_level_chars(residual)
                    .find(|&(_, ch, depth)| ch == '—' && depth == 0)
                    .map(|(idx, _, _)| idx)?;
                let cost = residual[..dash].trim();
                if cost.is_empty() || !looks_like_cost(cost) {
                    return None;
                }
                Some(CueSplit {
                    cost: Some(cost),
                    lead: None,
                    effect: residual[dash + '—'.len_utf8()..].trim(),
                })
            }
            Cue::Lead(phrases) => {
                phrases.iter().find(|phrase| starts_with_phrase(residual, phrase))?;
                let (lead, effect) = split_at_top_level_comma(residual);
                Some(CueSplit {
                    cost: None,
                    lead: Some(lead),
                    effect,
                })
            }
            Cue::Always => Some(CueSplit {
                cost: None,
                lead: None,
                effect: residual,
            }),
        }
    }
}

/// Classify one non-keyword ability unit. Always succeeds; the last rule
/// accepts anything as a static ability.
pub fn classify(unit: &str) -> ClassifiedUnit {
    let unit = unit.trim();
    let (name, residual) = split_ability_name(unit);

    let mut residual = residual;
    let mut once_per_turn = false;
    for prefix in ONCE_PER_TURN_PREFIXES {
        if let Some(rest) = strip_prefix_ignore_case(residual, prefix) {
            residual = rest.trim_start();
            once_per_turn = true;
            break;
        }
    }

    for rule in CLASSIFIER_RULES {
        if let Some(split) = rule.cue.split(residual) {
            log::trace!("classified {:?} as {:?}", unit, rule.category);
            return ClassifiedUnit {
                category: rule.category,
                name,
                once_per_turn,
                cost_clause: split.cost.map(str::to_string),
                lead_clause: split.lead.map(str::to_string),
                effect_clause: split.effect.to_string(),
            };
        }
    }

    ClassifiedUnit {
        category: AbilityCategory::Static,
        name,
        once_per_turn,
        cost_clause: None,
        lead_clause: None,
        effect_clause: residual.to_string(),
    }
}

/// Split a leading ability name off the unit.
///
/// An ALL-CAPS run is always a name. A Title-Case run is only taken as a name
/// when it is directly followed by a lead word or a cost, since ordinary
/// sentences also start with a capital.
fn split_ability_name(unit: &str) -> (Option<String>, &str) {
    if let Some(end) = leading_caps_name(unit) {
        return (Some(unit[..end].trim().to_string()), unit[end..].trim_start());
    }

    let mut offset = 0usize;
    let mut name_end: Option<usize> = None;
    while let Some(rest) = unit.get(offset..).filter(|rest| !rest.is_empty()) {
        if let Some(end) = name_end
            && (starts_name_follower(rest) || starts_cost(rest))
        {
            return (Some(unit[..end].trim().to_string()), rest);
        }
        let word = rest.split(' ').next().unwrap_or_default();
        let title_case = word.chars().next().is_some_and(char::is_uppercase)
            && !word.starts_with('{')
            && !word.ends_with([',', '.', ':', ';', '!', '?']);
        let connective = name_end.is_some() && NAME_CONNECTIVES.contains(&word);
        if !(title_case || connective) || starts_name_follower(rest) {
            break;
        }
        name_end = Some(offset + word.len());
        offset += word.len() + 1;
    }
    (None, unit)
}

fn starts_name_follower(text: &str) -> bool {
    NAME_FOLLOWERS
        .iter()
        .any(|word| starts_with_phrase(text, word))
        || starts_with_phrase(text, "At the start of")
        || starts_with_phrase(text, "At the end of")
        || ONCE_PER_TURN_PREFIXES
            .iter()
            .any(|prefix| strip_prefix_ignore_case(text, prefix).is_some())
}

fn starts_cost(text: &str) -> bool {
    let tokens = tokenize_clause(text);
    match tokens.as_slice() {
        [Token::Symbol(Glyph::Exert, _), ..] => true,
        [Token::Word(word, _, _), Token::Symbol(Glyph::Ink, _), ..] => {
            parse_number_word(word).is_some()
        }
        _ => false,
    }
}

/// Whether the text before an em dash reads as an activation cost.
fn looks_like_cost(clause: &str) -> bool {
    let tokens = tokenize_clause(clause);
    let Some(first_atom) = split_on_comma(&tokens).into_iter().next() else {
        return false;
    };
    if starts_cost(&phrase_text(&first_atom)) {
        return true;
    }
    matches!(
        first_atom.first().and_then(Token::as_word),
        Some("banish" | "discard" | "exert" | "pay" | "choose" | "remove" | "put" | "return")
    )
}

/// Case-insensitive prefix match ending at a word boundary.
fn starts_with_phrase(text: &str, phrase: &str) -> bool {
    strip_prefix_ignore_case(text, phrase).is_some_and(|rest| {
        rest.chars()
            .next()
            .is_none_or(|ch| !ch.is_alphanumeric())
    })
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}

fn split_at_top_level_comma(text: &str) -> (&str, &str) {
    match top_level_chars(text).find(|&(_, ch, depth)| ch == ',' && depth == 0) {
        Some((idx, _, _)) => (text[..idx].trim(), text[idx + 1..].trim()),
        None => (text.trim(), ""),
    }
}

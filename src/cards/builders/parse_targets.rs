use super::*;

use crate::target::{Controller, ObjectKind};

/// Words that shape a target phrase but never name a classification.
const FILTER_WORDS: &[&str] = &[
    "a", "an", "the", "all", "each", "chosen", "another", "other", "your", "yours", "opposing",
    "one", "of", "this", "that", "their", "his", "her", "its", "any", "damaged", "exerted",
    "ready",
];

/// Words that stand for an object named earlier in the text.
const REFERENCE_WORDS: &[&str] = &[
    "they", "them", "it", "him", "her", "that", "those", "the", "same", "their", "his", "its",
    "character", "characters", "item", "items", "location", "locations",
];

/// Resolve a target phrase.
///
/// Selection words pick the descriptor ("chosen", "up to N" and a leading
/// article choose; "all", "each" and bare plurals select every match). The
/// remaining words become filter predicates. Pronouns and "that character"
/// are kept as a reference. A word the filter grammar does not know is an
/// error, so the caller keeps the printed text instead of a wider target.
pub(super) fn parse_target(tokens: &[Token]) -> Result<Target, CardTextError> {
    let tokens = trim_commas(tokens);
    let words = words(tokens);
    if words.is_empty() {
        return Err(CardTextError::ParseError(format!(
            "missing target (clause: '{}')",
            phrase_text(tokens)
        )));
    }

    match words.as_slice() {
        ["this", "character" | "item" | "location" | "card"] | ["itself"] => {
            return Ok(Target::This);
        }
        ["you"] | ["yourself"] => return Ok(Target::You),
        ["each", "opponent"] | ["each", "opponents"] | ["opponents"] | ["your", "opponents"] => {
            return Ok(Target::EachOpponent);
        }
        ["each", "player"] | ["all", "players"] | ["players"] => return Ok(Target::EachPlayer),
        _ => {}
    }

    let references_earlier = words.first().is_some_and(|word| {
        matches!(*word, "they" | "them" | "it" | "him" | "her" | "that" | "those")
    }) || words.as_slice() == ["the", "same", "character"];
    if references_earlier {
        if words.iter().all(|word| REFERENCE_WORDS.contains(word)) {
            return Ok(Target::Reference(phrase_text(tokens)));
        }
        return Err(CardTextError::UnsupportedLine(format!(
            "unsupported reference (clause: '{}')",
            phrase_text(tokens)
        )));
    }

    let mut chosen = false;
    let mut every = false;
    for (idx, word) in words.iter().enumerate() {
        match *word {
            "chosen" | "a" | "an" => chosen = true,
            "all" | "each" => every = true,
            "up" if words.get(idx + 1) == Some(&"to") => chosen = true,
            "one" if words.get(idx + 1) == Some(&"of") => chosen = true,
            _ => {}
        }
    }

    let filter = parse_object_filter(tokens)?;
    let recognized = !filter.kinds.is_empty()
        || filter.controller.is_some()
        || filter.named.is_some()
        || filter.keyword.is_some()
        || filter.classification.is_some();
    if !recognized {
        return Err(CardTextError::UnsupportedLine(format!(
            "target names no object (clause: '{}')",
            phrase_text(tokens)
        )));
    }

    if chosen && !every {
        return Ok(Target::Chosen(filter));
    }
    if every || has_plural_kind(&words) {
        return Ok(Target::All(filter));
    }
    if words.iter().any(|word| matches!(*word, "that" | "the")) {
        return Ok(Target::Reference(phrase_text(tokens)));
    }
    Ok(Target::Chosen(filter))
}

/// Resolve the player a player-level verb ("draws", "loses", "discards")
/// applies to. An empty subject is the controller.
pub(super) fn parse_player(tokens: &[Token]) -> Target {
    let words: Vec<&str> = words(tokens)
        .into_iter()
        .filter(|word| !matches!(*word, "may" | "choose" | "chooses" | "and" | "then"))
        .collect();
    match words.as_slice() {
        [] | ["you"] => Target::You,
        ["each", "opponent"] | ["opponents"] | ["each", "of", "your", "opponents"] => {
            Target::EachOpponent
        }
        ["each", "player"] | ["all", "players"] => Target::EachPlayer,
        _ => parse_target(tokens).unwrap_or_else(|_| Target::Reference(phrase_text(tokens))),
    }
}

/// Collect filter predicates from a target phrase.
///
/// Every word must be a selection word, a predicate or part of one; the
/// first word that is neither fails the phrase.
pub(super) fn parse_object_filter(tokens: &[Token]) -> Result<ObjectFilter, CardTextError> {
    let mut filter = ObjectFilter::default();
    let mut saw_card = false;
    let mut idx = 0usize;

    while idx < tokens.len() {
        let word = match &tokens[idx] {
            Token::Word(word, _, _) => word.as_str(),
            Token::Comma(_) => {
                idx += 1;
                continue;
            }
            other => {
                return Err(unknown_filter_word(tokens, &phrase_text(std::slice::from_ref(other))));
            }
        };
        let next = tokens.get(idx + 1).and_then(Token::as_word);

        match word {
            "your" | "yours" => filter.controller = Some(Controller::You),
            "you" if next == Some("control") => {
                filter.controller = Some(Controller::You);
                idx += 1;
            }
            "opposing" | "opponents" => filter.controller = Some(Controller::Opponent),
            "opponent" if next.is_some_and(|next| kind_for_word(next).is_some()) => {
                filter.controller = Some(Controller::Opponent)
            }
            "other" | "another" => filter.other = true,
            "damaged" => filter.damaged = true,
            "exerted" => filter.exerted = true,
            "ready" => filter.ready = true,
            "up" if next == Some("to") => {
                let count = tokens
                    .get(idx + 2)
                    .and_then(Token::as_word)
                    .and_then(parse_number_word)
                    .ok_or_else(|| unknown_filter_word(tokens, "up to"))?;
                filter.up_to = Some(count);
                idx += 3;
                continue;
            }
            "with" => {
                let consumed = parse_with_clause(&tokens[idx + 1..], &mut filter)
                    .ok_or_else(|| unknown_filter_word(tokens, "with"))?;
                idx += consumed + 1;
                continue;
            }
            "named" => {
                let name = named_phrase(&tokens[idx + 1..]);
                if name.is_empty() {
                    return Err(unknown_filter_word(tokens, "named"));
                }
                idx += 1 + name.split(' ').count();
                filter.named = Some(name);
                continue;
            }
            "in" if next == Some("play") => idx += 1,
            "card" | "cards" => saw_card = true,
            "or" | "and" => {}
            _ if FILTER_WORDS.contains(&word) => {}
            _ => {
                if let Some(kind) = kind_for_word(word) {
                    if !filter.kinds.contains(&kind) {
                        filter.kinds.push(kind);
                    }
                } else if is_classification(&tokens[idx], next) {
                    filter.classification = tokens[idx].as_raw_word().map(str::to_string);
                } else {
                    return Err(unknown_filter_word(tokens, word));
                }
            }
        }
        idx += 1;
    }

    if saw_card && filter.kinds.is_empty() {
        filter.kinds.push(ObjectKind::Card);
    }
    Ok(filter)
}

fn unknown_filter_word(tokens: &[Token], word: &str) -> CardTextError {
    CardTextError::UnsupportedLine(format!(
        "unsupported filter word '{word}' (clause: '{}')",
        phrase_text(tokens)
    ))
}

pub(super) fn kind_for_word(word: &str) -> Option<ObjectKind> {
    let kind = match word {
        "character" | "characters" => ObjectKind::Character,
        "item" | "items" => ObjectKind::Item,
        "location" | "locations" => ObjectKind::Location,
        "action" | "actions" => ObjectKind::Action,
        "song" | "songs" => ObjectKind::Song,
        _ => return None,
    };
    Some(kind)
}

fn has_plural_kind(words: &[&str]) -> bool {
    words.iter().any(|word| {
        matches!(
            *word,
            "characters" | "items" | "locations" | "actions" | "songs" | "cards"
        )
    })
}

/// "with Evasive", "with cost 3 or less". Returns the number of tokens used.
fn parse_with_clause(tokens: &[Token], filter: &mut ObjectFilter) -> Option<usize> {
    let first = tokens.first()?;
    if first.is_word("cost") {
        let (value, _) = parse_number(&tokens[1..])?;
        filter.cost_at_most = Some(value);
        let mut used = 2;
        if tokens.get(2).is_some_and(|token| token.is_word("or"))
            && tokens.get(3).is_some_and(|token| token.is_word("less"))
        {
            used += 2;
        }
        return Some(used);
    }

    let (spec, used) = keyword_at(tokens)?;
    filter.keyword = Some(spec.keyword);
    Some(used)
}

/// Printed name after "named", up to the next punctuation or joining word.
fn named_phrase(tokens: &[Token]) -> String {
    let mut parts = Vec::new();
    for token in tokens {
        match token {
            Token::Word(word, raw, _) => {
                if matches!(word.as_str(), "or" | "and" | "with" | "in" | "from" | "to" | "this")
                    && !parts.is_empty()
                {
                    break;
                }
                parts.push(raw.as_str());
            }
            _ => break,
        }
    }
    parts.join(" ")
}

/// A capitalized word directly before a kind word ("Villain characters").
fn is_classification(token: &Token, next: Option<&str>) -> bool {
    let (Some(word), Some(raw)) = (token.as_word(), token.as_raw_word()) else {
        return false;
    };
    raw.chars().next().is_some_and(char::is_uppercase)
        && !FILTER_WORDS.contains(&word)
        && keywords::lookup(raw).is_none()
        && next.is_some_and(|next| kind_for_word(next).is_some())
}

use super::*;

use crate::ability::TriggerEvent;

/// Event phrases, most specific first. The first pattern found anywhere in
/// the clause decides the event; the words before it name the subject.
const EVENT_PATTERNS: &[(&[&str], TriggerEvent)] = &[
    (&["is", "banished", "in", "a", "challenge"], TriggerEvent::BanishedInChallenge),
    (&["are", "banished", "in", "a", "challenge"], TriggerEvent::BanishedInChallenge),
    (&["banishes"], TriggerEvent::BanishesInChallenge),
    (&["is", "banished"], TriggerEvent::Banished),
    (&["are", "banished"], TriggerEvent::Banished),
    (&["is", "challenged"], TriggerEvent::IsChallenged),
    (&["challenges"], TriggerEvent::Challenges),
    (&["quests"], TriggerEvent::Quests),
    (&["quest"], TriggerEvent::Quests),
    (&["sings"], TriggerEvent::Sings),
    (&["sing"], TriggerEvent::Sings),
    (&["is", "dealt", "damage"], TriggerEvent::DealtDamage),
    (&["are", "dealt", "damage"], TriggerEvent::DealtDamage),
    (&["is", "exerted"], TriggerEvent::Exerted),
    (&["exerts"], TriggerEvent::Exerted),
    (&["is", "readied"], TriggerEvent::Readied),
    (&["readies"], TriggerEvent::Readied),
    (&["inkwell"], TriggerEvent::Inks),
    (&["draws"], TriggerEvent::DrawsCard),
    (&["draw"], TriggerEvent::DrawsCard),
    (&["moves"], TriggerEvent::MovesToLocation),
    (&["move"], TriggerEvent::MovesToLocation),
    (&["leaves", "play"], TriggerEvent::LeavesPlay),
    (&["returned", "to"], TriggerEvent::ReturnedToHand),
    (&["plays"], TriggerEvent::Played),
    (&["play"], TriggerEvent::Played),
];

/// Parse the event clause of a triggered ability ("Whenever this character
/// quests"). "X and whenever Y" yields one trigger per alternative; an
/// unrecognized event is kept as `TriggerEvent::Custom`.
pub fn parse_trigger_clause(clause: &str) -> Vec<Trigger> {
    let tokens = tokenize_clause(clause);
    let mut triggers: Vec<Trigger> = split_alternatives(&tokens)
        .iter()
        .map(|part| parse_single_trigger(part))
        .collect();

    if triggers.is_empty() {
        triggers.push(Trigger::new(
            TriggerEvent::Custom(clause.trim().to_string()),
            TriggerSubject::Described(clause.trim().to_string()),
            clause.trim(),
        ));
    }
    triggers
}

/// Split on "and whenever" / "or when", dropping the lead words.
fn split_alternatives(tokens: &[Token]) -> Vec<Vec<Token>> {
    let mut parts = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    for (idx, token) in tokens.iter().enumerate() {
        let is_lead = token.is_word("whenever") || token.is_word("when");
        if is_lead {
            if let Some(last) = current.last()
                && (last.is_word("and") || last.is_word("or"))
            {
                current.pop();
            }
            if !trim_commas(&current).is_empty() {
                parts.push(std::mem::take(&mut current));
            }
            current.clear();
            continue;
        }
        if idx == 0 && token.is_word("at") {
            continue;
        }
        current.push(token.clone());
    }
    if !trim_commas(&current).is_empty() {
        parts.push(current);
    }
    parts
}

fn parse_single_trigger(tokens: &[Token]) -> Trigger {
    let tokens = trim_commas(tokens);
    let text = phrase_text(tokens);

    if let Some(trigger) = parse_turn_boundary(tokens, &text) {
        return trigger;
    }

    for (pattern, event) in EVENT_PATTERNS {
        let Some(start) = find_words(tokens, pattern) else {
            continue;
        };
        let subject = match event {
            TriggerEvent::Played => played_subject(&tokens[start + pattern.len()..]),
            TriggerEvent::Inks => {
                let end = tokens
                    .iter()
                    .position(|token| token.is_word("put"))
                    .unwrap_or(start);
                trigger_subject(&tokens[..end])
            }
            _ => trigger_subject(&tokens[..start]),
        };
        return Trigger::new(event.clone(), subject, text);
    }

    log::debug!("unrecognized trigger event: '{text}'");
    Trigger::new(
        TriggerEvent::Custom(text.clone()),
        TriggerSubject::Described(text.clone()),
        text,
    )
}

/// "the start of your turn", "the end of each opponent's turn"
fn parse_turn_boundary(tokens: &[Token], text: &str) -> Option<Trigger> {
    let words = words(tokens);
    let (event, rest) = match words.as_slice() {
        ["the", "start", "of", rest @ ..] => (TriggerEvent::TurnStart, rest),
        ["the", "end", "of", rest @ ..] => (TriggerEvent::TurnEnd, rest),
        _ => return None,
    };
    let subject = match rest {
        ["your", "turn"] => TriggerSubject::You,
        ["each", "opponents", "turn"] | ["an", "opponents", "turn"] | ["opponents", "turn"] => {
            TriggerSubject::Opponent
        }
        ["each", "turn"] | ["each", "players", "turn"] => TriggerSubject::AnyPlayer,
        _ => TriggerSubject::Described(text.to_string()),
    };
    Some(Trigger::new(event, subject, text))
}

fn trigger_subject(tokens: &[Token]) -> TriggerSubject {
    let words: Vec<&str> = words(tokens)
        .into_iter()
        .filter(|word| !is_article(word))
        .collect();
    match words.as_slice() {
        [] | ["this", _] | ["he" | "she" | "they" | "it"] => TriggerSubject::This,
        ["you"] => TriggerSubject::You,
        ["opponent"] | ["each", "opponent"] => TriggerSubject::Opponent,
        ["player"] | ["any", "player"] => TriggerSubject::AnyPlayer,
        ["one", "of", "your", "other", "characters"]
        | ["your", "other", "characters"]
        | ["another", "character", "of", "yours"] => TriggerSubject::YourOtherCharacters,
        ["one", "of", "your", "characters"]
        | ["your", "characters"]
        | ["character", "of", "yours"] => TriggerSubject::YourCharacters,
        ["opposing", "character"]
        | ["opposing", "characters"]
        | ["one", "of", "opponents", "characters"]
        | ["one", "of", "your", "opponents", "characters"] => TriggerSubject::OpposingCharacters,
        ["character"] | ["any", "character"] => TriggerSubject::AnyCharacter,
        _ => TriggerSubject::Described(phrase_text(tokens)),
    }
}

/// For "you play X", the subject is the object played.
fn played_subject(tokens: &[Token]) -> TriggerSubject {
    let words = words(tokens);
    match words.as_slice() {
        ["this", _, ..] => TriggerSubject::This,
        _ if words.is_empty() => TriggerSubject::This,
        _ => TriggerSubject::Described(phrase_text(tokens)),
    }
}

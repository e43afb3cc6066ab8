use super::*;

use super::parse_targets::{kind_for_word, parse_object_filter, parse_player, parse_target};
use crate::effect::{Condition, Join, PreventedAction};
use crate::types::Resource;

const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROWTH: usize = 1024 * 1024;

/// Verb words the effect grammar recognizes, in both imperative and third
/// person forms. Apostrophes are dropped by the tokenizer ("can't" -> "cant").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VerbWord {
    Banish,
    Return,
    Draw,
    Gain,
    Lose,
    Deal,
    Get,
    Exert,
    Ready,
    Discard,
    Cant,
    Remove,
    Put,
    Pay,
}

const VERB_TABLE: &[(&str, VerbWord)] = &[
    ("banish", VerbWord::Banish),
    ("return", VerbWord::Return),
    ("returns", VerbWord::Return),
    ("draw", VerbWord::Draw),
    ("draws", VerbWord::Draw),
    ("gain", VerbWord::Gain),
    ("gains", VerbWord::Gain),
    ("lose", VerbWord::Lose),
    ("loses", VerbWord::Lose),
    ("deal", VerbWord::Deal),
    ("deals", VerbWord::Deal),
    ("get", VerbWord::Get),
    ("gets", VerbWord::Get),
    ("exert", VerbWord::Exert),
    ("ready", VerbWord::Ready),
    ("discard", VerbWord::Discard),
    ("discards", VerbWord::Discard),
    ("cant", VerbWord::Cant),
    ("remove", VerbWord::Remove),
    ("put", VerbWord::Put),
    ("puts", VerbWord::Put),
    ("pay", VerbWord::Pay),
    ("pays", VerbWord::Pay),
];

/// Durations recognized at the end of a clause, longest first.
const DURATION_SUFFIXES: &[(&[&str], Until)] = &[
    (&["for", "the", "rest", "of", "this", "turn"], Until::ThisTurn),
    (&["until", "the", "start", "of", "your", "next", "turn"], Until::StartOfYourNextTurn),
    (&["until", "the", "start", "of", "their", "next", "turn"], Until::TheirNextTurn),
    (&["at", "the", "start", "of", "their", "next", "turn"], Until::TheirNextTurn),
    (&["during", "their", "next", "turn"], Until::TheirNextTurn),
    (&["this", "turn"], Until::ThisTurn),
];

fn verb_word(word: &str) -> Option<VerbWord> {
    VERB_TABLE
        .iter()
        .find(|(text, _)| *text == word)
        .map(|(_, verb)| *verb)
}

/// First verb in `tokens`. "ready" and "exert" directly before a kind word
/// describe the subject ("your ready characters") and are skipped.
fn find_verb(tokens: &[Token]) -> Option<(VerbWord, usize)> {
    tokens.iter().enumerate().find_map(|(idx, token)| {
        let verb = token.as_word().and_then(verb_word)?;
        let describes_next = matches!(verb, VerbWord::Ready | VerbWord::Exert)
            && tokens
                .get(idx + 1)
                .and_then(Token::as_word)
                .is_some_and(|next| kind_for_word(next).is_some());
        (!describes_next).then_some((verb, idx))
    })
}

fn starts_with_verb(tokens: &[Token]) -> bool {
    find_verb(tokens).is_some_and(|(_, idx)| idx == 0)
}

/// Parse an effect clause into effect nodes.
///
/// Parenthesized reminder text is ignored. Each sentence is parsed on its
/// own; a sentence the grammar cannot decompose becomes a `Custom` node with
/// the sentence text. Returns an empty list only for blank input.
pub fn parse_effect_text(text: &str) -> Vec<Effect> {
    let (stripped, _) = strip_parentheticals(text);
    let tokens = tokenize_clause(&stripped);
    if trim_commas(&tokens).is_empty() {
        return Vec::new();
    }
    let effects = parse_effect_sentences(&tokens);
    if effects.is_empty() {
        return vec![Effect::custom(stripped.trim())];
    }
    effects
}

/// Parse a "While"/"During"/"If" condition clause. The lead word is optional.
pub fn parse_condition_text(text: &str) -> Condition {
    let tokens = tokenize_clause(text);
    let tokens = trim_commas(&tokens);
    let body = match tokens.first().and_then(Token::as_word) {
        Some("while" | "during" | "if") => &tokens[1..],
        _ => tokens,
    };
    parse_condition(body)
}

fn parse_effect_sentences(tokens: &[Token]) -> Vec<Effect> {
    if let Some(modal) = parse_choose_one(tokens) {
        return vec![modal];
    }

    let mut effects: Vec<Effect> = Vec::new();
    for sentence in split_on_period(tokens) {
        let sentence = trim_commas(&sentence);
        if sentence.is_empty() {
            continue;
        }

        let (sentence, continues) = match sentence.first() {
            Some(first) if first.is_word("then") => (trim_commas(&sentence[1..]), true),
            _ => (sentence, false),
        };
        let replaces = sentence.first().is_some_and(|token| token.is_word("if"))
            && sentence.last().is_some_and(|token| token.is_word("instead"));

        let parsed = match parse_effect_sentence(sentence) {
            Ok(parsed) => parsed,
            Err(err) => {
                let span = span_from_tokens(sentence).unwrap_or_default();
                log::debug!("keeping sentence at {}..{} verbatim: {err}", span.start, span.end);
                vec![Effect::custom(phrase_text(sentence))]
            }
        };

        match effects.last_mut() {
            Some(previous) if replaces => previous.attach(Join::Instead, parsed),
            Some(previous) if continues => previous.attach(Join::Then, parsed),
            _ => effects.extend(parsed),
        }
    }
    effects
}

/// "Choose one: • A. • B."
fn parse_choose_one(tokens: &[Token]) -> Option<Effect> {
    let words = words(tokens);
    if words.first().copied() != Some("choose") || words.get(1).copied() != Some("one") {
        return None;
    }
    let colon = tokens.iter().position(|token| matches!(token, Token::Colon(_)))?;
    let modes: Vec<Effect> = split_on_bullet(&tokens[colon + 1..])
        .iter()
        .filter_map(|mode| sequence(parse_effect_sentences(mode)))
        .collect();
    if modes.is_empty() {
        return None;
    }

    let mut modal = Effect::new(Verb::ChooseOne, Target::You).with_text(phrase_text(tokens));
    modal.attach(Join::Or, modes);
    Some(modal)
}

/// Fold sibling effects into one node, later siblings as `Then` children.
fn sequence(effects: Vec<Effect>) -> Option<Effect> {
    let mut iter = effects.into_iter();
    let mut first = iter.next()?;
    let rest: Vec<Effect> = iter.collect();
    first.attach(Join::Then, rest);
    Some(first)
}

fn parse_effect_sentence(tokens: &[Token]) -> Result<Vec<Effect>, CardTextError> {
    if tokens.first().is_some_and(|token| token.is_word("if")) {
        return parse_conditional_sentence(tokens);
    }

    if let Some(then_idx) = find_then(tokens) {
        let mut effects = parse_effect_chain(&tokens[..then_idx])?;
        let rest = parse_effect_chain(&tokens[then_idx + 1..])?;
        if let Some(last) = effects.last_mut() {
            last.attach(Join::Then, rest);
        }
        return Ok(effects);
    }

    parse_effect_chain(tokens)
}

/// ", then" in the middle of a sentence.
fn find_then(tokens: &[Token]) -> Option<usize> {
    tokens.iter().enumerate().skip(1).find_map(|(idx, token)| {
        (token.is_word("then") && matches!(tokens[idx - 1], Token::Comma(_))).then_some(idx)
    })
}

/// "If <condition>, <effects> [instead]"
fn parse_conditional_sentence(tokens: &[Token]) -> Result<Vec<Effect>, CardTextError> {
    let comma = tokens
        .iter()
        .position(|token| matches!(token, Token::Comma(_)))
        .ok_or_else(|| {
            CardTextError::ParseError(format!(
                "missing comma after condition (clause: '{}')",
                phrase_text(tokens)
            ))
        })?;

    let condition = parse_condition(&tokens[1..comma]);
    let body = &tokens[comma + 1..];
    let body = strip_suffix_words(body, &["instead"]).unwrap_or(body);

    let effects = parse_effect_sentence(body)?;
    Ok(effects
        .into_iter()
        .map(|effect| effect.with_condition(condition.clone()))
        .collect())
}

fn parse_condition(tokens: &[Token]) -> Condition {
    let tokens = trim_commas(tokens);
    let words = words(tokens);
    match words.as_slice() {
        ["its", "your", "turn"] | ["it", "is", "your", "turn"] | ["your", "turn"] => {
            return Condition::YourTurn;
        }
        ["its", "an", "opponents", "turn"] | ["an", "opponents", "turn"] | ["opponents", "turns"] => {
            return Condition::OpponentsTurn;
        }
        ["this", _, "is", "exerted"] => return Condition::ThisIsExerted,
        ["this", _, "has", "damage"] | ["this", _, "is", "damaged"] => {
            return Condition::ThisHasDamage;
        }
        ["this", _, "is", "challenging"] | ["challenging"] => {
            return Condition::ThisIsChallenging;
        }
        ["this", _, "is", "at", "a", "location"] => return Condition::ThisIsAtLocation,
        _ => {}
    }

    if let Some(condition) = parse_you_have_in_play(tokens) {
        return condition;
    }
    Condition::Text(phrase_text(tokens))
}

/// "you have 2 or more items in play", "you have a character named X in play"
fn parse_you_have_in_play(tokens: &[Token]) -> Option<Condition> {
    if !tokens.first()?.is_word("you") || !tokens.get(1)?.is_word("have") {
        return None;
    }
    let body = strip_suffix_words(&tokens[2..], &["in", "play"])?;
    let (at_least, used) = parse_number(body).unwrap_or((1, 0));
    let mut rest = &body[used..];
    if rest.first().is_some_and(|token| token.is_word("or"))
        && rest.get(1).is_some_and(|token| token.is_word("more"))
    {
        rest = &rest[2..];
    }
    let filter = parse_object_filter(rest).ok()?;
    if filter == ObjectFilter::default() {
        return None;
    }
    Some(Condition::YouHaveInPlay { filter, at_least })
}

/// A run of "and"-joined clauses, with "may" and enabling "to" handled.
fn parse_effect_chain(tokens: &[Token]) -> Result<Vec<Effect>, CardTextError> {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || {
        let tokens = trim_commas(tokens);
        if tokens.is_empty() {
            return Err(CardTextError::ParseError("empty effect clause".to_string()));
        }

        if let Some(and_idx) = find_mandatory_prefix(tokens) {
            let mut effects = parse_effect_chain(&tokens[..and_idx])?;
            effects.extend(parse_effect_chain(&tokens[and_idx + 1..])?);
            return Ok(effects);
        }

        let optional = tokens.iter().any(|token| token.is_word("may"));
        let tokens = if optional {
            remove_first_word(tokens, "may")
        } else {
            tokens.to_vec()
        };

        let alternatives = find_alternatives(&tokens);
        let mut effects = match find_enabling_to(&tokens) {
            None if !alternatives.is_empty() => vec![parse_alternatives(&tokens, &alternatives)?],
            Some(to_idx) => {
                let mut enabling = parse_effect_clauses(&tokens[..to_idx])?;
                let enabled = parse_effect_chain(&tokens[to_idx + 1..])?;
                if let Some(last) = enabling.last_mut() {
                    last.enabling = true;
                    last.attach(Join::Enables, enabled);
                }
                enabling
            }
            None => parse_effect_clauses(&tokens)?,
        };

        if optional {
            for effect in &mut effects {
                effect.optional = true;
            }
        }
        Ok(effects)
    })
}

/// "each opponent loses 1 lore and you may draw a card": the last "and"
/// before "may" that closes a complete clause. Only the part after it is
/// optional.
fn find_mandatory_prefix(tokens: &[Token]) -> Option<usize> {
    let may = tokens.iter().position(|token| token.is_word("may"))?;
    (1..may).rev().find(|&idx| {
        tokens[idx].is_word("and")
            && find_verb(&tokens[..idx]).is_some()
            && find_verb(&tokens[idx + 1..]).is_some()
    })
}

/// "or" directly followed by a verb, with a verb before it: "draw a card
/// or gain 1 lore". "cost 2 or less" is not a split point.
fn find_alternatives(tokens: &[Token]) -> Vec<usize> {
    let Some((_, first_verb)) = find_verb(tokens) else {
        return Vec::new();
    };
    tokens
        .iter()
        .enumerate()
        .skip(first_verb + 1)
        .filter(|(idx, token)| token.is_word("or") && starts_with_verb(&tokens[idx + 1..]))
        .map(|(idx, _)| idx)
        .collect()
}

/// One `ChooseOne` node with an `Or` child per alternative.
fn parse_alternatives(tokens: &[Token], splits: &[usize]) -> Result<Effect, CardTextError> {
    let mut options = Vec::with_capacity(splits.len() + 1);
    let mut start = 0usize;
    for end in splits.iter().copied().chain(std::iter::once(tokens.len())) {
        let option = sequence(parse_effect_chain(&tokens[start..end])?).ok_or_else(|| {
            CardTextError::ParseError(format!(
                "empty alternative (clause: '{}')",
                phrase_text(tokens)
            ))
        })?;
        options.push(option);
        start = end + 1;
    }

    let mut choice = Effect::new(Verb::ChooseOne, Target::You).with_text(phrase_text(tokens));
    choice.attach(Join::Or, options);
    Ok(choice)
}

/// "to" directly followed by a verb, with a verb before it: "pay 2 {I} to
/// draw a card", "exert one of your characters to banish chosen item".
fn find_enabling_to(tokens: &[Token]) -> Option<usize> {
    let (_, first_verb) = find_verb(tokens)?;
    tokens
        .iter()
        .enumerate()
        .skip(first_verb + 1)
        .find_map(|(idx, token)| {
            let next_is_verb = tokens
                .get(idx + 1)
                .and_then(Token::as_word)
                .and_then(verb_word)
                .is_some();
            (token.is_word("to") && next_is_verb).then_some(idx)
        })
}

/// Split on "and", merging verb-less pieces into their neighbour.
fn parse_effect_clauses(tokens: &[Token]) -> Result<Vec<Effect>, CardTextError> {
    let mut segments: Vec<Vec<Token>> = Vec::new();
    let mut pending: Vec<Token> = Vec::new();
    for segment in split_on_and(tokens) {
        if find_verb(&segment).is_none() {
            if let Some(last) = segments.last_mut() {
                last.push(and_token());
                last.extend(segment);
            } else {
                pending.extend(segment);
                pending.push(and_token());
            }
            continue;
        }
        let mut segment = segment;
        if !pending.is_empty() {
            let mut merged = std::mem::take(&mut pending);
            merged.append(&mut segment);
            segment = merged;
        }
        segments.push(segment);
    }
    if segments.is_empty() {
        return Err(CardTextError::ParseError(format!(
            "could not find verb in effect clause (clause: '{}')",
            phrase_text(tokens)
        )));
    }

    let mut effects: Vec<Effect> = Vec::new();
    for segment in &segments {
        let inherited = effects.last().map(|effect| effect.target.clone());
        effects.extend(parse_effect_clause(segment, inherited)?);
    }
    propagate_trailing_duration(&mut effects);
    Ok(effects)
}

fn and_token() -> Token {
    Token::Word("and".to_string(), "and".to_string(), TextSpan::default())
}

/// "gets +1 {S} and gains Evasive this turn": the duration closes both.
fn propagate_trailing_duration(effects: &mut [Effect]) {
    let Some(duration) = effects.last().map(|effect| effect.duration.clone()) else {
        return;
    };
    if duration == Until::Forever {
        return;
    }
    for effect in effects.iter_mut() {
        let continuous = matches!(
            effect.verb,
            Verb::ModifyStat(_) | Verb::GrantKeyword(_) | Verb::Prevent(_)
        );
        if continuous && effect.duration == Until::Forever {
            effect.duration = duration.clone();
        }
    }
}

fn split_duration(tokens: &[Token]) -> (&[Token], Until) {
    for (suffix, duration) in DURATION_SUFFIXES {
        if let Some(rest) = strip_suffix_words(tokens, suffix) {
            return (rest, duration.clone());
        }
    }
    if let Some(until) = tokens.iter().position(|token| token.is_word("until")) {
        let event = phrase_text(trim_commas(&tokens[until + 1..]));
        if !event.is_empty() {
            return (&tokens[..until], Until::Event(event));
        }
    }
    (tokens, Until::Forever)
}

/// One clause with a single verb. Some verbs yield several nodes
/// ("gets +1 {S} and +1 {W}").
fn parse_effect_clause(
    tokens: &[Token],
    inherited: Option<Target>,
) -> Result<Vec<Effect>, CardTextError> {
    let tokens = trim_commas(tokens);
    let (verb, verb_idx) = find_verb(tokens).ok_or_else(|| {
        CardTextError::ParseError(format!(
            "could not find verb in effect clause (clause: '{}')",
            phrase_text(tokens)
        ))
    })?;
    let subject = &tokens[..verb_idx];
    let (rest, duration) = split_duration(&tokens[verb_idx + 1..]);

    let subject_target = || -> Result<Target, CardTextError> {
        if words(subject).is_empty() {
            return Ok(inherited.clone().unwrap_or(Target::This));
        }
        parse_target(subject)
    };

    let mut effects = match verb {
        VerbWord::Banish => vec![Effect::new(Verb::Banish, parse_target(rest)?)],
        VerbWord::Return => vec![parse_return(rest)?],
        VerbWord::Draw => {
            let amount = parse_counted(rest, &["card", "cards"])?;
            vec![Effect::new(Verb::Draw, parse_player(subject)).with_amount(amount)]
        }
        VerbWord::Gain => parse_gain(rest, subject, &subject_target)?,
        VerbWord::Lose => vec![parse_lose(rest, subject)?],
        VerbWord::Deal => vec![parse_deal(rest)?],
        VerbWord::Get => parse_get(rest, subject_target()?)?,
        VerbWord::Exert => vec![Effect::new(Verb::Exert, parse_target(rest)?)],
        VerbWord::Ready => vec![Effect::new(Verb::Ready, parse_target(rest)?)],
        VerbWord::Discard => {
            let amount = parse_counted(rest, &["card", "cards"])
                .unwrap_or_else(|_| Amount::EqualTo(phrase_text(rest)));
            vec![Effect::new(Verb::Discard, parse_player(subject)).with_amount(amount)]
        }
        VerbWord::Cant => vec![parse_cant(rest, subject_target()?)?],
        VerbWord::Remove => vec![parse_remove(rest)?],
        VerbWord::Put => vec![parse_put(rest)?],
        VerbWord::Pay => vec![parse_pay(rest)?],
    };

    let text = phrase_text(tokens);
    for effect in &mut effects {
        if effect.duration == Until::Forever {
            effect.duration = duration.clone();
        }
        effect.text = text.clone();
    }
    Ok(effects)
}

/// "up to 2", "2", "a", "equal to X", "1 for each X". The amount is looked
/// for at the start of `tokens`; "equal to" and "for each" anywhere.
fn parse_amount(tokens: &[Token]) -> Option<Amount> {
    let tokens = trim_commas(tokens);
    let fixed = parse_leading_amount(tokens);

    if let Some(idx) = find_words(tokens, &["for", "each"]) {
        let per = match fixed {
            Some(Amount::Fixed(value)) => value,
            _ => 1,
        };
        let counted = phrase_text(trim_commas(&tokens[idx + 2..]));
        return Some(Amount::ForEach { per, counted });
    }
    if let Some(idx) = find_words(tokens, &["equal", "to"]) {
        let expression = phrase_text(trim_commas(&tokens[idx + 2..]));
        return Some(Amount::EqualTo(expression));
    }
    fixed
}

/// Whether `words` is exactly one leading amount ("2", "a", "up to 2").
fn is_amount_words(words: &[&str]) -> bool {
    match words {
        [word] => parse_signed(word).is_some() || parse_number_word(word).is_some(),
        ["up", "to", count] => parse_number_word(count).is_some(),
        _ => false,
    }
}

/// "a card", "2 cards", "1 lore", "lore equal to X", "a card for each X".
/// Nothing may sit between the amount and the noun, and only a "for each"
/// or "equal to" tail may follow it.
fn parse_counted(tokens: &[Token], nouns: &[&str]) -> Result<Amount, CardTextError> {
    let tokens = trim_commas(tokens);
    let words = words(tokens);
    let unsupported = || {
        CardTextError::UnsupportedLine(format!(
            "unsupported amount (clause: '{}')",
            phrase_text(tokens)
        ))
    };
    let noun = words
        .iter()
        .position(|word| nouns.contains(word))
        .ok_or_else(unsupported)?;
    let lead = &words[..noun];
    let tail = &words[noun + 1..];
    let lead_ok = lead.is_empty() || is_amount_words(lead);
    let tail_ok = matches!(tail, [] | ["for", "each", ..] | ["equal", "to", ..]);
    if !lead_ok || !tail_ok {
        return Err(unsupported());
    }
    parse_amount(tokens).ok_or_else(|| {
        CardTextError::ParseError(format!("missing amount (clause: '{}')", phrase_text(tokens)))
    })
}

fn parse_leading_amount(tokens: &[Token]) -> Option<Amount> {
    let words = words(tokens);
    match words.as_slice() {
        ["up", "to", count, ..] => {
            parse_number_word(count).and_then(|value| i32::try_from(value).ok().map(Amount::UpTo))
        }
        ["all", ..] => None,
        [first, ..] => parse_signed(first)
            .or_else(|| parse_number_word(first).and_then(|value| i32::try_from(value).ok()))
            .map(Amount::Fixed),
        [] => None,
    }
}

/// "return chosen character to their player's hand"
fn parse_return(tokens: &[Token]) -> Result<Effect, CardTextError> {
    let to = tokens
        .iter()
        .rposition(|token| token.is_word("to"))
        .ok_or_else(|| {
            CardTextError::UnsupportedLine(format!(
                "return without destination (clause: '{}')",
                phrase_text(tokens)
            ))
        })?;
    let destination = words(&tokens[to + 1..]);
    let possessive = |word: &&str| {
        matches!(
            *word,
            "their" | "players" | "your" | "its" | "owners" | "his" | "her"
        )
    };
    let to_hand = destination
        .split_last()
        .is_some_and(|(last, owner)| *last == "hand" && owner.iter().all(possessive));
    if !to_hand {
        return Err(CardTextError::UnsupportedLine(format!(
            "unsupported return destination (clause: '{}')",
            phrase_text(tokens)
        )));
    }
    Ok(Effect::new(Verb::ReturnToHand, parse_target(&tokens[..to])?))
}

/// "gain 2 lore", "gains Evasive", "gains Challenger +2"
fn parse_gain(
    tokens: &[Token],
    subject: &[Token],
    subject_target: &dyn Fn() -> Result<Target, CardTextError>,
) -> Result<Vec<Effect>, CardTextError> {
    let words = words(tokens);
    if words.contains(&"lore") {
        let amount = parse_counted(tokens, &["lore"])?;
        return Ok(vec![
            Effect::new(Verb::GainResource(Resource::Lore), parse_player(subject))
                .with_amount(amount),
        ]);
    }

    let mut effects = Vec::new();
    let mut idx = 0usize;
    while idx < tokens.len() {
        let Some((spec, used)) = keyword_at(&tokens[idx..]) else {
            if tokens[idx].is_word("and") || matches!(tokens[idx], Token::Comma(_)) {
                idx += 1;
                continue;
            }
            break;
        };
        idx += used;
        let value = tokens
            .get(idx)
            .and_then(Token::as_word)
            .and_then(parse_signed);
        let mut effect = Effect::new(Verb::GrantKeyword(spec.keyword), subject_target()?);
        if let Some(value) = value {
            effect = effect.with_amount(Amount::Fixed(value));
            idx += 1;
        }
        effects.push(effect);
    }

    if effects.is_empty() || idx < tokens.len() {
        return Err(CardTextError::UnsupportedLine(format!(
            "unsupported gain clause (clause: '{}')",
            phrase_text(tokens)
        )));
    }
    Ok(effects)
}

/// "each opponent loses 1 lore"
fn parse_lose(tokens: &[Token], subject: &[Token]) -> Result<Effect, CardTextError> {
    if !words(tokens).contains(&"lore") {
        return Err(CardTextError::UnsupportedLine(format!(
            "unsupported lose clause (clause: '{}')",
            phrase_text(tokens)
        )));
    }
    let amount = parse_counted(tokens, &["lore"])?;
    Ok(Effect::new(Verb::LoseResource(Resource::Lore), parse_player(subject)).with_amount(amount))
}

/// "deal 2 damage to chosen character", "deal damage equal to their {S} to
/// chosen character"
fn parse_deal(tokens: &[Token]) -> Result<Effect, CardTextError> {
    let damage = tokens
        .iter()
        .position(|token| token.is_word("damage"))
        .ok_or_else(|| {
            CardTextError::ParseError(format!(
                "deal without damage (clause: '{}')",
                phrase_text(tokens)
            ))
        })?;

    let (amount, target_start) = if tokens.get(damage + 1).is_some_and(|t| t.is_word("equal"))
        && tokens.get(damage + 2).is_some_and(|t| t.is_word("to"))
    {
        let expression_start = damage + 3;
        let to = tokens[expression_start..]
            .iter()
            .position(|token| token.is_word("to"))
            .map(|offset| expression_start + offset)
            .ok_or_else(|| {
                CardTextError::ParseError(format!(
                    "missing damage target (clause: '{}')",
                    phrase_text(tokens)
                ))
            })?;
        (
            Amount::EqualTo(phrase_text(&tokens[expression_start..to])),
            to + 1,
        )
    } else {
        let amount = is_amount_words(&words(&tokens[..damage]))
            .then(|| parse_leading_amount(&tokens[..damage]))
            .flatten()
            .ok_or_else(|| {
                CardTextError::ParseError(format!(
                    "missing damage amount (clause: '{}')",
                    phrase_text(tokens)
                ))
            })?;
        match tokens.get(damage + 1) {
            Some(token) if token.is_word("to") => (amount, damage + 2),
            None => {
                // "deal 4 damage instead": same target as the effect it replaces
                return Ok(Effect::new(
                    Verb::DealDamage,
                    Target::Reference("same target".to_string()),
                )
                .with_amount(amount));
            }
            Some(_) => {
                return Err(CardTextError::ParseError(format!(
                    "missing damage target (clause: '{}')",
                    phrase_text(tokens)
                )));
            }
        }
    };

    let target_tokens = &tokens[target_start..];
    let (target_tokens, per_each) = match find_words(target_tokens, &["for", "each"]) {
        Some(idx) => (&target_tokens[..idx], Some(&target_tokens[idx + 2..])),
        None => (target_tokens, None),
    };
    let amount = match (amount, per_each) {
        (Amount::Fixed(per), Some(counted)) => Amount::ForEach {
            per,
            counted: phrase_text(trim_commas(counted)),
        },
        (amount, _) => amount,
    };
    Ok(Effect::new(Verb::DealDamage, parse_target(target_tokens)?).with_amount(amount))
}

/// "gets +2 {S}", "get +1 {S} and +1 {W}", "gets +1 {L} for each item you have"
fn parse_get(tokens: &[Token], target: Target) -> Result<Vec<Effect>, CardTextError> {
    let for_each = find_words(tokens, &["for", "each"]);
    let stat_tokens = &tokens[..for_each.unwrap_or(tokens.len())];
    let counted = for_each.map(|idx| phrase_text(trim_commas(&tokens[idx + 2..])));
    let unsupported = || {
        CardTextError::UnsupportedLine(format!(
            "unsupported get clause (clause: '{}')",
            phrase_text(tokens)
        ))
    };

    let mut effects = Vec::new();
    let mut idx = 0usize;
    while idx < stat_tokens.len() {
        if stat_tokens[idx].is_word("and") || matches!(stat_tokens[idx], Token::Comma(_)) {
            idx += 1;
            continue;
        }
        let value = stat_tokens[idx]
            .as_word()
            .and_then(parse_signed)
            .ok_or_else(unsupported)?;
        let stat = stat_tokens
            .get(idx + 1)
            .and_then(Token::as_symbol)
            .and_then(Stat::from_glyph)
            .ok_or_else(unsupported)?;
        let amount = match &counted {
            Some(counted) => Amount::ForEach {
                per: value,
                counted: counted.clone(),
            },
            None => Amount::Fixed(value),
        };
        effects.push(Effect::new(Verb::ModifyStat(stat), target.clone()).with_amount(amount));
        idx += 2;
    }

    if effects.is_empty() {
        return Err(unsupported());
    }
    Ok(effects)
}

/// "can't ready", "can't quest", "can't challenge", "can't be challenged"
fn parse_cant(tokens: &[Token], target: Target) -> Result<Effect, CardTextError> {
    let words = words(tokens);
    let action = match words.as_slice() {
        ["ready"] => PreventedAction::Ready,
        ["quest"] => PreventedAction::Quest,
        ["challenge"] => PreventedAction::Challenge,
        ["be", "challenged"] => PreventedAction::BeChallenged,
        ["sing"] | ["sing", "songs"] => PreventedAction::Sing,
        _ => {
            return Err(CardTextError::UnsupportedLine(format!(
                "unsupported restriction (clause: '{}')",
                phrase_text(tokens)
            )));
        }
    };
    Ok(Effect::new(Verb::Prevent(action), target))
}

/// "remove up to 2 damage from chosen character"
fn parse_remove(tokens: &[Token]) -> Result<Effect, CardTextError> {
    let from = tokens
        .iter()
        .position(|token| token.is_word("from"))
        .filter(|&from| is_damage_amount(&tokens[..from]))
        .ok_or_else(|| {
            CardTextError::UnsupportedLine(format!(
                "unsupported remove clause (clause: '{}')",
                phrase_text(tokens)
            ))
        })?;
    let amount = if tokens.first().is_some_and(|token| token.is_word("all")) {
        Amount::EqualTo("all damage".to_string())
    } else {
        parse_leading_amount(&tokens[..from]).unwrap_or(Amount::Fixed(1))
    };
    Ok(Effect::new(Verb::RemoveDamage, parse_target(&tokens[from + 1..])?).with_amount(amount))
}

/// "2 damage", "up to 1 damage", "all damage", "damage counter"
fn is_damage_amount(tokens: &[Token]) -> bool {
    let words = words(tokens);
    let Some(damage) = words.iter().position(|word| *word == "damage") else {
        return false;
    };
    let lead = &words[..damage];
    let lead_ok = lead.is_empty() || lead == ["all"] || is_amount_words(lead);
    let tail_ok = matches!(&words[damage + 1..], [] | ["counter"] | ["counters"]);
    lead_ok && tail_ok
}

/// "put chosen character into their player's inkwell facedown", "put 1
/// damage counter on chosen character"
fn parse_put(tokens: &[Token]) -> Result<Effect, CardTextError> {
    let words = words(tokens);
    if words.contains(&"inkwell") {
        let into = tokens
            .iter()
            .position(|token| token.is_word("into"))
            .unwrap_or(tokens.len());
        let placement_ok = super::words(&tokens[into..]).iter().all(|word| {
            matches!(
                *word,
                "into" | "their" | "players" | "your" | "its" | "owners" | "inkwell" | "facedown"
                    | "and" | "exerted"
            )
        });
        if !placement_ok {
            return Err(CardTextError::UnsupportedLine(format!(
                "unsupported inkwell placement (clause: '{}')",
                phrase_text(tokens)
            )));
        }
        return Ok(Effect::new(Verb::PutIntoInkwell, parse_target(&tokens[..into])?));
    }
    if let Some(on) = tokens.iter().position(|token| token.is_word("on"))
        && is_damage_amount(&tokens[..on])
    {
        let amount = parse_leading_amount(&tokens[..on]).unwrap_or(Amount::Fixed(1));
        return Ok(Effect::new(Verb::PutDamage, parse_target(&tokens[on + 1..])?).with_amount(amount));
    }
    Err(CardTextError::UnsupportedLine(format!(
        "unsupported put clause (clause: '{}')",
        phrase_text(tokens)
    )))
}

/// "pay 2 {I}"
fn parse_pay(tokens: &[Token]) -> Result<Effect, CardTextError> {
    match tokens {
        [Token::Word(amount, _, _), Token::Symbol(Glyph::Ink, _)] => {
            let value = parse_number_word(amount)
                .and_then(|value| i32::try_from(value).ok())
                .ok_or_else(|| {
                    CardTextError::ParseError(format!("bad ink amount '{amount}'"))
                })?;
            Ok(Effect::new(Verb::PayInk, Target::You).with_amount(Amount::Fixed(value)))
        }
        _ => Err(CardTextError::UnsupportedLine(format!(
            "unsupported pay clause (clause: '{}')",
            phrase_text(tokens)
        ))),
    }
}

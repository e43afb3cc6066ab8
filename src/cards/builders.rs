//! Rules-text parser.
//!
//! Turns the printed text sections of a card into ability definitions. The
//! pipeline runs in a fixed order and no stage calls back into an earlier one:
//!
//! 1. `normalize` rewrites glyphs, dashes and whitespace into one canonical form
//! 2. `segment` splits sections into ability units
//! 3. keyword units are matched against the registry
//! 4. `classify` assigns a category and splits out name, cost, trigger and effect clauses
//! 5. `parse_costs`, `parse_triggers` and `parse_effects` decompose those clauses
//! 6. `assemble` builds and checks the definition
//!
//! Parsing is total: a clause the grammar cannot decompose is kept verbatim as
//! a `Custom` node, so every unit yields an ability.

use crate::ability::{AbilityCategory, AbilityDefinition, Trigger, TriggerSubject};
use crate::cost::Cost;
use crate::effect::{Amount, Effect, Until, Verb};
use crate::ids::CardId;
use crate::keywords::{self, Keyword, KeywordMatch};
use crate::target::{ObjectFilter, Target};
use crate::types::{CardType, Glyph, Stat};

mod assemble;
mod classify;
mod normalize;
mod parse_costs;
mod parse_effects;
mod parse_targets;
mod parse_triggers;
mod segment;

#[cfg(test)]
mod tests;

use assemble::AbilityDraft;
pub use classify::{ClassifiedUnit, classify};
pub use normalize::{normalize_text, replace_self_name};
pub use parse_costs::parse_cost_clause;
pub use parse_effects::{parse_condition_text, parse_effect_text};
pub use parse_triggers::parse_trigger_clause;
pub use segment::segment_sections;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardTextError {
    #[error("unsupported clause: {0}")]
    UnsupportedLine(String),
    #[error("{0}")]
    ParseError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// Lowercased word (apostrophes dropped) and the word as printed
    Word(String, String, TextSpan),
    Symbol(Glyph, TextSpan),
    Comma(TextSpan),
    Period(TextSpan),
    Colon(TextSpan),
    Semicolon(TextSpan),
    Dash(TextSpan),
    Bullet(TextSpan),
}

impl Token {
    fn as_word(&self) -> Option<&str> {
        match self {
            Token::Word(word, _, _) => Some(word.as_str()),
            _ => None,
        }
    }

    fn as_raw_word(&self) -> Option<&str> {
        match self {
            Token::Word(_, raw, _) => Some(raw.as_str()),
            _ => None,
        }
    }

    fn as_symbol(&self) -> Option<Glyph> {
        match self {
            Token::Symbol(glyph, _) => Some(*glyph),
            _ => None,
        }
    }

    fn is_word(&self, value: &str) -> bool {
        matches!(self, Token::Word(word, _, _) if word == value)
    }

    fn span(&self) -> TextSpan {
        match self {
            Token::Word(_, _, span)
            | Token::Symbol(_, span)
            | Token::Comma(span)
            | Token::Period(span)
            | Token::Colon(span)
            | Token::Semicolon(span)
            | Token::Dash(span)
            | Token::Bullet(span) => *span,
        }
    }
}

fn tokenize_clause(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut buffer = String::new();
    let mut raw = String::new();
    let mut word_start: Option<usize> = None;
    let mut word_end = 0usize;

    let flush = |buffer: &mut String,
                 raw: &mut String,
                 tokens: &mut Vec<Token>,
                 word_start: &mut Option<usize>,
                 word_end: &mut usize| {
        if !buffer.is_empty() {
            tokens.push(Token::Word(
                std::mem::take(buffer),
                std::mem::take(raw),
                TextSpan {
                    start: word_start.unwrap_or(0),
                    end: *word_end,
                },
            ));
        }
        buffer.clear();
        raw.clear();
        *word_start = None;
        *word_end = 0;
    };

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut idx = 0usize;
    while idx < chars.len() {
        let (byte_idx, ch) = chars[idx];
        let next = chars.get(idx + 1).map_or('\0', |(_, ch)| *ch);

        if ch == '{' {
            flush(&mut buffer, &mut raw, &mut tokens, &mut word_start, &mut word_end);
            let close = chars[idx..].iter().position(|(_, ch)| *ch == '}');
            if let Some(offset) = close {
                let inner: String = chars[idx + 1..idx + offset].iter().map(|(_, ch)| *ch).collect();
                let mut letters = inner.chars();
                if let (Some(letter), None) = (letters.next(), letters.next())
                    && let Some(glyph) = Glyph::from_tag_letter(letter)
                {
                    let end = chars[idx + offset].0 + 1;
                    tokens.push(Token::Symbol(glyph, TextSpan { start: byte_idx, end }));
                }
                idx += offset + 1;
                continue;
            }
            idx += 1;
            continue;
        }

        let is_sign = (ch == '+' || ch == '-') && next.is_ascii_digit() && buffer.is_empty();
        if ch.is_alphanumeric() || is_sign {
            if word_start.is_none() {
                word_start = Some(byte_idx);
            }
            word_end = byte_idx + ch.len_utf8();
            buffer.extend(ch.to_lowercase());
            raw.push(ch);
            idx += 1;
            continue;
        }

        if ch == '\'' && word_start.is_some() {
            word_end = byte_idx + ch.len_utf8();
            raw.push(ch);
            idx += 1;
            continue;
        }

        flush(&mut buffer, &mut raw, &mut tokens, &mut word_start, &mut word_end);

        let span = TextSpan {
            start: byte_idx,
            end: byte_idx + ch.len_utf8(),
        };
        match ch {
            ',' => tokens.push(Token::Comma(span)),
            '.' | '!' | '?' => tokens.push(Token::Period(span)),
            ':' => tokens.push(Token::Colon(span)),
            ';' => tokens.push(Token::Semicolon(span)),
            '—' => tokens.push(Token::Dash(span)),
            '•' => tokens.push(Token::Bullet(span)),
            _ => {}
        }
        idx += 1;
    }

    flush(&mut buffer, &mut raw, &mut tokens, &mut word_start, &mut word_end);
    tokens
}

fn words(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().filter_map(Token::as_word).collect()
}

fn span_from_tokens(tokens: &[Token]) -> Option<TextSpan> {
    let first = tokens.first()?;
    let last = tokens.last()?;
    Some(TextSpan {
        start: first.span().start,
        end: last.span().end,
    })
}

/// Rebuild readable text from tokens, keeping the printed spelling of words.
fn phrase_text(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Word(_, raw, _) => {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(raw);
            }
            Token::Symbol(glyph, _) => {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(glyph.tag());
            }
            Token::Comma(_) => out.push(','),
            Token::Period(_) => out.push('.'),
            Token::Colon(_) => out.push(':'),
            Token::Semicolon(_) => out.push(';'),
            Token::Dash(_) => out.push_str(" —"),
            Token::Bullet(_) => {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push('•');
            }
        }
    }
    out
}

fn split_on_period(tokens: &[Token]) -> Vec<Vec<Token>> {
    split_on(tokens, |token| matches!(token, Token::Period(_)))
}

fn split_on_comma(tokens: &[Token]) -> Vec<Vec<Token>> {
    split_on(tokens, |token| matches!(token, Token::Comma(_)))
}

fn split_on_and(tokens: &[Token]) -> Vec<Vec<Token>> {
    split_on(tokens, |token| token.is_word("and"))
}

fn split_on_bullet(tokens: &[Token]) -> Vec<Vec<Token>> {
    split_on(tokens, |token| matches!(token, Token::Bullet(_)))
}

fn split_on(tokens: &[Token], is_separator: impl Fn(&Token) -> bool) -> Vec<Vec<Token>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for token in tokens {
        if is_separator(token) {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        } else {
            current.push(token.clone());
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

fn trim_commas(tokens: &[Token]) -> &[Token] {
    let mut start = 0usize;
    let mut end = tokens.len();
    while start < end && matches!(tokens[start], Token::Comma(_) | Token::Period(_)) {
        start += 1;
    }
    while end > start && matches!(tokens[end - 1], Token::Comma(_) | Token::Period(_)) {
        end -= 1;
    }
    &tokens[start..end]
}

fn remove_first_word(tokens: &[Token], word: &str) -> Vec<Token> {
    let mut removed = false;
    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        if !removed && token.is_word(word) {
            removed = true;
            continue;
        }
        out.push(token.clone());
    }
    out
}

/// Tokens ending in the given word sequence, with that suffix removed.
fn strip_suffix_words<'a>(tokens: &'a [Token], suffix: &[&str]) -> Option<&'a [Token]> {
    let tokens = trim_commas(tokens);
    if tokens.len() < suffix.len() {
        return None;
    }
    let split = tokens.len() - suffix.len();
    let matches = tokens[split..]
        .iter()
        .zip(suffix)
        .all(|(token, word)| token.is_word(word));
    matches.then(|| &tokens[..split])
}

/// Index of the first token where the word sequence starts.
fn find_words(tokens: &[Token], pattern: &[&str]) -> Option<usize> {
    if pattern.is_empty() || tokens.len() < pattern.len() {
        return None;
    }
    (0..=tokens.len() - pattern.len()).find(|&start| {
        tokens[start..start + pattern.len()]
            .iter()
            .zip(pattern)
            .all(|(token, word)| token.is_word(word))
    })
}

/// Keyword named at the start of `tokens`, with the number of tokens it
/// spans ("Sing Together" is two).
fn keyword_at(tokens: &[Token]) -> Option<(&'static keywords::KeywordSpec, usize)> {
    let first = tokens.first()?.as_raw_word()?;
    if let Some(second) = tokens.get(1).and_then(Token::as_raw_word)
        && let Some(spec) = keywords::lookup(&format!("{first} {second}"))
    {
        return Some((spec, 2));
    }
    keywords::lookup(first).map(|spec| (spec, 1))
}

fn is_article(word: &str) -> bool {
    matches!(word, "a" | "an" | "the")
}

fn parse_number_word(word: &str) -> Option<u32> {
    if let Ok(value) = word.parse::<u32>() {
        return Some(value);
    }
    let value = match word {
        "a" | "an" | "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        _ => return None,
    };
    Some(value)
}

fn parse_number(tokens: &[Token]) -> Option<(u32, usize)> {
    let word = tokens.first()?.as_word()?;
    parse_number_word(word).map(|value| (value, 1))
}

/// "+2", "-1" or a bare number.
fn parse_signed(word: &str) -> Option<i32> {
    if let Some(rest) = word.strip_prefix('+') {
        return rest.parse::<i32>().ok();
    }
    if let Some(rest) = word.strip_prefix('-') {
        return rest.parse::<i32>().ok().map(|value| -value);
    }
    word.parse::<i32>().ok()
}

/// Walk `text` yielding byte index, char and nesting depth. Depth counts open
/// parentheses and whether the position is inside double quotes.
fn top_level_chars(text: &str) -> impl Iterator<Item = (usize, char, usize)> + '_ {
    let mut parens = 0usize;
    let mut quoted = false;
    text.char_indices().map(move |(idx, ch)| {
        let depth_before = parens + usize::from(quoted);
        match ch {
            '(' => parens += 1,
            ')' => parens = parens.saturating_sub(1),
            '"' => quoted = !quoted,
            _ => {}
        }
        let depth_after = parens + usize::from(quoted);
        (idx, ch, depth_before.min(depth_after))
    })
}

/// Remove every parenthesized span, returning the stripped text and the
/// contents of each span in order.
fn strip_parentheticals(text: &str) -> (String, Vec<String>) {
    let mut stripped = String::with_capacity(text.len());
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for ch in text.chars() {
        match ch {
            '(' => {
                if depth > 0 {
                    current.push(ch);
                }
                depth += 1;
            }
            ')' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    spans.push(std::mem::take(&mut current).trim().to_string());
                } else {
                    current.push(ch);
                }
            }
            _ if depth > 0 => current.push(ch),
            _ => stripped.push(ch),
        }
    }
    let stripped = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    (stripped, spans)
}

/// Byte length of a leading ALL-CAPS ability name, if `text` starts with one.
///
/// A name is a run of words with no lowercase letters whose first word has at
/// least two letters. Glyph tags and bare numbers end the run. A trailing
/// one-letter word ("A", "I") is left for the sentence that follows.
fn leading_caps_name(text: &str) -> Option<usize> {
    let mut end = None;
    let mut offset = 0usize;
    let mut first = true;

    for word in text.split(' ') {
        let word_start = offset;
        offset += word.len() + 1;
        if word.is_empty() {
            continue;
        }
        let letters = word.chars().filter(|ch| ch.is_alphabetic()).count();
        let is_caps = letters > 0
            && !word.starts_with('{')
            && !word.chars().any(char::is_lowercase);
        if !is_caps {
            break;
        }
        if first && letters < 2 {
            return None;
        }
        first = false;
        if letters == 1 && word.len() == 1 {
            continue;
        }
        end = Some(word_start + word.len());
    }

    end.filter(|&end| !text[end..].trim().is_empty())
}

/// Noun phrase the card's own name is rewritten to.
fn self_reference(card_type: CardType) -> &'static str {
    match card_type {
        CardType::Character => "this character",
        CardType::Item => "this item",
        CardType::Location => "this location",
        CardType::Action => "this card",
    }
}

/// Parse the printed text sections of one card.
///
/// Never fails: unrecognized text becomes `Custom` effects or costs, flagged
/// through [`AbilityDefinition::needs_manual_review`].
pub fn parse_text_sections<S: AsRef<str>>(
    card_id: CardId,
    card_name: &str,
    card_type: CardType,
    sections: &[S],
) -> Vec<AbilityDefinition> {
    let normalized: Vec<String> = sections
        .iter()
        .map(|section| normalize_text(section.as_ref()))
        .collect();
    let units = segment_sections(&normalized);
    log::trace!("card {card_id}: {} ability units", units.len());

    let context = UnitContext {
        card_id,
        card_name,
        self_reference: self_reference(card_type),
    };
    units
        .iter()
        .enumerate()
        .filter_map(|(index, unit)| build_ability(&context, index, unit))
        .collect()
}

struct UnitContext<'a> {
    card_id: CardId,
    card_name: &'a str,
    self_reference: &'static str,
}

impl UnitContext<'_> {
    fn localize(&self, clause: &str) -> String {
        replace_self_name(clause, self.card_name, self.self_reference)
    }
}

fn build_ability(context: &UnitContext<'_>, index: usize, unit: &str) -> Option<AbilityDefinition> {
    let unit = unit.trim();
    if unit.is_empty() {
        log::debug!("card {}: dropping empty ability unit {index}", context.card_id);
        return None;
    }

    let draft = if let Some(matched) = keywords::match_keyword(unit) {
        keyword_draft(unit, matched)
    } else {
        let (stripped, reminders) = strip_parentheticals(unit);
        if stripped.trim_matches(|ch: char| ch == '.' || ch.is_whitespace()).is_empty() {
            reminder_only_draft(unit, reminders)
        } else {
            classified_draft(context, unit)
        }
    };

    Some(assemble::assemble(context.card_id, index, draft))
}

fn keyword_draft(unit: &str, matched: KeywordMatch) -> AbilityDraft {
    let spec = matched.spec;
    let effect = match spec.keyword {
        Keyword::Support => Effect::new(
            Verb::ModifyStat(Stat::Strength),
            Target::Chosen(ObjectFilter::character().yours().other()),
        )
        .with_amount(Amount::EqualTo("this character's {S}".to_string()))
        .with_duration(Until::ThisTurn)
        .optional(),
        Keyword::Vanish => Effect::new(Verb::Banish, Target::This),
        keyword => {
            let effect = Effect::new(Verb::GrantKeyword(keyword), Target::This);
            match matched.value {
                Some(value) => effect.with_amount(Amount::Fixed(value)),
                None => effect,
            }
        }
    };

    let triggers = spec
        .trigger
        .iter()
        .map(|event| Trigger::new(event.clone(), TriggerSubject::This, spec.name))
        .collect();

    AbilityDraft {
        category: spec.category,
        raw_text: unit.to_string(),
        name: None,
        keyword: Some(spec.keyword),
        keyword_value: matched.value,
        reminder_text: matched.reminder,
        triggers,
        once_per_turn: false,
        costs: Vec::new(),
        effects: vec![effect.with_text(spec.name)],
    }
}

fn reminder_only_draft(unit: &str, reminders: Vec<String>) -> AbilityDraft {
    let reminder = reminders.join(" ");
    AbilityDraft {
        category: AbilityCategory::Static,
        raw_text: unit.to_string(),
        name: None,
        keyword: None,
        keyword_value: None,
        effects: vec![Effect::custom(reminder.clone())],
        reminder_text: Some(reminder),
        triggers: Vec::new(),
        once_per_turn: false,
        costs: Vec::new(),
    }
}

fn classified_draft(context: &UnitContext<'_>, unit: &str) -> AbilityDraft {
    let classified = classify(unit);

    let costs: Vec<Cost> = match (&classified.category, &classified.cost_clause) {
        (AbilityCategory::Activated, Some(clause)) => parse_cost_clause(clause),
        _ => Vec::new(),
    };

    let triggers = match (&classified.category, &classified.lead_clause) {
        (AbilityCategory::Triggered, Some(clause)) => {
            parse_trigger_clause(&context.localize(clause))
        }
        _ => Vec::new(),
    };

    let mut effects = parse_effect_text(&context.localize(&classified.effect_clause));

    if classified.category == AbilityCategory::Static
        && let Some(clause) = &classified.lead_clause
    {
        let condition = parse_condition_text(&context.localize(clause));
        for effect in &mut effects {
            if effect.condition.is_none() {
                effect.condition = Some(condition.clone());
            }
        }
    }

    let (_, reminders) = strip_parentheticals(&classified.effect_clause);
    let reminder_text = (!reminders.is_empty()).then(|| reminders.join(" "));

    AbilityDraft {
        category: classified.category,
        raw_text: unit.to_string(),
        name: classified.name,
        keyword: None,
        keyword_value: None,
        reminder_text,
        triggers,
        once_per_turn: classified.once_per_turn,
        costs,
        effects,
    }
}

use super::*;

/// Atomic cost shapes, tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CostShape {
    ExertSelf,
    PayInk,
    BanishSelf,
    BanishOther,
    Discard,
    ExertOther,
}

const COST_SHAPES: [CostShape; 6] = [
    CostShape::ExertSelf,
    CostShape::PayInk,
    CostShape::BanishSelf,
    CostShape::BanishOther,
    CostShape::Discard,
    CostShape::ExertOther,
];

impl CostShape {
    fn parse(self, tokens: &[Token]) -> Option<Cost> {
        let words = words(tokens);
        match self {
            CostShape::ExertSelf => match tokens {
                [Token::Symbol(Glyph::Exert, _)] => Some(Cost::exert_self()),
                _ if words.as_slice() == ["exert", "this", "character"] => Some(Cost::exert_self()),
                _ => None,
            },
            CostShape::PayInk => {
                let tokens = match tokens.first() {
                    Some(first) if first.is_word("pay") => &tokens[1..],
                    _ => tokens,
                };
                match tokens {
                    [Token::Word(amount, _, _), Token::Symbol(Glyph::Ink, _)] => {
                        parse_number_word(amount).map(Cost::pay_ink)
                    }
                    [Token::Word(amount, _, _), Token::Word(ink, _, _)] if ink == "ink" => {
                        parse_number_word(amount).map(Cost::pay_ink)
                    }
                    _ => None,
                }
            }
            CostShape::BanishSelf => {
                matches!(words.as_slice(), ["banish", "this", _]).then(Cost::banish_self)
            }
            CostShape::BanishOther => {
                let rest = described_object(tokens, &["banish"])?;
                let (amount, descriptor) = counted_descriptor(rest);
                Some(Cost::banish_other(amount, descriptor))
            }
            CostShape::Discard => {
                let rest = described_object(tokens, &["choose", "and", "discard"])
                    .or_else(|| described_object(tokens, &["discard"]))?;
                let (amount, descriptor) = counted_descriptor(rest);
                Some(Cost::discard(amount, descriptor))
            }
            CostShape::ExertOther => {
                let rest = described_object(tokens, &["exert"])?;
                let (amount, descriptor) = counted_descriptor(rest);
                Some(Cost::exert_other(amount, descriptor))
            }
        }
    }
}

/// Parse the cost clause of an activated ability into atomic costs.
///
/// Atoms are separated by top-level commas. An atom matching no known shape
/// is kept verbatim as a custom cost, so the result is never empty for a
/// non-empty clause.
pub fn parse_cost_clause(clause: &str) -> Vec<Cost> {
    let tokens = tokenize_clause(clause);
    let mut costs = Vec::new();
    for atom in split_on_comma(&tokens) {
        let atom = trim_commas(&atom);
        if atom.is_empty() {
            continue;
        }
        let parsed = COST_SHAPES.iter().find_map(|shape| shape.parse(atom));
        match parsed {
            Some(cost) => costs.push(cost),
            None => {
                let text = phrase_text(atom);
                log::debug!("keeping unrecognized cost atom verbatim: '{text}'");
                costs.push(Cost::custom(text));
            }
        }
    }

    if costs.is_empty() && !clause.trim().is_empty() {
        costs.push(Cost::custom(clause.trim()));
    }
    costs
}

/// Tokens after a leading verb phrase, if the atom starts with it and
/// something follows.
fn described_object<'a>(tokens: &'a [Token], lead: &[&str]) -> Option<&'a [Token]> {
    if tokens.len() <= lead.len() {
        return None;
    }
    let starts = tokens
        .iter()
        .zip(lead)
        .all(|(token, word)| token.is_word(word));
    starts.then(|| &tokens[lead.len()..])
}

/// "2 cards" -> (2, "2 cards"); "one of your items" -> (1, "one of your items").
fn counted_descriptor(tokens: &[Token]) -> (u32, String) {
    let amount = parse_number(tokens).map_or(1, |(value, _)| value);
    (amount, phrase_text(tokens))
}

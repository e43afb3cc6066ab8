use super::*;

/// Rewrite raw card text into the canonical form every later stage expects.
///
/// - Glyph symbols and brace spellings (`{e}`, `{Exert}`) become the tags
///   `{E} {I} {S} {W} {L}`; unknown brace contents are left alone.
/// - Literal `\n` escapes, real line breaks, tabs and non-breaking spaces
///   become single spaces.
/// - Curly quotes are straightened and a spaced en dash or `--` becomes an
///   em dash.
///
/// Normalizing already normalized text is a no-op.
pub fn normalize_text(raw: &str) -> String {
    let unescaped = raw
        .replace("\\n", " ")
        .replace("\\r", " ")
        .replace("\\t", " ");

    let mut out = String::with_capacity(unescaped.len());
    let chars: Vec<char> = unescaped.chars().collect();
    let mut idx = 0usize;
    while idx < chars.len() {
        let ch = chars[idx];

        if ch == '{'
            && let Some(offset) = chars[idx..].iter().position(|&ch| ch == '}')
        {
            let inner: String = chars[idx + 1..idx + offset].iter().collect();
            match glyph_for_alias(&inner) {
                Some(glyph) => out.push_str(glyph.tag()),
                None => {
                    out.push('{');
                    out.push_str(&inner);
                    out.push('}');
                }
            }
            idx += offset + 1;
            continue;
        }

        if let Some(glyph) = Glyph::ALL
            .iter()
            .copied()
            .find(|glyph| glyph.symbols().contains(&ch))
        {
            out.push_str(glyph.tag());
            idx += 1;
            continue;
        }

        match ch {
            '\n' | '\r' | '\t' | '\u{a0}' | '\u{2009}' | '\u{202f}' => out.push(' '),
            '’' | '‘' => out.push('\''),
            '“' | '”' => out.push('"'),
            '−' => out.push('-'),
            '–' => out.push('—'),
            '-' if chars.get(idx + 1) == Some(&'-') => {
                out.push('—');
                idx += 1;
            }
            _ => out.push(ch),
        }
        idx += 1;
    }

    collapse_whitespace(&out)
}

fn glyph_for_alias(inner: &str) -> Option<Glyph> {
    let inner = inner.trim().to_ascii_lowercase();
    Glyph::ALL
        .iter()
        .copied()
        .find(|glyph| glyph.aliases().contains(&inner.as_str()))
}

fn collapse_whitespace(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut out = String::with_capacity(text.len());
    for (idx, word) in words.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        // A lone hyphen between words is a dash.
        if *word == "-" {
            out.push('—');
        } else {
            out.push_str(word);
        }
    }
    out
}

/// Replace standalone mentions of the card's own name with `replacement`
/// ("this character"). Mentions after "named" refer to other cards and are
/// kept.
pub fn replace_self_name(text: &str, name: &str, replacement: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut idx = 0usize;
    while idx < text.len() {
        let rest = &text[idx..];
        if rest.starts_with(name)
            && is_boundary_before(text, idx)
            && is_boundary_after(text, idx + name.len())
            && !preceded_by_named(text, idx)
        {
            out.push_str(replacement);
            idx += name.len();
            continue;
        }
        let Some(ch) = rest.chars().next() else {
            break;
        };
        out.push(ch);
        idx += ch.len_utf8();
    }
    out
}

fn is_boundary_before(text: &str, idx: usize) -> bool {
    text[..idx]
        .chars()
        .next_back()
        .is_none_or(|ch| !ch.is_alphanumeric())
}

fn is_boundary_after(text: &str, idx: usize) -> bool {
    text[idx..]
        .chars()
        .next()
        .is_none_or(|ch| !ch.is_alphanumeric())
}

fn preceded_by_named(text: &str, idx: usize) -> bool {
    text[..idx]
        .trim_end()
        .rsplit(' ')
        .next()
        .is_some_and(|word| word.eq_ignore_ascii_case("named"))
}

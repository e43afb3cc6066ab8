use super::*;

/// Split normalized text sections into ability units.
///
/// Each section is normally one unit. A section is split further when
/// - a keyword header and its reminder are followed by more text that starts
///   a new sentence ("Bodyguard (…) GUARD DUTY Whenever …"), or
/// - a sentence end at the top level is followed by an ALL-CAPS ability name.
///
/// Em dashes and periods inside parentheses or quotes are never boundaries.
/// Empty sections are dropped.
pub fn segment_sections<S: AsRef<str>>(sections: &[S]) -> Vec<String> {
    let mut units = Vec::new();
    for (idx, section) in sections.iter().enumerate() {
        let section = section.as_ref().trim();
        if section.is_empty() {
            log::debug!("dropping empty text section {idx}");
            continue;
        }
        split_section(section, &mut units);
    }
    units
}

fn split_section(section: &str, units: &mut Vec<String>) {
    let mut rest = section;
    while let Some(header) = keywords::match_header(rest) {
        let tail = rest[header.end..].trim_start();
        let starts_sentence = tail.chars().next().is_some_and(char::is_uppercase);
        if !starts_sentence {
            break;
        }
        units.push(rest[..header.end].trim().to_string());
        rest = tail;
    }

    let mut start = 0usize;
    for boundary in named_ability_boundaries(rest) {
        let unit = rest[start..boundary].trim();
        if !unit.is_empty() {
            units.push(unit.to_string());
        }
        start = boundary;
    }
    let unit = rest[start..].trim();
    if !unit.is_empty() {
        units.push(unit.to_string());
    }
}

/// Byte offsets where a new named ability begins inside one section.
fn named_ability_boundaries(text: &str) -> Vec<usize> {
    let mut boundaries = Vec::new();
    for (idx, ch, depth) in top_level_chars(text) {
        if depth > 0 || !matches!(ch, '.' | '!' | '?' | ')') {
            continue;
        }
        let after = idx + ch.len_utf8();
        let following = &text[after..];
        let trimmed = following.trim_start();
        if trimmed.len() == following.len() {
            continue;
        }
        if leading_caps_name(trimmed).is_some() {
            boundaries.push(after + (following.len() - trimmed.len()));
        }
    }
    boundaries
}

/*!
 * Definition heuristics for the two inline patterns:
 *
 * - `explainable artificial intelligence (XAI)`: the definition is read back
 *   out of a window of text preceding the parenthesis.
 * - `XAI (Explainable Artificial Intelligence)`: the parenthetical is taken
 *   as written when it looks like prose.
 */

use crate::latex;

/// Derive a definition from the text that precedes `(ACR)`.
///
/// With N the acronym length, the last `N * max_chars_per_word` characters
/// are flattened to letters and spaces and the last N words are kept, each
/// capitalized.
pub fn definition_from_window(
    prefix: &str,
    acronym: &str,
    max_chars_per_word: usize,
) -> Option<String> {
    let word_count = acronym.chars().count();
    let window = char_tail(prefix, word_count * max_chars_per_word);

    let flattened: String = latex::strip_noise(window)
        .chars()
        .map(|c| if c.is_alphabetic() || c.is_whitespace() { c } else { ' ' })
        .collect();

    let words: Vec<&str> = flattened.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }

    let take = words.len().saturating_sub(word_count);
    let definition = words[take..]
        .iter()
        .map(|word| capitalize_word(word))
        .collect::<Vec<_>>()
        .join(" ");

    Some(definition)
}

/// Accept the content of `ACR (...)` as a definition when it reads as prose
/// for that acronym.
pub fn definition_from_parenthetical(acronym: &str, inner: &str) -> Option<String> {
    let inner = latex::collapse_whitespace(inner);

    let prose = inner
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace() || c == '-' || c == '\'');
    if !prose || inner.split(' ').count() < 2 {
        return None;
    }

    let first_letter = inner.chars().next()?.to_lowercase().next()?;
    let acronym_letter = acronym.chars().next()?.to_ascii_lowercase();
    if first_letter != acronym_letter {
        return None;
    }

    Some(inner)
}

/// Uppercase the first character and lowercase the rest
pub fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// Last `n` characters of `s`, respecting char boundaries
fn char_tail(s: &str, n: usize) -> &str {
    if n == 0 {
        return s;
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

/*!
 * Casing policies for section titles.
 *
 * Titles may carry markup, so casing only touches plain text. Control
 * sequences (`\textit`, `\&`), math (`$x$`, `\(x\)`, `\[x\]`) and the arguments of
 * reference-like commands (`\label{fig:AI}`, `\cite{Smith2020}`) are left
 * exactly as written.
 */

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Stop words kept lowercase in title case unless they open the title
pub const DEFAULT_STOP_WORDS: [&str; 18] = [
    "and", "or", "for", "the", "a", "an", "of", "in", "to", "on", "at", "by", "with", "nor", "but",
    "so", "yet", "from",
];

/// Commands whose brace argument is a key, not prose
const VERBATIM_ARGUMENT_COMMANDS: [&str; 16] = [
    "label", "ref", "eqref", "pageref", "autoref", "cref", "Cref", "cite", "citep", "citet",
    "url", "href", "gls", "glspl", "acrshort", "ac",
];

/// How a title is rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CasingPolicy {
    /// Title Case: every significant word capitalized
    #[default]
    Uppercase,
    /// Sentence case: only the first letter of the title capitalized
    Capitalize,
    /// Every letter uppercased
    AllCaps,
}

impl CasingPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uppercase => "Uppercase",
            Self::Capitalize => "Capitalize",
            Self::AllCaps => "AllCaps",
        }
    }

    /// Apply the policy with the default stop words
    pub fn apply(&self, title: &str) -> String {
        TitleCaser::default().apply(*self, title)
    }
}

impl fmt::Display for CasingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for CasingPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "uppercase" => Ok(Self::Uppercase),
            "capitalize" => Ok(Self::Capitalize),
            "allcaps" => Ok(Self::AllCaps),
            _ => Err(anyhow!("Invalid title standard: {}", s)),
        }
    }
}

// A title character and whether casing may touch it
#[derive(Debug, Clone, Copy)]
struct Glyph {
    ch: char,
    protected: bool,
}

// Glyph range of one whitespace-separated word
struct Word {
    start: usize,
    end: usize,
}

/// Casing engine holding the stop-word set and acronym handling
#[derive(Debug, Clone)]
pub struct TitleCaser {
    stop_words: HashSet<String>,
    preserve_acronyms: bool,
}

impl Default for TitleCaser {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()), false)
    }
}

impl TitleCaser {
    pub fn new<I: IntoIterator<Item = String>>(stop_words: I, preserve_acronyms: bool) -> Self {
        Self {
            stop_words: stop_words.into_iter().map(|w| w.to_lowercase()).collect(),
            preserve_acronyms,
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }

    /// Rewrite a title under the given policy.
    ///
    /// Surrounding whitespace is trimmed; inner whitespace is kept.
    pub fn apply(&self, policy: CasingPolicy, title: &str) -> String {
        let title = title.trim();
        if title.is_empty() {
            return String::new();
        }

        let glyphs = protect(title);
        let words = split_words(&glyphs);
        let mut out = String::with_capacity(title.len());

        match policy {
            CasingPolicy::AllCaps => {
                for glyph in &glyphs {
                    push_upper_if(&mut out, *glyph, true);
                }
            }
            CasingPolicy::Capitalize => {
                let first_letter = glyphs.iter().position(|g| !g.protected && g.ch.is_alphabetic());
                let mut cursor = 0;
                for word in &words {
                    push_verbatim(&mut out, &glyphs[cursor..word.start]);
                    let keep = self.preserve_acronyms && is_acronym_word(&glyphs[word.start..word.end]);
                    for idx in word.start..word.end {
                        if keep {
                            out.push(glyphs[idx].ch);
                        } else {
                            push_upper_if(&mut out, glyphs[idx], Some(idx) == first_letter);
                        }
                    }
                    cursor = word.end;
                }
                push_verbatim(&mut out, &glyphs[cursor..]);
            }
            CasingPolicy::Uppercase => {
                let mut cursor = 0;
                for (position, word) in words.iter().enumerate() {
                    push_verbatim(&mut out, &glyphs[cursor..word.start]);
                    let slice = &glyphs[word.start..word.end];
                    if self.preserve_acronyms && is_acronym_word(slice) {
                        push_verbatim(&mut out, slice);
                    } else if position > 0 && self.is_stop_word(&clean_word(slice)) {
                        for glyph in slice {
                            push_upper_if(&mut out, *glyph, false);
                        }
                    } else {
                        let first = slice.iter().position(|g| !g.protected && g.ch.is_alphabetic());
                        for (idx, glyph) in slice.iter().enumerate() {
                            push_upper_if(&mut out, *glyph, Some(idx) == first);
                        }
                    }
                    cursor = word.end;
                }
                push_verbatim(&mut out, &glyphs[cursor..]);
            }
        }

        out
    }
}

// Uppercase or lowercase an unprotected glyph; protected glyphs pass through
fn push_upper_if(out: &mut String, glyph: Glyph, upper: bool) {
    if glyph.protected {
        out.push(glyph.ch);
    } else if upper {
        out.extend(glyph.ch.to_uppercase());
    } else {
        out.extend(glyph.ch.to_lowercase());
    }
}

fn push_verbatim(out: &mut String, glyphs: &[Glyph]) {
    out.extend(glyphs.iter().map(|g| g.ch));
}

// Alphanumeric letters of a word, lowercased, for stop-word lookup
fn clean_word(glyphs: &[Glyph]) -> String {
    glyphs
        .iter()
        .filter(|g| !g.protected && g.ch.is_alphanumeric())
        .flat_map(|g| g.ch.to_lowercase())
        .collect()
}

fn is_acronym_word(glyphs: &[Glyph]) -> bool {
    let letters: Vec<char> = glyphs
        .iter()
        .filter(|g| !g.protected && g.ch.is_alphabetic())
        .map(|g| g.ch)
        .collect();
    letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase())
}

fn split_words(glyphs: &[Glyph]) -> Vec<Word> {
    let mut words = Vec::new();
    let mut start = None;
    for (idx, glyph) in glyphs.iter().enumerate() {
        let separator = !glyph.protected && glyph.ch.is_whitespace();
        match (separator, start) {
            (false, None) => start = Some(idx),
            (true, Some(s)) => {
                words.push(Word { start: s, end: idx });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push(Word { start: s, end: glyphs.len() });
    }
    words
}

// Mark the glyphs casing must not touch
fn protect(title: &str) -> Vec<Glyph> {
    let chars: Vec<char> = title.chars().collect();
    let mut protected = vec![false; chars.len()];
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' if matches!(chars.get(i + 1), Some(&'(') | Some(&'[')) => {
                // `\(...\)` and `\[...\]` math, up to the matching close
                let close = if chars[i + 1] == '(' { ')' } else { ']' };
                let mut j = i + 2;
                while j < chars.len() {
                    if chars[j] == '\\' {
                        if chars.get(j + 1) == Some(&close) {
                            j += 2;
                            break;
                        }
                        j += 2;
                        continue;
                    }
                    j += 1;
                }
                let j = j.min(chars.len());
                protected[i..j].iter_mut().for_each(|p| *p = true);
                i = j;
            }
            '\\' => {
                let mut j = i + 1;
                while j < chars.len() && chars[j].is_ascii_alphabetic() {
                    j += 1;
                }
                if j == i + 1 {
                    // Control symbol such as `\&` or `\\`
                    j = (i + 2).min(chars.len());
                } else {
                    let name: String = chars[i + 1..j].iter().collect();
                    if j < chars.len() && chars[j] == '*' {
                        j += 1;
                    }
                    if VERBATIM_ARGUMENT_COMMANDS.contains(&name.as_str()) {
                        j = skip_group(&chars, j);
                    }
                }
                protected[i..j].iter_mut().for_each(|p| *p = true);
                i = j;
            }
            '$' => {
                let mut j = i + 1;
                while j < chars.len() && chars[j] == '$' {
                    j += 1;
                }
                let fence = j - i;
                // Find the matching run of dollars
                while j < chars.len() {
                    if chars[j] == '\\' {
                        j += 2;
                        continue;
                    }
                    if chars[j..].iter().take(fence).filter(|c| **c == '$').count() == fence {
                        j += fence;
                        break;
                    }
                    j += 1;
                }
                let j = j.min(chars.len());
                protected[i..j].iter_mut().for_each(|p| *p = true);
                i = j;
            }
            _ => i += 1,
        }
    }

    chars
        .into_iter()
        .zip(protected)
        .map(|(ch, protected)| Glyph { ch, protected })
        .collect()
}

// Skip optional whitespace and one brace group starting at `from`
fn skip_group(chars: &[char], from: usize) -> usize {
    let mut j = from;
    while j < chars.len() && chars[j].is_whitespace() {
        j += 1;
    }
    if j >= chars.len() || chars[j] != '{' {
        return from;
    }
    let mut depth = 0usize;
    while j < chars.len() {
        match chars[j] {
            '\\' => {
                j += 2;
                continue;
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return j + 1;
                }
            }
            _ => {}
        }
        j += 1;
    }
    chars.len()
}

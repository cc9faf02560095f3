/*!
 * Acronym extraction over LaTeX text.
 *
 * Three patterns are recognized, in text order:
 * - `Full Definition (ACR)`
 * - `ACR (Full Definition)`
 * - bare `ACR` tokens, recorded without a definition
 *
 * All matches feed an explicit `AcronymTable`, so several files can be
 * accumulated into one table by calling `extract_into` per file.
 */

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use super::definition::{definition_from_parenthetical, definition_from_window};
use super::table::{AcronymTable, InsertOutcome};
use crate::app_config::AcronymConfig;
use crate::latex;

/// `(ACR)`: an acronym alone inside parentheses
static PARENTHESIZED_ACRONYM_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(([A-Z][A-Z0-9]+)\)").expect("Invalid parenthesized acronym regex")
});

/// `ACR (...)`: an acronym followed by a parenthetical
static ACRONYM_THEN_PARENTHETICAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Z][A-Z0-9]+)[ \t]*\(([^()\n]+)\)").expect("Invalid acronym parenthetical regex")
});

/// Any acronym-shaped word
static BARE_ACRONYM_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][A-Z0-9]+\b").expect("Invalid bare acronym regex"));

// A candidate binding found at a byte offset of the scanned text
struct Occurrence {
    offset: usize,
    acronym: String,
    definition: Option<String>,
}

/// Acronym extractor configured once and reused across files
#[derive(Debug, Clone)]
pub struct AcronymExtractor {
    config: AcronymConfig,
}

impl AcronymExtractor {
    pub fn new(config: AcronymConfig) -> Self {
        Self { config }
    }

    /// Create an extractor with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(AcronymConfig::default())
    }

    /// Extract acronyms from a text into a fresh table
    pub fn extract(&self, text: &str) -> AcronymTable {
        let mut table = AcronymTable::new();
        self.extract_into(text, &mut table);
        table
    }

    /// Extract acronyms from a text into an existing table.
    ///
    /// Returns the number of entries that were added or received their first
    /// definition.
    pub fn extract_into(&self, text: &str, table: &mut AcronymTable) -> usize {
        let stripped;
        let text = if self.config.strip_comments {
            stripped = latex::strip_comments(text);
            stripped.as_str()
        } else {
            text
        };

        let mut occurrences = self.find_definitions_after(text);
        occurrences.extend(self.find_definitions_before(text));
        if self.config.include_bare_tokens {
            occurrences.extend(self.find_bare_tokens(text));
        }
        occurrences.sort_by_key(|occurrence| occurrence.offset);

        let mut changed = 0;
        for occurrence in occurrences {
            let outcome = table.insert(&occurrence.acronym, occurrence.definition);
            if outcome != InsertOutcome::Unchanged {
                trace!("{:?} {} at byte {}", outcome, occurrence.acronym, occurrence.offset);
                changed += 1;
            }
        }
        changed
    }

    /// Check length limits and the uppercase letter minimum
    pub fn is_acronym(&self, token: &str) -> bool {
        let min_letters = self.config.min_length.max(2);
        let uppercase = token.chars().filter(|c| c.is_ascii_uppercase()).count();
        token.len() <= self.config.max_length && uppercase >= min_letters
    }

    // `Full Definition (ACR)`
    fn find_definitions_after(&self, text: &str) -> Vec<Occurrence> {
        PARENTHESIZED_ACRONYM_REGEX
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let acronym = caps.get(1)?.as_str();
                if !self.is_acronym(acronym) {
                    return None;
                }
                let definition = definition_from_window(
                    &text[..whole.start()],
                    acronym,
                    self.config.max_chars_per_word,
                );
                Some(Occurrence {
                    offset: whole.start(),
                    acronym: acronym.to_string(),
                    definition,
                })
            })
            .collect()
    }

    // `ACR (Full Definition)`
    fn find_definitions_before(&self, text: &str) -> Vec<Occurrence> {
        ACRONYM_THEN_PARENTHETICAL_REGEX
            .captures_iter(text)
            .filter_map(|caps| {
                let token = caps.get(1)?;
                let acronym = token.as_str();
                if is_macro_name(text, token.start()) || !self.is_acronym(acronym) {
                    return None;
                }
                let definition = definition_from_parenthetical(acronym, caps.get(2)?.as_str())?;
                Some(Occurrence {
                    offset: token.start(),
                    acronym: acronym.to_string(),
                    definition: Some(definition),
                })
            })
            .collect()
    }

    fn find_bare_tokens(&self, text: &str) -> Vec<Occurrence> {
        BARE_ACRONYM_REGEX
            .find_iter(text)
            .filter(|m| !is_macro_name(text, m.start()) && self.is_acronym(m.as_str()))
            .map(|m| Occurrence {
                offset: m.start(),
                acronym: m.as_str().to_string(),
                definition: None,
            })
            .collect()
    }
}

impl Default for AcronymExtractor {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// `\ANN` is a macro, not a use of ANN; `\\ANN` is a line break before one
fn is_macro_name(text: &str, start: usize) -> bool {
    let backslashes = text.as_bytes()[..start]
        .iter()
        .rev()
        .take_while(|b| **b == b'\\')
        .count();
    backslashes % 2 == 1
}

/*!
 * Sectioning-command scanner and title rewriter.
 *
 * The scanner walks the text once, looking for `\section`-like commands
 * followed by an optional `*`, an optional `[short title]` and a brace
 * argument. Argument ends are found by counting brace depth, so titles with
 * nested groups such as `\section{Results \textit{and} Discussion}` are
 * taken whole. Commented-out text is skipped. Everything outside the matched
 * arguments is copied through unchanged.
 */

use log::warn;
use std::ops::Range;

use super::casing::{CasingPolicy, TitleCaser};
use super::level::SectionLevel;
use crate::errors::LatexError;

/// One title found in a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleUnit {
    /// Sectioning level of the command
    pub level: SectionLevel,
    /// `\section*` rather than `\section`
    pub starred: bool,
    /// Argument content as written
    pub raw_title: String,
    /// Argument content after casing
    pub rewritten_title: String,
    /// Byte range of the argument content in the original text
    pub span: Range<usize>,
}

impl TitleUnit {
    pub fn is_changed(&self) -> bool {
        self.raw_title != self.rewritten_title
    }
}

/// Result of rewriting one file's text
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    /// Rewritten text
    pub content: String,
    /// Titles found, in text order
    pub titles: Vec<TitleUnit>,
    /// Commands skipped because their argument never closes
    pub malformed: Vec<LatexError>,
}

impl RewriteOutcome {
    /// Number of titles whose text changed
    pub fn changed_count(&self) -> usize {
        self.titles.iter().filter(|t| t.is_changed()).count()
    }

    pub fn is_changed(&self) -> bool {
        self.changed_count() > 0
    }
}

// Argument location found after a command name
struct Argument {
    starred: bool,
    content: Range<usize>,
}

/// Title rewriter for a fixed policy and command set
#[derive(Debug, Clone)]
pub struct TitleRewriter {
    policy: CasingPolicy,
    caser: TitleCaser,
    levels: Vec<SectionLevel>,
}

impl TitleRewriter {
    pub fn new(policy: CasingPolicy, caser: TitleCaser, levels: Vec<SectionLevel>) -> Self {
        Self {
            policy,
            caser,
            levels,
        }
    }

    /// Rewriter for every sectioning level with the default stop words
    pub fn with_policy(policy: CasingPolicy) -> Self {
        Self::new(policy, TitleCaser::default(), SectionLevel::ALL.to_vec())
    }

    /// Find the titles in a text without rewriting it
    pub fn scan(&self, text: &str) -> (Vec<TitleUnit>, Vec<LatexError>) {
        let bytes = text.as_bytes();
        let mut titles = Vec::new();
        let mut malformed = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'%' => i = skip_comment(bytes, i),
                b'\\' => {
                    let name_end = scan_letters(bytes, i + 1);
                    if name_end == i + 1 {
                        // Control symbol: `\%`, `\{`, `\\`
                        i += 2;
                        continue;
                    }

                    let name = &text[i + 1..name_end];
                    let level = match self.level_for(name) {
                        Some(level) => level,
                        None => {
                            i = name_end;
                            continue;
                        }
                    };

                    match parse_argument(bytes, name_end) {
                        Ok(Some(argument)) => {
                            let raw_title = &text[argument.content.clone()];
                            titles.push(TitleUnit {
                                level,
                                starred: argument.starred,
                                raw_title: raw_title.to_string(),
                                rewritten_title: self.caser.apply(self.policy, raw_title),
                                span: argument.content.clone(),
                            });
                            i = argument.content.end + 1;
                        }
                        Ok(None) => i = name_end,
                        Err(()) => {
                            let error = LatexError::MalformedLatexFragment {
                                command: name.to_string(),
                                offset: i,
                            };
                            warn!("{}; left unchanged", error);
                            malformed.push(error);
                            i = name_end;
                        }
                    }
                }
                _ => i += 1,
            }
        }

        (titles, malformed)
    }

    /// Rewrite every recognized title in a text
    pub fn rewrite(&self, text: &str) -> RewriteOutcome {
        let (titles, malformed) = self.scan(text);

        let mut content = String::with_capacity(text.len());
        let mut cursor = 0;
        for title in &titles {
            content.push_str(&text[cursor..title.span.start]);
            content.push_str(&title.rewritten_title);
            cursor = title.span.end;
        }
        content.push_str(&text[cursor..]);

        RewriteOutcome {
            content,
            titles,
            malformed,
        }
    }

    fn level_for(&self, name: &str) -> Option<SectionLevel> {
        SectionLevel::from_command(name).filter(|level| self.levels.contains(level))
    }
}

fn scan_letters(bytes: &[u8], from: usize) -> usize {
    let mut j = from;
    while j < bytes.len() && bytes[j].is_ascii_alphabetic() {
        j += 1;
    }
    j
}

// Position of the newline ending a comment, or end of text
fn skip_comment(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|b| *b == b'\n')
        .map_or(bytes.len(), |offset| from + offset)
}

fn skip_whitespace(bytes: &[u8], from: usize) -> usize {
    let mut j = from;
    while j < bytes.len() && bytes[j].is_ascii_whitespace() {
        j += 1;
    }
    j
}

// Parse `*? [short]? {title}` after a command name.
// `Ok(None)` when no brace argument follows, `Err` when one never closes.
fn parse_argument(bytes: &[u8], from: usize) -> Result<Option<Argument>, ()> {
    // Spaces after a control word are skipped, as TeX does
    let mut j = skip_whitespace(bytes, from);
    let starred = bytes.get(j) == Some(&b'*');
    if starred {
        j += 1;
    }

    j = skip_whitespace(bytes, j);
    if bytes.get(j) == Some(&b'[') {
        j = find_close(bytes, j, b'[', b']').ok_or(())? + 1;
        j = skip_whitespace(bytes, j);
    }

    if bytes.get(j) != Some(&b'{') {
        return Ok(None);
    }

    let close = find_close(bytes, j, b'{', b'}').ok_or(())?;
    Ok(Some(Argument {
        starred,
        content: j + 1..close,
    }))
}

// Index of the delimiter closing the one at `open_at`, counting depth.
// Escaped delimiters and commented text do not count.
fn find_close(bytes: &[u8], open_at: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut j = open_at;
    while j < bytes.len() {
        let b = bytes[j];
        if b == b'\\' {
            j += 2;
            continue;
        }
        if b == b'%' {
            j = skip_comment(bytes, j);
            continue;
        }
        if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Some(j);
            }
        }
        j += 1;
    }
    None
}

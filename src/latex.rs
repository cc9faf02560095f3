/*!
 * Small LaTeX text helpers shared by the extractors.
 *
 * These are textual heuristics, not a parser: comments are removed line by
 * line and common markup is flattened so prose can be read back out of a
 * window of source text.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// `\command{arg}` with a flat argument
static COMMAND_WITH_ARG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\[a-zA-Z]+\*?\{([^}]*)\}").expect("Invalid command regex")
});

/// Any remaining control word
static COMMAND_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\[a-zA-Z]+\*?").expect("Invalid control word regex"));

static WHITESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Return the byte offset of the first unescaped `%` in a line
pub fn comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'%' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Remove LaTeX comments while preserving escaped percent signs.
///
/// Line structure is kept: every input line yields one output line, so byte
/// offsets shift but line numbers do not.
pub fn strip_comments(tex: &str) -> String {
    tex.lines()
        .map(|line| match comment_start(line) {
            Some(idx) => &line[..idx],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Flatten common markup so only prose remains.
///
/// `\emph{neural}` becomes `neural`, other control words and braces become
/// spaces, whitespace is collapsed.
pub fn strip_noise(s: &str) -> String {
    let s = COMMAND_WITH_ARG_REGEX.replace_all(s, "$1");
    let s = COMMAND_REGEX.replace_all(&s, " ");
    let s = s.replace(['{', '}'], " ");
    collapse_whitespace(&s)
}

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_REGEX.replace_all(s, " ").trim().to_string()
}

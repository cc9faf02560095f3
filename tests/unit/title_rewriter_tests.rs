/*!
 * Tests for sectioning-command scanning and rewriting
 */

use latex_doctor::errors::LatexError;
use latex_doctor::titles::{CasingPolicy, SectionLevel, TitleCaser, TitleRewriter};

/// Test the AllCaps rewrite of a simple section
#[test]
fn test_rewrite_withAllCaps_shouldUppercaseSectionTitle() {
    let rewriter = TitleRewriter::with_policy(CasingPolicy::AllCaps);
    let outcome = rewriter.rewrite(r"\section{Results and discussion}");

    assert_eq!(outcome.content, r"\section{RESULTS AND DISCUSSION}");
    assert_eq!(outcome.changed_count(), 1);
    assert!(outcome.malformed.is_empty());
}

/// Test that a title with nested braces is taken whole
#[test]
fn test_scan_withNestedGroup_shouldExtractWholeTitle() {
    let text = r"\section{Results \textit{and} discussion}";
    let rewriter = TitleRewriter::with_policy(CasingPolicy::Uppercase);
    let (titles, malformed) = rewriter.scan(text);

    assert!(malformed.is_empty());
    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0].level, SectionLevel::Section);
    assert_eq!(titles[0].raw_title, r"Results \textit{and} discussion");
    assert_eq!(titles[0].rewritten_title, r"Results \textit{and} Discussion");
    assert_eq!(&text[titles[0].span.clone()], titles[0].raw_title);
}

/// Test that everything outside title arguments is copied unchanged
#[test]
fn test_rewrite_shouldKeepNonTitleContentByteIdentical() {
    let text = "Intro text with \\emph{emphasis}.\n\n\\section{methods}\nBody $x$ % comment\n\\begin{itemize}\n\\item one\n\\end{itemize}\n";
    let rewriter = TitleRewriter::with_policy(CasingPolicy::AllCaps);
    let outcome = rewriter.rewrite(text);

    assert_eq!(outcome.content, text.replace("{methods}", "{METHODS}"));
}

/// Test recovery after an argument that never closes
#[test]
fn test_rewrite_withUnclosedArgument_shouldReportAndContinue() {
    let text = "\\section{Broken\n\\section{fine}\n";
    let rewriter = TitleRewriter::with_policy(CasingPolicy::AllCaps);
    let outcome = rewriter.rewrite(text);

    assert_eq!(outcome.content, "\\section{Broken\n\\section{FINE}\n");
    assert_eq!(outcome.titles.len(), 1);
    assert_eq!(
        outcome.malformed,
        vec![LatexError::MalformedLatexFragment {
            command: "section".to_string(),
            offset: 0,
        }]
    );
}

/// Test that commented-out titles are left alone
#[test]
fn test_rewrite_withCommentedTitle_shouldSkipIt() {
    let rewriter = TitleRewriter::with_policy(CasingPolicy::AllCaps);
    let outcome = rewriter.rewrite("% \\section{old title}\n\\section{new title}");

    assert_eq!(outcome.content, "% \\section{old title}\n\\section{NEW TITLE}");
    assert_eq!(outcome.titles.len(), 1);
}

/// Test that an escaped percent inside a title is not a comment
#[test]
fn test_rewrite_withEscapedPercent_shouldKeepWholeTitle() {
    let rewriter = TitleRewriter::with_policy(CasingPolicy::Uppercase);
    let outcome = rewriter.rewrite(r"\section{growth of 50\% per year}");

    assert_eq!(outcome.content, r"\section{Growth of 50\% Per Year}");
}

/// Test that only the configured levels are rewritten
#[test]
fn test_rewrite_withLevelFilter_shouldIgnoreOtherCommands() {
    let rewriter = TitleRewriter::new(
        CasingPolicy::AllCaps,
        TitleCaser::default(),
        vec![SectionLevel::Chapter],
    );
    let outcome = rewriter.rewrite("\\chapter{intro}\n\\section{methods}");

    assert_eq!(outcome.content, "\\chapter{INTRO}\n\\section{methods}");
}

/// Test starred commands, short titles and spacing before the brace
#[test]
fn test_rewrite_withCommandVariants_shouldRewriteLongTitle() {
    let rewriter = TitleRewriter::with_policy(CasingPolicy::AllCaps);

    let outcome = rewriter.rewrite(r"\section*{acknowledgements}");
    assert_eq!(outcome.content, r"\section*{ACKNOWLEDGEMENTS}");
    assert!(outcome.titles[0].starred);

    let outcome = rewriter.rewrite(r"\section *{spaced star}");
    assert_eq!(outcome.content, r"\section *{SPACED STAR}");
    assert!(outcome.titles[0].starred);

    let outcome = rewriter.rewrite(r"\section[short one]{long one}");
    assert_eq!(outcome.content, r"\section[short one]{LONG ONE}");

    let outcome = rewriter.rewrite(r"\subsection {spaced}");
    assert_eq!(outcome.content, r"\subsection {SPACED}");
    assert_eq!(outcome.titles[0].level, SectionLevel::Subsection);
}

/// Test a sectioning word with no brace argument
#[test]
fn test_rewrite_withoutArgument_shouldLeaveTextUnchanged() {
    let rewriter = TitleRewriter::with_policy(CasingPolicy::AllCaps);
    let text = r"see \section and more";
    let outcome = rewriter.rewrite(text);

    assert_eq!(outcome.content, text);
    assert!(outcome.titles.is_empty());
    assert!(outcome.malformed.is_empty());
    assert!(!outcome.is_changed());
}

/// Test that rewriting twice equals rewriting once
#[test]
fn test_rewrite_twice_shouldBeIdempotent() {
    let text = "\\chapter{an introduction to the field}\n\\section{Related \\textbf{work}}\n\\paragraph{notes on $O(n)$}\n";
    let rewriter = TitleRewriter::with_policy(CasingPolicy::Uppercase);

    let once = rewriter.rewrite(text);
    let twice = rewriter.rewrite(&once.content);

    assert_eq!(twice.content, once.content);
    assert_eq!(twice.changed_count(), 0);
    assert_eq!(once.titles.len(), 3);
}

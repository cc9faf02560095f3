/*!
 * Tests for rendering acronym tables
 */

use anyhow::Result;
use latex_doctor::acronyms::{render, render_json, AcronymTable, ExportMode};
use serde_json::Value;

fn sample_table() -> AcronymTable {
    [
        ("API", Some("Application Programming Interface")),
        ("ANN", Some("Artificial Neural Network")),
    ]
    .iter()
    .map(|(a, d)| (a.to_string(), d.map(str::to_string)))
    .collect()
}

/// Test the exact no-definitions chapter
#[test]
fn test_render_withNoDefinitions_shouldListBareItems() {
    let output = render(&sample_table(), ExportMode::LatexNoDefinitions);

    assert_eq!(
        output,
        "\\chapter{Acronyms}\\label{cha:acronyme}\n\
         \\begin{itemize}\n\
         \\item \\textbf{ANN}\n\
         \\item \\textbf{API}\n\
         \\end{itemize}\n"
    );
}

/// Test the chapter with definitions
#[test]
fn test_render_withDefinitions_shouldAppendDefinitions() {
    let output = render(&sample_table(), ExportMode::LatexWithDefinitions);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], r"\chapter{Acronyms}\label{cha:acronyme}");
    assert_eq!(lines[1], r"\begin{itemize}");
    assert_eq!(lines[2], r"\item \textbf{ANN:} Artificial Neural Network");
    assert_eq!(lines[3], r"\item \textbf{API:} Application Programming Interface");
    assert_eq!(lines[4], r"\end{itemize}");
    assert_eq!(lines.len(), 5);
}

/// Test that a missing definition falls back to the bare item
#[test]
fn test_render_withMissingDefinition_shouldOmitColon() {
    let mut table = sample_table();
    table.insert("GPU", None);

    let output = render(&table, ExportMode::LatexWithDefinitions);

    assert!(output.contains("\\item \\textbf{GPU}\n"));
    assert!(!output.contains("GPU:"));
}

/// Test the plain list layout
#[test]
fn test_render_withPlainList_shouldWriteOneAcronymPerLine() {
    assert_eq!(render(&sample_table(), ExportMode::PlainList), "ANN\nAPI\n");
    assert_eq!(render(&AcronymTable::new(), ExportMode::PlainList), "");
}

/// Test that an empty table still yields a valid chapter
#[test]
fn test_render_withEmptyTable_shouldKeepStructure() {
    let output = render(&AcronymTable::new(), ExportMode::LatexWithDefinitions);
    assert_eq!(
        output,
        "\\chapter{Acronyms}\\label{cha:acronyme}\n\\begin{itemize}\n\\end{itemize}\n"
    );
}

/// Test the JSON object and array forms
#[test]
fn test_renderJson_shouldMapDefinitionsOrListAcronyms() -> Result<()> {
    let mut table = sample_table();
    table.insert("GPU", None);

    let object: Value = serde_json::from_str(&render_json(&table, true)?)?;
    assert_eq!(object["ANN"], "Artificial Neural Network");
    assert!(object["GPU"].is_null());

    let array: Value = serde_json::from_str(&render_json(&table, false)?)?;
    assert_eq!(array, serde_json::json!(["ANN", "API", "GPU"]));

    Ok(())
}

/// Test the mode selection helper
#[test]
fn test_exportMode_latex_shouldFollowDefinitionsFlag() {
    assert_eq!(ExportMode::latex(true), ExportMode::LatexWithDefinitions);
    assert_eq!(ExportMode::latex(false), ExportMode::LatexNoDefinitions);
}

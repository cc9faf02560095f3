/*!
 * Rendering of acronym tables into export text.
 */

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use super::table::AcronymTable;

/// Chapter heading written before the acronym list
pub const LATEX_CHAPTER_HEADER: &str = r"\chapter{Acronyms}\label{cha:acronyme}";

/// Output layout for an exported table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// `\item \textbf{ACR:} Definition`
    LatexWithDefinitions,
    /// `\item \textbf{ACR}`
    LatexNoDefinitions,
    /// One acronym per line, no markup
    PlainList,
}

impl ExportMode {
    /// Pick the LaTeX layout for the `--no-definitions` switch
    pub fn latex(with_definitions: bool) -> Self {
        if with_definitions {
            Self::LatexWithDefinitions
        } else {
            Self::LatexNoDefinitions
        }
    }
}

/// Render the table in the requested layout
pub fn render(table: &AcronymTable, mode: ExportMode) -> String {
    match mode {
        ExportMode::LatexWithDefinitions => render_latex(table, true),
        ExportMode::LatexNoDefinitions => render_latex(table, false),
        ExportMode::PlainList => render_plain(table),
    }
}

fn render_latex(table: &AcronymTable, with_definitions: bool) -> String {
    let mut lines = Vec::with_capacity(table.len() + 3);
    lines.push(LATEX_CHAPTER_HEADER.to_string());
    lines.push(r"\begin{itemize}".to_string());

    for entry in table.iter() {
        // Entries without a definition fall back to the bare form
        match entry.definition.as_deref() {
            Some(definition) if with_definitions && entry.has_definition() => {
                lines.push(format!(r"\item \textbf{{{}:}} {}", entry.acronym, definition));
            }
            _ => lines.push(format!(r"\item \textbf{{{}}}", entry.acronym)),
        }
    }

    lines.push(r"\end{itemize}".to_string());
    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn render_plain(table: &AcronymTable) -> String {
    table
        .iter()
        .map(|entry| format!("{}\n", entry.acronym))
        .collect()
}

/// Render the table as pretty-printed JSON.
///
/// With definitions the result is an object mapping each acronym to its
/// definition or `null`; without, an array of acronyms.
pub fn render_json(table: &AcronymTable, with_definitions: bool) -> Result<String> {
    let value = if with_definitions {
        let map: Map<String, Value> = table
            .iter()
            .map(|entry| {
                let definition = entry
                    .definition
                    .clone()
                    .map(Value::String)
                    .unwrap_or(Value::Null);
                (entry.acronym.clone(), definition)
            })
            .collect();
        Value::Object(map)
    } else {
        Value::Array(
            table
                .acronyms()
                .into_iter()
                .map(|a| Value::String(a.to_string()))
                .collect(),
        )
    };

    serde_json::to_string_pretty(&value).context("Failed to serialize acronyms to JSON")
}

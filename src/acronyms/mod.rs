/*!
 * Acronym extraction and export.
 *
 * - `table`: the deduplicated acronym mapping
 * - `definition`: heuristics reading definitions out of the text
 * - `extractor`: the scan that fills a table
 * - `export`: LaTeX, plain and JSON renderings
 */

pub mod definition;
pub mod export;
pub mod extractor;
pub mod table;

pub use export::{render, render_json, ExportMode, LATEX_CHAPTER_HEADER};
pub use extractor::AcronymExtractor;
pub use table::{AcronymEntry, AcronymTable, InsertOutcome};

/*!
 * # LaTeX-Doctor
 *
 * A Rust library and command-line tool that tidies LaTeX manuscripts.
 *
 * ## Features
 *
 * - Extract acronyms and their definitions from `.tex` sources:
 *   - `explainable artificial intelligence (XAI)`
 *   - `XAI (Explainable Artificial Intelligence)`
 *   - bare `XAI` occurrences
 * - Export the acronyms as a LaTeX chapter, a plain list or JSON
 * - Normalize `\chapter`, `\section` and friends to Title Case,
 *   Sentence case or ALL CAPS without touching embedded markup
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `file_utils`: File discovery, reading and writing
 * - `latex`: Comment and markup stripping helpers
 * - `acronyms`: Acronym table, extraction and export
 * - `titles`: Sectioning-command scanning and casing policies
 * - `app_controller`: Task orchestration and run reports
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod acronyms;
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod latex;
pub mod titles;

// Re-export main types for easier usage
pub use acronyms::{AcronymEntry, AcronymExtractor, AcronymTable, ExportMode};
pub use app_config::Config;
pub use app_controller::{AcronymTaskOptions, Controller, RunReport, TitleTaskOptions};
pub use errors::{DoctorError, LatexError};
pub use file_utils::InputSource;
pub use titles::{CasingPolicy, SectionLevel, TitleRewriter, TitleUnit};

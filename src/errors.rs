/*!
 * Error types for the latex-doctor application.
 *
 * Typed errors for the input layer and for LaTeX fragments the scanner
 * cannot handle, defined with the thiserror crate. The application layer
 * wraps them in `anyhow::Error` when propagating.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scanning LaTeX text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LatexError {
    /// A sectioning command whose brace argument never closes
    #[error("Unbalanced braces in \\{command} argument at byte {offset}")]
    MalformedLatexFragment {
        /// Command name without the leading backslash
        command: String,
        /// Byte offset of the command in the scanned text
        offset: usize,
    },
}

/// Main application error type
#[derive(Error, Debug)]
pub enum DoctorError {
    /// Conflicting or missing input selectors
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Input path that does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Input path that exists but cannot be used
    #[error("Path error for {}: {message}", .path.display())]
    PathError {
        /// Offending path
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the LaTeX scanner
    #[error("LaTeX error: {0}")]
    Latex(#[from] LatexError),
}

impl From<std::io::Error> for DoctorError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

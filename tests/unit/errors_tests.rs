/*!
 * Tests for error types
 */

use latex_doctor::errors::{DoctorError, LatexError};
use std::io;
use std::path::PathBuf;

/// Test the error messages
#[test]
fn test_display_shouldDescribeEachError() {
    let malformed = LatexError::MalformedLatexFragment {
        command: "section".to_string(),
        offset: 42,
    };
    assert_eq!(
        malformed.to_string(),
        r"Unbalanced braces in \section argument at byte 42"
    );

    assert_eq!(
        DoctorError::FileNotFound(PathBuf::from("main.tex")).to_string(),
        "File not found: main.tex"
    );
    assert_eq!(
        DoctorError::PathError {
            path: PathBuf::from("notes.txt"),
            message: "not a directory".to_string(),
        }
        .to_string(),
        "Path error for notes.txt: not a directory"
    );
    assert_eq!(
        DoctorError::Config("bad".to_string()).to_string(),
        "Configuration error: bad"
    );
}

/// Test the conversions into the application error
#[test]
fn test_from_shouldWrapSourceErrors() {
    let latex: DoctorError = LatexError::MalformedLatexFragment {
        command: "chapter".to_string(),
        offset: 0,
    }
    .into();
    assert!(matches!(latex, DoctorError::Latex(_)));
    assert!(latex.to_string().starts_with("LaTeX error: Unbalanced braces"));

    let io_error: DoctorError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
    assert!(matches!(io_error, DoctorError::File(ref message) if message == "denied"));
}

/// Test that typed errors survive the trip through anyhow
#[test]
fn test_anyhow_shouldAllowDowncasting() {
    let error: anyhow::Error = DoctorError::InvalidArguments("both selectors".to_string()).into();
    assert!(matches!(
        error.downcast_ref::<DoctorError>(),
        Some(DoctorError::InvalidArguments(_))
    ));
}

/*!
 * End-to-end tests for the acronym task
 */

use anyhow::Result;
use latex_doctor::app_config::Config;
use latex_doctor::{AcronymTaskOptions, Controller, InputSource};
use serde_json::Value;
use std::fs;
use crate::common;

const EXPECTED_CHAPTER: &str = r"\chapter{Acronyms}\label{cha:acronyme}
\begin{itemize}
\item \textbf{ANN:} Artificial Neural Network
\item \textbf{API:} Application Programming Interface
\item \textbf{GPU}
\end{itemize}
";

fn folder(path: &std::path::Path, recursive: bool) -> InputSource {
    InputSource::Folder {
        path: path.to_path_buf(),
        recursive,
    }
}

/// Test a folder run exporting both the chapter and the plain list
#[test]
fn test_runAcronyms_withFolder_shouldExportChapterAndList() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_manuscript(temp_dir.path())?;
    let latex_path = temp_dir.path().join("exports/acronyms.tex");
    let plain_path = temp_dir.path().join("exports/acronyms.txt");

    let controller = Controller::with_config(Config::default())?;
    let options = AcronymTaskOptions {
        export_latex: Some(latex_path.clone()),
        export_plain: Some(plain_path.clone()),
        ..AcronymTaskOptions::default()
    };
    let run = controller.run_acronyms(&folder(temp_dir.path(), true), &options)?;

    assert_eq!(run.report.processed.len(), 2);
    assert!(!run.report.has_failures());
    assert_eq!(run.report.written, vec![plain_path.clone(), latex_path.clone()]);
    assert!(!run.table.contains("SVM"));
    assert!(run.json.is_none());

    assert_eq!(fs::read_to_string(&latex_path)?, EXPECTED_CHAPTER);
    assert_eq!(fs::read_to_string(&plain_path)?, "ANN\nAPI\nGPU\n");
    Ok(())
}

/// Test the JSON rendering and the no-definitions chapter
#[test]
fn test_runAcronyms_withJsonAndNoDefinitions_shouldDropDefinitions() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let (intro, _) = common::create_manuscript(temp_dir.path())?;
    let latex_path = temp_dir.path().join("acronyms.tex");

    let controller = Controller::with_config(Config::default())?;
    let defined = controller.run_acronyms(
        &InputSource::File(intro.clone()),
        &AcronymTaskOptions {
            json: true,
            ..AcronymTaskOptions::default()
        },
    )?;
    let json: Value = serde_json::from_str(defined.json.as_deref().unwrap_or_default())?;
    assert_eq!(json["ANN"], "Artificial Neural Network");
    assert_eq!(json["API"], "Application Programming Interface");

    let bare = controller.run_acronyms(
        &InputSource::File(intro),
        &AcronymTaskOptions {
            json: true,
            no_definitions: true,
            export_latex: Some(latex_path.clone()),
            ..AcronymTaskOptions::default()
        },
    )?;
    let json: Value = serde_json::from_str(bare.json.as_deref().unwrap_or_default())?;
    assert_eq!(json, serde_json::json!(["ANN", "API"]));

    let chapter = fs::read_to_string(&latex_path)?;
    assert!(chapter.contains("\\item \\textbf{ANN}\n"));
    assert!(!chapter.contains("Artificial"));
    Ok(())
}

/// Test that a non-recursive run skips nested files
#[test]
fn test_runAcronyms_withoutRecursion_shouldSkipSubfolders() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_manuscript(temp_dir.path())?;

    let controller = Controller::with_config(Config::default())?;
    let run = controller.run_acronyms(&folder(temp_dir.path(), false), &AcronymTaskOptions::default())?;

    assert_eq!(run.report.processed.len(), 1);
    assert_eq!(run.table.acronyms(), vec!["ANN", "API"]);
    Ok(())
}

/// Test that a failed export is recorded without aborting the run
#[test]
fn test_runAcronyms_withUnwritableExport_shouldRecordFailure() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let (intro, _) = common::create_manuscript(temp_dir.path())?;
    let plain_path = temp_dir.path().join("list.txt");

    let controller = Controller::with_config(Config::default())?;
    let run = controller.run_acronyms(
        &folder(temp_dir.path(), true),
        &AcronymTaskOptions {
            export_latex: Some(intro.join("acronyms.tex")),
            export_plain: Some(plain_path.clone()),
            ..AcronymTaskOptions::default()
        },
    )?;

    assert!(run.report.has_failures());
    assert_eq!(run.report.failures.len(), 1);
    assert_eq!(run.report.written, vec![plain_path]);
    Ok(())
}

/// Test that a missing input aborts before any work
#[test]
fn test_runAcronyms_withMissingFolder_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(Config::default())?;

    let result = controller.run_acronyms(
        &folder(&temp_dir.path().join("nowhere"), true),
        &AcronymTaskOptions::default(),
    );

    assert!(result.is_err());
    Ok(())
}

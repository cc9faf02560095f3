use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::acronyms::{self, AcronymExtractor, AcronymTable, ExportMode};
use crate::app_config::Config;
use crate::file_utils::{FileManager, InputSource};
use crate::titles::{CasingPolicy, TitleRewriter};

// @module: Application controller for the acronym and title tasks

/// Options of the acronym task
#[derive(Debug, Clone, Default)]
pub struct AcronymTaskOptions {
    /// Destination of the LaTeX chapter export
    pub export_latex: Option<PathBuf>,
    /// Destination of the plain list export
    pub export_plain: Option<PathBuf>,
    /// Render the table as JSON
    pub json: bool,
    /// Omit definitions from the exports
    pub no_definitions: bool,
}

/// Options of the title task
#[derive(Debug, Clone)]
pub struct TitleTaskOptions {
    /// Casing policy to apply
    pub policy: CasingPolicy,
    /// Overwrite the source files
    pub inplace: bool,
    /// Directory receiving rewritten files when not in place
    pub output_dir: PathBuf,
}

/// Per-run bookkeeping shared by both tasks
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Input files that were read successfully
    pub processed: Vec<PathBuf>,
    /// Files written by the run
    pub written: Vec<PathBuf>,
    /// Files that failed, with the reason
    pub failures: Vec<(PathBuf, String)>,
    /// Titles whose text changed
    pub titles_rewritten: usize,
    /// Title commands skipped for unbalanced braces
    pub malformed_titles: usize,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    fn record_failure(&mut self, path: &Path, error: &anyhow::Error) {
        error!("{}: {:#}", path.display(), error);
        self.failures.push((path.to_path_buf(), format!("{:#}", error)));
    }

    pub fn summary(&self) -> String {
        format!(
            "{} processed, {} written, {} errors",
            self.processed.len(),
            self.written.len(),
            self.failures.len()
        )
    }
}

/// Result of the acronym task
#[derive(Debug, Clone)]
pub struct AcronymRun {
    /// Accumulated table over every input file
    pub table: AcronymTable,
    /// JSON rendering when requested
    pub json: Option<String>,
    pub report: RunReport,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Extract acronyms from every input file into one table and export it
    pub fn run_acronyms(&self, source: &InputSource, options: &AcronymTaskOptions) -> Result<AcronymRun> {
        let start_time = std::time::Instant::now();
        let files = source.collect(&self.config.input.extension)?;
        info!("Extracting acronyms from {} file(s)", files.len());

        let extractor = AcronymExtractor::new(self.config.acronyms.clone());
        let mut table = AcronymTable::new();
        let mut report = RunReport::default();

        for file in &files {
            match FileManager::read_to_string_lossy(file) {
                Ok(text) => {
                    let changed = extractor.extract_into(&text, &mut table);
                    debug!("{}: {} new or newly defined acronym(s)", file.display(), changed);
                    report.processed.push(file.clone());
                }
                Err(e) => report.record_failure(file, &e),
            }
        }

        if table.is_empty() {
            warn!("No acronyms found");
        }
        for entry in table.iter() {
            match entry.definition.as_deref() {
                Some(definition) if !options.no_definitions => info!("{}: {}", entry.acronym, definition),
                _ => info!("{}", entry.acronym),
            }
        }

        let with_definitions = !options.no_definitions;
        let json = if options.json {
            Some(acronyms::render_json(&table, with_definitions)?)
        } else {
            None
        };

        if let Some(path) = &options.export_plain {
            let text = acronyms::render(&table, ExportMode::PlainList);
            Self::export(path, &text, &mut report);
        }
        if let Some(path) = &options.export_latex {
            let text = acronyms::render(&table, ExportMode::latex(with_definitions));
            Self::export(path, &text, &mut report);
        }

        info!(
            "Found {} acronym(s), {} with definitions in {}",
            table.len(),
            table.defined_count(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(AcronymRun { table, json, report })
    }

    /// Rewrite the titles of every input file.
    ///
    /// Each file is read, rewritten and written before the next one; a
    /// failure on one file is recorded and the others still run.
    pub fn run_titles(&self, source: &InputSource, options: &TitleTaskOptions) -> Result<RunReport> {
        let start_time = std::time::Instant::now();
        let files = source.collect(&self.config.input.extension)?;
        let rewriter = TitleRewriter::new(
            options.policy,
            self.config.titles.caser(),
            self.config.titles.section_levels()?,
        );

        info!("Standardizing titles in {} file(s) [{}]", files.len(), options.policy);

        let progress_bar = Self::progress_bar(files.len());
        let mut report = RunReport::default();

        for file in &files {
            progress_bar.set_message(
                file.file_name()
                    .map(|f| f.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );

            let original = match FileManager::read_to_string(file) {
                Ok(text) => text,
                Err(e) => {
                    report.record_failure(file, &e);
                    progress_bar.inc(1);
                    continue;
                }
            };
            report.processed.push(file.clone());

            let outcome = rewriter.rewrite(&original);
            report.titles_rewritten += outcome.changed_count();
            report.malformed_titles += outcome.malformed.len();

            let out_path = if options.inplace {
                if !outcome.is_changed() {
                    debug!("Unchanged: {}", file.display());
                    progress_bar.inc(1);
                    continue;
                }
                file.clone()
            } else {
                FileManager::mirrored_output_path(file, source.root(), &options.output_dir)
            };

            match FileManager::write_to_file(&out_path, &outcome.content) {
                Ok(()) => {
                    info!(
                        "Processed: {} -> {} ({} of {} title(s) changed)",
                        file.display(),
                        out_path.display(),
                        outcome.changed_count(),
                        outcome.titles.len()
                    );
                    report.written.push(out_path);
                }
                Err(e) => report.record_failure(&out_path, &e),
            }
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        if report.malformed_titles > 0 {
            warn!("{} title(s) skipped for unbalanced braces", report.malformed_titles);
        }
        info!(
            "Title processing completed in {}: {}",
            Self::format_duration(start_time.elapsed()),
            report.summary()
        );

        Ok(report)
    }

    fn export(path: &Path, text: &str, report: &mut RunReport) {
        match FileManager::write_to_file(path, text) {
            Ok(()) => {
                info!("Exported: {}", path.display());
                report.written.push(path.to_path_buf());
            }
            Err(e) => report.record_failure(path, &e),
        }
    }

    // Hidden for single files
    fn progress_bar(len: usize) -> ProgressBar {
        if len < 2 {
            return ProgressBar::hidden();
        }
        let progress_bar = ProgressBar::new(len as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{bar:40}] {pos}/{len} {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use latex_doctor::app_config::{self, Config};
use latex_doctor::{AcronymTaskOptions, CasingPolicy, Controller, InputSource, RunReport, TitleTaskOptions};

/// Pipeline selected with --task
#[derive(Debug, Clone, PartialEq, ValueEnum)]
enum CliTask {
    /// Extract acronyms and export them
    Acronyms,
    /// Standardize sectioning titles
    Titles,
}

/// CLI Wrapper for CasingPolicy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTitleStandard {
    /// Title Case, stop words kept lowercase
    #[value(name = "Uppercase")]
    Uppercase,
    /// Sentence case
    #[value(name = "Capitalize")]
    Capitalize,
    /// Every letter uppercase
    #[value(name = "AllCaps")]
    AllCaps,
}

impl From<CliTitleStandard> for CasingPolicy {
    fn from(cli_standard: CliTitleStandard) -> Self {
        match cli_standard {
            CliTitleStandard::Uppercase => CasingPolicy::Uppercase,
            CliTitleStandard::Capitalize => CasingPolicy::Capitalize,
            CliTitleStandard::AllCaps => CasingPolicy::AllCaps,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for latex-doctor
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// LaTeX-Doctor - acronym glossaries and consistent titles for LaTeX manuscripts
#[derive(Parser, Debug)]
#[command(name = "latex-doctor")]
#[command(version)]
#[command(about = "Extract acronyms and normalize section titles in LaTeX sources")]
#[command(long_about = "LaTeX-Doctor scans .tex files to build an acronym chapter and to normalize the capitalization of sectioning titles.

EXAMPLES:
    latex-doctor -f main.tex --export-latex acronyms.tex
    latex-doctor -F chapters --json
    latex-doctor -F chapters --no-definitions --export acronyms.txt
    latex-doctor -F chapters --task titles --title-standard AllCaps
    latex-doctor -f intro.tex --task titles --inplace
    latex-doctor completions bash > latex-doctor.bash

CONFIGURATION:
    Settings are read from latex-doctor.json when it exists. Use --config to
    point at another file. Command line flags override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a single .tex file
    #[arg(short = 'f', long, value_name = "PATH", conflicts_with = "folder")]
    file: Option<PathBuf>,

    /// Folder containing .tex files
    #[arg(short = 'F', long, value_name = "PATH")]
    folder: Option<PathBuf>,

    /// Only scan the top level of --folder
    #[arg(long)]
    no_recurse: bool,

    /// Task to perform
    #[arg(long, value_enum, default_value_t = CliTask::Acronyms)]
    task: CliTask,

    /// Export the LaTeX Acronyms chapter to a file
    #[arg(long, value_name = "PATH")]
    export_latex: Option<PathBuf>,

    /// Export acronyms as a plain list to a file
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Print the acronyms as JSON
    #[arg(long)]
    json: bool,

    /// Omit definitions from the exports
    #[arg(long)]
    no_definitions: bool,

    /// Only record acronyms written next to a parenthesis
    #[arg(long)]
    parenthesized_only: bool,

    /// Minimum number of uppercase letters in an acronym
    #[arg(long, value_name = "N")]
    min_length: Option<usize>,

    /// Casing applied to titles
    #[arg(long, value_enum, ignore_case = true)]
    title_standard: Option<CliTitleStandard>,

    /// Modify files in place
    #[arg(long)]
    inplace: bool,

    /// Directory receiving rewritten files
    #[arg(long, value_name = "DIR", conflicts_with = "inplace")]
    output_dir: Option<PathBuf>,

    /// Leave all-caps words untouched in title and sentence case
    #[arg(long)]
    preserve_acronyms: bool,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "latex-doctor.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("🚧", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Filtering happens through log::set_max_level once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "latex-doctor", &mut std::io::stdout());
        return Ok(());
    }

    run(cli)
}

fn run(options: CommandLineOptions) -> Result<()> {
    let mut config = Config::load_or_default(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    if let Some(min_length) = options.min_length {
        config.acronyms.min_length = min_length;
    }
    if options.parenthesized_only {
        config.acronyms.include_bare_tokens = false;
    }
    if let Some(standard) = &options.title_standard {
        config.titles.standard = standard.clone().into();
    }
    if options.preserve_acronyms {
        config.titles.preserve_acronyms = true;
    }
    if let Some(output_dir) = &options.output_dir {
        config.titles.output_dir = output_dir.to_string_lossy().to_string();
    }
    if options.no_recurse {
        config.input.recursive = false;
    }

    log::set_max_level(config.log_level.to_level_filter());
    debug!("Configuration: {:?}", config);

    let source = InputSource::from_selectors(options.file, options.folder, config.input.recursive)?;
    let controller = Controller::with_config(config)?;

    let report = match options.task {
        CliTask::Acronyms => {
            info!("Extracting acronyms...");
            let task_options = AcronymTaskOptions {
                export_latex: options.export_latex,
                export_plain: options.export,
                json: options.json,
                no_definitions: options.no_definitions,
            };
            let run = controller.run_acronyms(&source, &task_options)?;
            if let Some(json) = &run.json {
                println!("{}", json);
            }
            run.report
        }
        CliTask::Titles => {
            info!("Standardizing titles...");
            let titles = &controller.config().titles;
            let task_options = TitleTaskOptions {
                policy: titles.standard,
                inplace: options.inplace,
                output_dir: PathBuf::from(&titles.output_dir),
            };
            controller.run_titles(&source, &task_options)?
        }
    };

    finish(&report)
}

// Non-zero exit once every file had its chance
fn finish(report: &RunReport) -> Result<()> {
    if report.has_failures() {
        return Err(anyhow!("{} file(s) failed: {}", report.failures.len(), report.summary()));
    }
    Ok(())
}

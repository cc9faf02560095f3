use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::DoctorError;
use crate::titles::{CasingPolicy, SectionLevel, TitleCaser, DEFAULT_STOP_WORDS};

/// Application configuration module
/// This module handles loading and validating the optional JSON settings
/// file. Every field has a default, so a partial file is valid.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Acronym extraction settings
    #[serde(default)]
    pub acronyms: AcronymConfig,

    /// Title rewriting settings
    #[serde(default)]
    pub titles: TitleConfig,

    /// Input discovery settings
    #[serde(default)]
    pub input: InputConfig,
}

/// Acronym extraction settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AcronymConfig {
    /// Minimum number of uppercase letters in a token (never below 2)
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Maximum token length
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Characters of look-behind per acronym letter for `Definition (ACR)`
    #[serde(default = "default_max_chars_per_word")]
    pub max_chars_per_word: usize,

    /// Record acronyms that appear without any definition pattern
    #[serde(default = "default_true")]
    pub include_bare_tokens: bool,

    /// Remove `%` comments before scanning
    #[serde(default = "default_true")]
    pub strip_comments: bool,
}

impl Default for AcronymConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
            max_chars_per_word: default_max_chars_per_word(),
            include_bare_tokens: true,
            strip_comments: true,
        }
    }
}

/// Title rewriting settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TitleConfig {
    /// Casing policy applied when the CLI does not override it
    #[serde(default)]
    pub standard: CasingPolicy,

    /// Words kept lowercase by title case unless they open the title
    #[serde(default = "default_stop_words")]
    pub stop_words: Vec<String>,

    /// Sectioning commands to rewrite, without the backslash
    #[serde(default = "default_commands")]
    pub commands: Vec<String>,

    /// Directory receiving rewritten files when not editing in place
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Leave all-caps words untouched in title and sentence case
    #[serde(default)]
    pub preserve_acronyms: bool,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            standard: CasingPolicy::default(),
            stop_words: default_stop_words(),
            commands: default_commands(),
            output_dir: default_output_dir(),
            preserve_acronyms: false,
        }
    }
}

impl TitleConfig {
    /// Resolve the configured command names to section levels
    pub fn section_levels(&self) -> Result<Vec<SectionLevel>> {
        self.commands
            .iter()
            .map(|name| {
                SectionLevel::from_command(name)
                    .ok_or_else(|| anyhow!("Unknown sectioning command: {}", name))
            })
            .collect()
    }

    /// Build the casing engine from the stop words and acronym setting
    pub fn caser(&self) -> TitleCaser {
        TitleCaser::new(self.stop_words.iter().cloned(), self.preserve_acronyms)
    }
}

/// Input discovery settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InputConfig {
    /// Extension of the files collected from a folder
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Descend into subdirectories
    #[serde(default = "default_true")]
    pub recursive: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            recursive: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_min_length() -> usize {
    2
}

fn default_max_length() -> usize {
    20
}

fn default_max_chars_per_word() -> usize {
    30
}

fn default_true() -> bool {
    true
}

fn default_extension() -> String {
    "tex".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_stop_words() -> Vec<String> {
    DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect()
}

fn default_commands() -> Vec<String> {
    SectionLevel::ALL
        .iter()
        .map(|level| level.command().to_string())
        .collect()
}

impl Config {
    /// Load the configuration from a JSON file, or fall back to defaults
    /// when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let acronyms = &self.acronyms;
        if acronyms.min_length < 2 {
            return Err(config_error(format!(
                "acronyms.min_length must be at least 2, got {}",
                acronyms.min_length
            )));
        }

        if acronyms.max_length < acronyms.min_length {
            return Err(config_error(format!(
                "acronyms.max_length ({}) is smaller than acronyms.min_length ({})",
                acronyms.max_length, acronyms.min_length
            )));
        }

        if acronyms.max_chars_per_word == 0 {
            return Err(config_error("acronyms.max_chars_per_word must be positive".to_string()));
        }

        if self.titles.commands.is_empty() {
            return Err(config_error("titles.commands must name at least one command".to_string()));
        }
        self.titles
            .section_levels()
            .map_err(|e| config_error(e.to_string()))?;

        if self.input.extension.trim_start_matches('.').is_empty() {
            return Err(config_error("input.extension must not be empty".to_string()));
        }

        Ok(())
    }
}

fn config_error(message: String) -> anyhow::Error {
    DoctorError::Config(message).into()
}

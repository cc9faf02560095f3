use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::DoctorError;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Find files with a specific extension in a directory, sorted by path
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str, recursive: bool) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let extension = extension.trim_start_matches('.');

        let mut walker = WalkDir::new(dir.as_ref()).follow_links(true);
        if !recursive {
            walker = walker.max_depth(1);
        }

        for entry in walker {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(extension) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Read a file to a string, replacing invalid UTF-8 sequences
    pub fn read_to_string_lossy<P: AsRef<Path>>(path: P) -> Result<String> {
        let bytes = fs::read(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    // @generates: Output path mirroring the input layout
    // @params: input_file, input_root (the scanned folder, if any), output_dir
    pub fn mirrored_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        input_root: Option<&Path>,
        output_dir: P2,
    ) -> PathBuf {
        let input_file = input_file.as_ref();
        let output_dir = output_dir.as_ref();

        let relative = input_root
            .and_then(|root| input_file.strip_prefix(root).ok())
            .map(Path::to_path_buf)
            .or_else(|| input_file.file_name().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("output.tex"));

        output_dir.join(relative)
    }
}

/// Where the input files come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A single file
    File(PathBuf),
    /// Every file with the configured extension in a folder
    Folder { path: PathBuf, recursive: bool },
}

impl InputSource {
    /// Build the source from the mutually exclusive `--file` and `--folder`
    pub fn from_selectors(
        file: Option<PathBuf>,
        folder: Option<PathBuf>,
        recursive: bool,
    ) -> Result<Self, DoctorError> {
        match (file, folder) {
            (Some(file), None) => Ok(Self::File(file)),
            (None, Some(path)) => Ok(Self::Folder { path, recursive }),
            (Some(_), Some(_)) => Err(DoctorError::InvalidArguments(
                "--file and --folder cannot be used together".to_string(),
            )),
            (None, None) => Err(DoctorError::InvalidArguments(
                "At least one of --file or --folder must be specified".to_string(),
            )),
        }
    }

    /// Folder the files are relative to, if any
    pub fn root(&self) -> Option<&Path> {
        match self {
            Self::File(_) => None,
            Self::Folder { path, .. } => Some(path),
        }
    }

    /// Resolve to the list of files to process, sorted by path
    pub fn collect(&self, extension: &str) -> Result<Vec<PathBuf>> {
        match self {
            Self::File(path) => {
                if !FileManager::file_exists(path) {
                    return Err(DoctorError::FileNotFound(path.clone()).into());
                }
                Ok(vec![path.clone()])
            }
            Self::Folder { path, recursive } => {
                if !path.exists() {
                    return Err(DoctorError::FileNotFound(path.clone()).into());
                }
                if !path.is_dir() {
                    return Err(DoctorError::PathError {
                        path: path.clone(),
                        message: "not a directory".to_string(),
                    }
                    .into());
                }

                let files = FileManager::find_files(path, extension, *recursive)?;
                if files.is_empty() {
                    return Err(DoctorError::PathError {
                        path: path.clone(),
                        message: format!("no .{} files found", extension.trim_start_matches('.')),
                    }
                    .into());
                }
                Ok(files)
            }
        }
    }
}

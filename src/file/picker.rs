use crate::error::PdfModError;
use crate::prompt::Prompter;
use colored::Color;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

pub const DEFAULT_EXTENSION: &str = ".pdf";

/// One directory entry offered to the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCandidate {
    pub name: String,
    pub is_dir: bool,
}

impl SelectionCandidate {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    /// Selectable when it is not a directory and ends with `extension`.
    pub fn is_eligible(&self, extension: &str) -> bool {
        !self.is_dir && self.name.ends_with(extension)
    }
}

/// Capability over the candidate directory: list, select, rename.
pub trait FileHandler {
    fn list_files(&self, dir: &Path) -> Result<Vec<SelectionCandidate>, PdfModError>;

    /// Let the user pick one eligible entry; returns its name.
    fn select_file(
        &self,
        files: &[SelectionCandidate],
        prompter: &mut dyn Prompter,
    ) -> Result<String, PdfModError>;

    /// Rename `path` to `<new_name><extension>` in the same directory.
    fn rename_file(&self, path: &Path, new_name: &str) -> Result<PathBuf, PdfModError>;
}

/// Eligible entries in listing order.
pub fn eligible<'a>(
    files: &'a [SelectionCandidate],
    extension: &str,
) -> Vec<&'a SelectionCandidate> {
    files.iter().filter(|f| f.is_eligible(extension)).collect()
}

/// Filesystem-backed [`FileHandler`] for one recognized extension.
#[derive(Debug, Clone)]
pub struct FilePicker {
    extension: String,
}

impl Default for FilePicker {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION)
    }
}

impl FilePicker {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl FileHandler for FilePicker {
    fn list_files(&self, dir: &Path) -> Result<Vec<SelectionCandidate>, PdfModError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|source| PdfModError::ListingFailure {
                path: dir.to_path_buf(),
                source,
            })?;
            files.push(SelectionCandidate {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: entry.file_type().is_dir(),
            });
        }
        debug!(dir = %dir.display(), count = files.len(), "listed directory");
        Ok(files)
    }

    fn select_file(
        &self,
        files: &[SelectionCandidate],
        prompter: &mut dyn Prompter,
    ) -> Result<String, PdfModError> {
        let candidates = eligible(files, &self.extension);

        if candidates.is_empty() {
            return Err(PdfModError::NoEligibleFiles {
                extension: self.extension.clone(),
            });
        }

        for (i, file) in candidates.iter().enumerate() {
            prompter.say(&format!("[{}] {}", i + 1, file.name));
        }

        loop {
            let token = prompter.prompt("Select a file number: ")?;
            let selection: i64 =
                token
                    .parse()
                    .map_err(|source| PdfModError::InvalidSelectionToken {
                        token: token.clone(),
                        source,
                    })?;

            // Negative and oversized numbers are out of range, not malformed.
            let index = usize::try_from(selection)
                .ok()
                .filter(|n| (1..=candidates.len()).contains(n));
            if let Some(index) = index {
                let chosen = &candidates[index - 1].name;
                info!(file = %chosen, "file selected");
                return Ok(chosen.clone());
            }

            prompter.say_colored(
                "Invalid selection. Please select a valid file number.",
                Color::Red,
            );
        }
    }

    fn rename_file(&self, path: &Path, new_name: &str) -> Result<PathBuf, PdfModError> {
        let parent = path.parent().unwrap_or_else(|| Path::new(""));
        let new_path = parent.join(format!("{}{}", new_name, self.extension));

        fs::rename(path, &new_path).map_err(|source| PdfModError::RenameFailure {
            from: path.to_path_buf(),
            to: new_path.clone(),
            source,
        })?;

        info!(from = %path.display(), to = %new_path.display(), "file renamed");
        Ok(new_path)
    }
}

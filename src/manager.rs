//! Interactive top-level flow: pick a file, then rename it or patch its metadata.

use crate::error::PdfModError;
use crate::file::FileHandler;
use crate::pdf::{MetadataHandler, PatchReport};
use crate::prompt::Prompter;
use colored::Color;
use std::fmt;
use std::path::{Path, PathBuf};

/// Actions offered after a file has been selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Rename,
    EditMetadata,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Result<Self, PdfModError> {
        match input {
            "1" => Ok(MenuChoice::Rename),
            "2" => Ok(MenuChoice::EditMetadata),
            other => Err(PdfModError::InvalidMenuChoice {
                choice: other.to_string(),
            }),
        }
    }
}

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "Outcome reports which file was changed"]
pub enum Outcome {
    Renamed { from: PathBuf, to: PathBuf },
    MetadataUpdated { file: PathBuf, report: PatchReport },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Renamed { from, to } => {
                write!(f, "Renamed {} to {}", from.display(), to.display())
            }
            Outcome::MetadataUpdated { file, report } => write!(
                f,
                "Updated metadata of {} in {} attempt(s)",
                file.display(),
                report.attempts
            ),
        }
    }
}

/// Wires a file handler, metadata handler and prompter around one directory.
pub struct PdfManager<F, M, P> {
    directory: PathBuf,
    files: F,
    metadata: M,
    prompter: P,
}

impl<F, M, P> PdfManager<F, M, P>
where
    F: FileHandler,
    M: MetadataHandler,
    P: Prompter,
{
    pub fn new(directory: impl Into<PathBuf>, files: F, metadata: M, prompter: P) -> Self {
        Self {
            directory: directory.into(),
            files,
            metadata,
            prompter,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn metadata_handler(&self) -> &M {
        &self.metadata
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn into_parts(self) -> (F, M, P) {
        (self.files, self.metadata, self.prompter)
    }

    /// Run one full interactive cycle.
    pub fn execute(&mut self) -> Result<Outcome, PdfModError> {
        if !self.directory.is_dir() {
            return Err(PdfModError::DirectoryMissing {
                path: self.directory.clone(),
            });
        }

        let files = self.files.list_files(&self.directory)?;
        let selected = self.files.select_file(&files, &mut self.prompter)?;
        let file_path = self.directory.join(selected);

        self.prompter.say("What would you like to do with the PDF:");
        self.prompter.say("1. Rename the PDF");
        self.prompter.say("2. Modify PDF metadata fields");
        let choice = self.prompter.prompt("Enter the number of your choice: ")?;

        let choice = match MenuChoice::parse(&choice) {
            Ok(choice) => choice,
            Err(e) => {
                self.prompter.say_colored(
                    "Invalid choice. Please restart and select '1' or '2'.",
                    Color::Red,
                );
                return Err(e);
            }
        };

        match choice {
            MenuChoice::Rename => {
                let new_name = self
                    .prompter
                    .prompt("Enter the new name for the PDF (without extension): ")?;
                let new_path = self.files.rename_file(&file_path, &new_name)?;
                self.prompter
                    .say_colored("File renamed successfully.", Color::Green);
                Ok(Outcome::Renamed {
                    from: file_path,
                    to: new_path,
                })
            }
            MenuChoice::EditMetadata => {
                let title = self.prompter.prompt("Enter the new title for the PDF: ")?;
                let producer = self
                    .prompter
                    .prompt("Enter the new producer name for the PDF: ")?;
                let report = self
                    .metadata
                    .update_metadata(&file_path, &title, &producer)?;
                self.prompter
                    .say_colored("PDF metadata updated successfully.", Color::Green);
                Ok(Outcome::MetadataUpdated {
                    file: file_path,
                    report,
                })
            }
        }
    }
}

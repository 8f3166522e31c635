use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfModError {
    #[error("directory {path} does not exist; create it and add some PDF files")]
    DirectoryMissing { path: PathBuf },

    #[error("failed to list files in {path}: {source}")]
    ListingFailure {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("no valid {extension} files found; consider adding some")]
    NoEligibleFiles { extension: String },

    #[error("invalid selection '{token}': {source}")]
    InvalidSelectionToken {
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("could not read PDF file {path}: {source}")]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write updated PDF file {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to update PDF metadata after {attempts} attempts")]
    VerificationExhausted { attempts: u32 },

    #[error("invalid choice '{choice}': select '1' or '2'")]
    InvalidMenuChoice { choice: String },

    #[error("failed to rename {from} to {to}: {source}")]
    RenameFailure {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read input: {0}")]
    Input(#[source] std::io::Error),
}

//! pdfmod: rename PDF files or patch their Title/Producer metadata in place
//!
//! Metadata patching works on the raw bytes of the file without a PDF
//! parser: the literal markers `/Title (` and `/Producer (` are located and
//! the text up to the next `)` is replaced. Only flat, uncompressed,
//! unencrypted documents with those markers in plain text are supported.
//!
//! # Architecture
//!
//! - [`pdf::locate`] finds a field's value span in a buffer.
//! - [`pdf::replace`] splices a new value over that span.
//! - [`pdf::MetadataPatcher`] runs read, patch, write and verify with a
//!   bounded retry on failed verification.
//! - [`file::FilePicker`] lists, selects and renames candidate files.
//! - [`manager::PdfManager`] ties them together behind a [`prompt::Prompter`].
//!
//! Changing a value's length shifts every later byte in the file; offsets
//! recorded elsewhere (cross-reference tables) are not repaired.
//!
//! # Example
//!
//! ```no_run
//! use pdfmod::pdf::{MetadataPatcher, NoBackoff};
//! use std::path::Path;
//!
//! let mut patcher = MetadataPatcher::new(10, NoBackoff);
//! match patcher.patch(Path::new("pdf_files/report.pdf"), "Annual Report", "pdfmod") {
//!     Ok(report) => println!("updated after {} attempt(s)", report.attempts),
//!     Err(e) => eprintln!("update failed: {}", e),
//! }
//! ```

pub mod config;
pub mod error;
pub mod file;
pub mod manager;
pub mod pdf;
pub mod prompt;

// Re-exports
pub use config::{
    load_from_path, load_from_str, load_or_default, ConfigError, ConfigSource, PdfModConfig,
};
pub use error::PdfModError;
pub use file::{FileHandler, FilePicker, SelectionCandidate};
pub use manager::{MenuChoice, Outcome, PdfManager};
pub use pdf::{
    Backoff, FieldLocation, FieldOutcome, FieldSpec, FixedBackoff, MetadataHandler,
    MetadataPatcher, NoBackoff, PatchReport,
};
pub use prompt::{ConsolePrompter, Prompter};

pub mod picker;

pub use picker::{eligible, FileHandler, FilePicker, SelectionCandidate, DEFAULT_EXTENSION};

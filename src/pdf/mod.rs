pub mod locator;
pub mod patcher;
pub mod replacer;
pub mod verifier;

pub use locator::{locate, FieldLocation, FieldSpec};
pub use patcher::{
    Backoff, FixedBackoff, MetadataHandler, MetadataPatcher, NoBackoff, PatchReport,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY,
};
pub use replacer::{replace, replace_field, FieldOutcome};
pub use verifier::{fields_present, verify_update};

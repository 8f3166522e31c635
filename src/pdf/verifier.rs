use crate::pdf::locator::{contains, FieldSpec};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Check that a buffer carries both `/Title (<title>)` and `/Producer (<producer>)`.
pub fn fields_present(buffer: &[u8], title: &str, producer: &str) -> bool {
    contains(buffer, &FieldSpec::TITLE.serialized(title))
        && contains(buffer, &FieldSpec::PRODUCER.serialized(producer))
}

/// Re-read `path` and confirm the expected values landed on disk.
///
/// A read failure counts as a failed verification rather than an error, so
/// the caller retries instead of aborting.
pub fn verify_update(path: &Path, title: &str, producer: &str) -> bool {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read PDF file for verification");
            return false;
        }
    };

    if fields_present(&data, title, producer) {
        info!("verification succeeded: Title and Producer fields updated correctly");
        true
    } else {
        warn!("verification failed: Title or Producer fields not updated correctly");
        false
    }
}

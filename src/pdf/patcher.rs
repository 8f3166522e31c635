//! In-place Title/Producer patching with post-write verification.
//!
//! Each attempt is a full cycle: read the file from disk, replace Title then
//! Producer on the evolving buffer, write the whole buffer back, and re-read
//! to verify. Read and write failures abort immediately; only a failed
//! verification is retried, up to a fixed number of attempts.

use crate::error::PdfModError;
use crate::pdf::locator::FieldSpec;
use crate::pdf::replacer::{replace_field, FieldOutcome};
use crate::pdf::verifier::verify_update;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Capability to rewrite the Title/Producer metadata of a document.
pub trait MetadataHandler {
    fn update_metadata(
        &mut self,
        path: &Path,
        title: &str,
        producer: &str,
    ) -> Result<PatchReport, PdfModError>;
}

/// Pause between attempts.
pub trait Backoff {
    /// Called after failed attempt number `attempt` when another one follows.
    fn wait(&mut self, attempt: u32);
}

/// Sleeps the current thread for a fixed interval.
#[derive(Debug, Clone, Copy)]
pub struct FixedBackoff(pub Duration);

impl Default for FixedBackoff {
    fn default() -> Self {
        FixedBackoff(DEFAULT_RETRY_DELAY)
    }
}

impl Backoff for FixedBackoff {
    fn wait(&mut self, attempt: u32) {
        debug!(attempt, delay_ms = self.0.as_millis() as u64, "waiting before retry");
        thread::sleep(self.0);
    }
}

/// Retries immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBackoff;

impl Backoff for NoBackoff {
    fn wait(&mut self, _attempt: u32) {}
}

/// Result of a verified metadata update.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "PatchReport describes which fields were touched"]
pub struct PatchReport {
    /// Number of attempts used, 1-based.
    pub attempts: u32,
    /// Field outcomes of the successful attempt, Title first.
    pub fields: Vec<FieldOutcome>,
}

/// Outcome of a single read-patch-write-verify cycle.
#[derive(Debug)]
enum AttemptResult {
    Success(Vec<FieldOutcome>),
    VerificationFailed,
}

/// Bounded-retry patcher for the Title and Producer fields.
#[derive(Debug, Clone)]
pub struct MetadataPatcher<B = FixedBackoff> {
    max_attempts: u32,
    backoff: B,
}

impl Default for MetadataPatcher<FixedBackoff> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, FixedBackoff::default())
    }
}

impl<B: Backoff> MetadataPatcher<B> {
    /// `max_attempts` is clamped to at least one attempt.
    pub fn new(max_attempts: u32, backoff: B) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self) -> &B {
        &self.backoff
    }

    /// Patch `path` until verification passes or attempts run out.
    pub fn patch(
        &mut self,
        path: &Path,
        title: &str,
        producer: &str,
    ) -> Result<PatchReport, PdfModError> {
        for attempt in 1..=self.max_attempts {
            info!(attempt, path = %path.display(), "attempting to update PDF metadata");

            match attempt_once(path, title, producer)? {
                AttemptResult::Success(fields) => {
                    info!(attempt, "PDF metadata updated successfully");
                    return Ok(PatchReport {
                        attempts: attempt,
                        fields,
                    });
                }
                AttemptResult::VerificationFailed => {
                    warn!(attempt, "verification failed");
                    if attempt < self.max_attempts {
                        self.backoff.wait(attempt);
                    }
                }
            }
        }

        Err(PdfModError::VerificationExhausted {
            attempts: self.max_attempts,
        })
    }
}

impl<B: Backoff> MetadataHandler for MetadataPatcher<B> {
    fn update_metadata(
        &mut self,
        path: &Path,
        title: &str,
        producer: &str,
    ) -> Result<PatchReport, PdfModError> {
        self.patch(path, title, producer)
    }
}

/// One full cycle. The buffer is read fresh from disk every time.
fn attempt_once(path: &Path, title: &str, producer: &str) -> Result<AttemptResult, PdfModError> {
    let document = fs::read(path).map_err(|source| PdfModError::ReadFailure {
        path: path.to_path_buf(),
        source,
    })?;

    let (document, title_outcome) = replace_field(document, &FieldSpec::TITLE, title);
    let (document, producer_outcome) = replace_field(document, &FieldSpec::PRODUCER, producer);

    atomic_write(path, &document).map_err(|source| PdfModError::WriteFailure {
        path: path.to_path_buf(),
        source,
    })?;

    if verify_update(path, title, producer) {
        Ok(AttemptResult::Success(vec![title_outcome, producer_outcome]))
    } else {
        Ok(AttemptResult::VerificationFailed)
    }
}

/// Atomic file write: tempfile + fsync + rename.
///
/// Symlinks are resolved first so the document they point at is replaced,
/// not the link. The replacement keeps the permissions of the file it
/// overwrites.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let target = fs::canonicalize(path)?;
    let parent = target.parent().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Path has no parent directory",
        )
    })?;

    let permissions = fs::metadata(&target)?.permissions();
    let mut temp = tempfile::NamedTempFile::new_in(parent)?;

    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    fs::set_permissions(temp.path(), permissions)?;

    temp.persist(&target).map_err(|e| e.error)?;

    Ok(())
}

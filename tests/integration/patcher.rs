//! Integration tests for the retrying metadata patcher.

use pdfmod::pdf::{Backoff, FieldOutcome, FieldSpec, MetadataPatcher, NoBackoff};
use pdfmod::PdfModError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SAMPLE_PDF: &[u8] = b"%PDF-1.4\n1 0 obj\n<< /Title (Old Title) /Producer (Old Producer) >>\nendobj\ntrailer\n<< /Root 1 0 R >>\n%%EOF";

#[derive(Default)]
struct RecordingBackoff {
    waits: u32,
}

impl Backoff for RecordingBackoff {
    fn wait(&mut self, _attempt: u32) {
        self.waits += 1;
    }
}

fn write_sample(contents: &[u8]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.pdf");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_update_metadata_successive_values() {
    let (_dir, path) = write_sample(SAMPLE_PDF);
    let mut patcher = MetadataPatcher::new(10, NoBackoff);

    for (title, producer) in [
        ("New Title", "New Producer"),
        ("Another Title", "Another Producer"),
    ] {
        let report = patcher.patch(&path, title, producer).unwrap();
        assert_eq!(report.attempts, 1);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains(&format!("/Title ({title})")));
        assert!(content.contains(&format!("/Producer ({producer})")));
    }
}

#[test]
fn test_patch_is_idempotent() {
    let (_dir, path) = write_sample(SAMPLE_PDF);
    let mut patcher = MetadataPatcher::new(10, RecordingBackoff::default());

    patcher.patch(&path, "Same", "Same Producer").unwrap();
    let first = fs::read(&path).unwrap();

    let report = patcher.patch(&path, "Same", "Same Producer").unwrap();
    assert_eq!(report.attempts, 1);
    assert_eq!(patcher.backoff().waits, 0);
    assert_eq!(fs::read(&path).unwrap(), first);
}

#[test]
fn test_patch_reports_length_change_without_offset_repair() {
    let (_dir, path) = write_sample(SAMPLE_PDF);
    let mut patcher = MetadataPatcher::new(10, NoBackoff);

    patcher.patch(&path, "T", "P").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.len(), SAMPLE_PDF.len() - 8 - 11);
    assert!(content.ends_with("trailer\n<< /Root 1 0 R >>\n%%EOF"));
}

#[test]
fn test_missing_producer_exhausts_retries() {
    let (_dir, path) = write_sample(b"%PDF-1.4\n<< /Title (Old Title) >>\n%%EOF");
    let mut patcher = MetadataPatcher::new(10, RecordingBackoff::default());

    let err = patcher.patch(&path, "New Title", "New Producer").unwrap_err();

    assert!(matches!(err, PdfModError::VerificationExhausted { attempts: 10 }));
    assert_eq!(err.to_string(), "failed to update PDF metadata after 10 attempts");
    assert_eq!(patcher.backoff().waits, 9);

    // The title half was still written on every attempt.
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("/Title (New Title)"));
}

#[test]
fn test_unescaped_paren_in_title_exhausts_retries() {
    // The new title carries the old Producer value, so the Producer splice
    // lands inside the title, and the stray ')' stays behind every attempt.
    let (_dir, path) = write_sample(b"<< /Title (Old) /Producer (Acme) >>");
    let mut patcher = MetadataPatcher::new(10, RecordingBackoff::default());

    let err = patcher.patch(&path, "Acme)", "P").unwrap_err();

    assert!(matches!(err, PdfModError::VerificationExhausted { attempts: 10 }));
    assert_eq!(patcher.backoff().waits, 9);

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("/Producer (Acme)"));
    assert!(content.starts_with("<< /Title (P))"));
}

#[test]
fn test_retry_rereads_file_and_recovers() {
    // "Old" appears in a comment before the Title field, so the first attempt
    // rewrites the comment instead. The second attempt re-reads the file and
    // hits the field.
    let (_dir, path) = write_sample(b"%PDF-1.4\n% Old\n<< /Title (Old) /Producer (Acme) >>");
    let mut patcher = MetadataPatcher::new(3, RecordingBackoff::default());

    let report = patcher.patch(&path, "New", "Acme").unwrap();

    assert_eq!(report.attempts, 2);
    assert_eq!(patcher.backoff().waits, 1);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "%PDF-1.4\n% New\n<< /Title (New) /Producer (Acme) >>"
    );
}

#[test]
fn test_skipped_fields_are_reported() {
    let (_dir, path) = write_sample(b"<< /Producer (P) >>");
    let mut patcher = MetadataPatcher::new(1, NoBackoff);

    // No Title marker, so verification cannot pass.
    assert!(patcher.patch(&path, "T", "Q").is_err());

    let (_dir, path) = write_sample(b"/Title (A) /Producer (B)");
    let report = patcher.patch(&path, "C", "D").unwrap();
    assert_eq!(
        report.fields,
        vec![
            FieldOutcome::Replaced {
                field: FieldSpec::TITLE,
                old_len: 1,
                new_len: 1
            },
            FieldOutcome::Replaced {
                field: FieldSpec::PRODUCER,
                old_len: 1,
                new_len: 1
            },
        ]
    );
}

#[test]
fn test_read_failure_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut patcher = MetadataPatcher::new(10, RecordingBackoff::default());

    let err = patcher
        .patch(&dir.path().join("absent.pdf"), "T", "P")
        .unwrap_err();

    assert!(matches!(err, PdfModError::ReadFailure { .. }));
    assert_eq!(patcher.backoff().waits, 0);
}

#[test]
#[cfg(unix)]
fn test_write_failure_is_fatal() {
    use std::os::unix::fs::PermissionsExt;

    let (dir, path) = write_sample(SAMPLE_PDF);
    fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o555)).unwrap();

    // Root ignores directory permissions; nothing to check in that case.
    let probe = fs::write(dir.path().join("probe"), b"");
    if probe.is_ok() {
        fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let mut patcher = MetadataPatcher::new(10, RecordingBackoff::default());
    let err = patcher.patch(&path, "T", "P").unwrap_err();

    fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(err, PdfModError::WriteFailure { .. }));
    assert_eq!(patcher.backoff().waits, 0);
    assert_eq!(fs::read(&path).unwrap(), SAMPLE_PDF.to_vec());
}

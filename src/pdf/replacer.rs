//! Field value substitution over a raw document buffer.
//!
//! Replacement is a plain byte splice: the buffer grows or shrinks by the
//! difference between the new and old value lengths and nothing else in the
//! document (cross-reference offsets included) is adjusted.

use crate::pdf::locator::{find, locate, FieldLocation, FieldSpec};
use tracing::{debug, info};

/// What happened to a single field during a patch pass.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "FieldOutcome reports whether the field was actually replaced"]
pub enum FieldOutcome {
    /// The value was substituted; the buffer length changed by `new_len - old_len`.
    Replaced {
        field: FieldSpec,
        old_len: usize,
        new_len: usize,
    },
    /// The marker was absent; buffer passed through unchanged.
    SkippedNotFound { field: FieldSpec },
    /// The marker had no terminator; buffer passed through unchanged.
    SkippedMalformed { field: FieldSpec },
}

impl FieldOutcome {
    pub fn is_replaced(&self) -> bool {
        matches!(self, FieldOutcome::Replaced { .. })
    }
}

/// Substitute the value at `location` with `new_value`.
///
/// The first occurrence of the located value's bytes anywhere in the buffer
/// is replaced, which is the located span itself unless the same bytes
/// appear earlier in the document. An empty value is replaced in place.
/// `NotFound` and `Malformed` locations return the buffer untouched.
pub fn replace(buffer: Vec<u8>, location: &FieldLocation, new_value: &str) -> Vec<u8> {
    let Some(span) = location.span() else {
        return buffer;
    };

    let start = if span.is_empty() {
        span.start
    } else {
        // The located span is itself an occurrence, so this always succeeds.
        find(&buffer, &buffer[span.clone()]).unwrap_or(span.start)
    };
    let end = start + span.len();

    let mut patched = Vec::with_capacity(buffer.len() - span.len() + new_value.len());
    patched.extend_from_slice(&buffer[..start]);
    patched.extend_from_slice(new_value.as_bytes());
    patched.extend_from_slice(&buffer[end..]);
    patched
}

/// Locate `field` in `buffer` and substitute its value.
pub fn replace_field(
    buffer: Vec<u8>,
    field: &FieldSpec,
    new_value: &str,
) -> (Vec<u8>, FieldOutcome) {
    let location = locate(&buffer, field);
    match location {
        FieldLocation::NotFound => {
            info!(field = %field, "field not found in PDF, skipping replacement");
            (buffer, FieldOutcome::SkippedNotFound { field: *field })
        }
        FieldLocation::Malformed => {
            info!(field = %field, "end of field value not found, skipping replacement");
            (buffer, FieldOutcome::SkippedMalformed { field: *field })
        }
        FieldLocation::Found {
            value_start,
            value_end,
        } => {
            debug!(
                field = %field,
                old = %String::from_utf8_lossy(&buffer[value_start..value_end]),
                "located field value"
            );
            info!(field = %field, value = new_value, "replacing field value");
            let old_len = value_end - value_start;
            let patched = replace(buffer, &location, new_value);
            (
                patched,
                FieldOutcome::Replaced {
                    field: *field,
                    old_len,
                    new_len: new_value.len(),
                },
            )
        }
    }
}

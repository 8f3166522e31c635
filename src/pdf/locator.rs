use std::fmt;
use std::ops::Range;

/// Closing delimiter of a literal metadata value.
pub const VALUE_TERMINATOR: u8 = b')';

/// A metadata field addressed by its serialized marker `/<Name> (`.
///
/// The value runs until the first `)` after the marker. Escaped parentheses
/// inside the value are not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    name: &'static str,
}

impl FieldSpec {
    pub const TITLE: FieldSpec = FieldSpec { name: "Title" };
    pub const PRODUCER: FieldSpec = FieldSpec { name: "Producer" };

    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The byte sequence that opens the field, e.g. `/Title (`.
    pub fn marker(&self) -> Vec<u8> {
        format!("/{} (", self.name).into_bytes()
    }

    /// The full serialized form of the field holding `value`.
    pub fn serialized(&self, value: &str) -> Vec<u8> {
        format!("/{} ({})", self.name, value).into_bytes()
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Outcome of searching a buffer for a field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldLocation {
    /// Byte span of the value, exclusive of the marker and terminator.
    Found { value_start: usize, value_end: usize },
    /// The marker does not occur in the buffer.
    NotFound,
    /// The marker occurs but no terminator follows it.
    Malformed,
}

impl FieldLocation {
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            FieldLocation::Found {
                value_start,
                value_end,
            } => Some(*value_start..*value_end),
            _ => None,
        }
    }

    /// The current value bytes, if the field was found.
    pub fn value<'a>(&self, buffer: &'a [u8]) -> Option<&'a [u8]> {
        self.span().map(|span| &buffer[span])
    }
}

/// Locate the value of `field` in `buffer`.
///
/// Always scans from the start of the buffer, so each call sees the latest
/// state of a buffer that earlier replacements may have resized.
pub fn locate(buffer: &[u8], field: &FieldSpec) -> FieldLocation {
    let marker = field.marker();
    let Some(marker_start) = find(buffer, &marker) else {
        return FieldLocation::NotFound;
    };

    let value_start = marker_start + marker.len();
    match buffer[value_start..]
        .iter()
        .position(|&b| b == VALUE_TERMINATOR)
    {
        Some(offset) => FieldLocation::Found {
            value_start,
            value_end: value_start + offset,
        },
        None => FieldLocation::Malformed,
    }
}

/// First offset of `needle` in `haystack`. An empty needle matches at 0.
pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Whether `needle` occurs anywhere in `haystack`.
pub(crate) fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    find(haystack, needle).is_some()
}

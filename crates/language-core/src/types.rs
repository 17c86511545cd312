//! Core types for reference analysis.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source code (0-indexed row and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// 0-indexed line number
    pub row: u32,
    /// 0-indexed column (byte offset within line)
    pub column: u32,
}

impl Position {
    /// Create a new position.
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// A byte range in source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ByteRange {
    /// Start byte offset (inclusive)
    pub start: u32,
    /// End byte offset (exclusive)
    pub end: u32,
}

impl ByteRange {
    /// Create a new byte range.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Check if this range contains the given byte offset.
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Check if this range is contained within another range.
    pub fn is_within(&self, outer: &ByteRange) -> bool {
        self.start >= outer.start && self.end <= outer.end
    }

    /// Get the length of this range in bytes.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Check if this range is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Shift both ends by `delta` bytes.
    pub fn shifted(&self, delta: u32) -> Self {
        Self::new(self.start + delta, self.end + delta)
    }

    /// The source text covered by this range, if it lies on char boundaries.
    pub fn slice<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.start as usize..self.end as usize)
    }
}

/// The syntactic role of one occurrence of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccurrenceKind {
    /// Declaration (function/class name, declarator, parameter, catch param, slot variable)
    Decl,
    /// A read
    Ref,
    /// A write or constant violation
    Mut,
    /// Binding introduced by `import { x }`
    Namimp,
    /// Binding introduced by `import x`
    Defimp,
}

impl OccurrenceKind {
    /// Short label used in serialized output and test fixtures.
    pub fn as_str(&self) -> &'static str {
        match self {
            OccurrenceKind::Decl => "decl",
            OccurrenceKind::Ref => "ref",
            OccurrenceKind::Mut => "mut",
            OccurrenceKind::Namimp => "namimp",
            OccurrenceKind::Defimp => "defimp",
        }
    }

    /// Parse a label produced by [`OccurrenceKind::as_str`].
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "decl" => Some(OccurrenceKind::Decl),
            "ref" => Some(OccurrenceKind::Ref),
            "mut" => Some(OccurrenceKind::Mut),
            "namimp" => Some(OccurrenceKind::Namimp),
            "defimp" => Some(OccurrenceKind::Defimp),
            _ => None,
        }
    }

    /// Whether this occurrence introduces the binding.
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            OccurrenceKind::Decl | OccurrenceKind::Namimp | OccurrenceKind::Defimp
        )
    }
}

impl fmt::Display for OccurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra information a renamer needs to keep an occurrence valid, e.g.
/// `{ foo }` has to become `{ foo: bar }` rather than `{ bar }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameHint {
    /// The occurrence is both key and value of a shorthand construct
    pub shorthand: bool,
    /// Range of the key when it is spelled separately
    pub key: Option<ByteRange>,
    /// Text placed between key and value when expanding a shorthand
    pub delimiter: &'static str,
}

impl RenameHint {
    /// Hint for `{ foo }` style object properties and patterns.
    pub fn shorthand_property() -> Self {
        Self {
            shorthand: true,
            key: None,
            delimiter: ": ",
        }
    }

    /// Hint for `key: foo` object properties.
    pub fn keyed_property(key: ByteRange) -> Self {
        Self {
            shorthand: false,
            key: Some(key),
            delimiter: ": ",
        }
    }

    /// Hint for import specifiers (`{ foo }` or `{ foo as bar }`).
    pub fn import_specifier(imported: Option<ByteRange>) -> Self {
        Self {
            shorthand: imported.is_none(),
            key: imported,
            delimiter: " as ",
        }
    }
}

/// One occurrence of a binding: a range of source text and its role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    /// Byte range of the name
    pub range: ByteRange,
    /// Syntactic role
    pub kind: OccurrenceKind,
    /// Rename hint for shorthand constructs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rename: Option<RenameHint>,
}

impl Occurrence {
    /// Create a new occurrence without a rename hint.
    pub fn new(range: ByteRange, kind: OccurrenceKind) -> Self {
        Self {
            range,
            kind,
            rename: None,
        }
    }

    /// Attach a rename hint.
    pub fn with_rename(mut self, rename: RenameHint) -> Self {
        self.rename = Some(rename);
        self
    }

    /// Start offset of the occurrence.
    pub fn start(&self) -> u32 {
        self.range.start
    }
}

/// Sort occurrences by position and drop repeated ranges.
///
/// When the same range is reported twice the first reported kind wins, so
/// analyzers push declarations before references.
pub fn normalize_occurrences(occurrences: &mut Vec<Occurrence>) {
    occurrences.sort_by_key(|o| (o.range.start, o.range.end));
    occurrences.dedup_by_key(|o| o.range);
}

/// A pair of points, as returned by [`crate::Locator::range_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointRange {
    pub start: Position,
    pub end: Position,
}

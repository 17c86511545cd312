//! Conversion between flat byte offsets and row/column points.

use crate::error::LocatorError;
use crate::types::{ByteRange, PointRange, Position};

/// Line-start table for one text snapshot.
///
/// Recognized line breaks are `\r\n`, `\n` and `\r`. The table is built
/// once in [`Locator::new`] and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    line_starts: Vec<u32>,
    len: u32,
}

impl Locator {
    /// Build the line-start table for `text`.
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    i += 2;
                    line_starts.push(i as u32);
                }
                b'\r' | b'\n' => {
                    i += 1;
                    line_starts.push(i as u32);
                }
                _ => i += 1,
            }
        }
        Self {
            line_starts,
            len: bytes.len() as u32,
        }
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of lines (an empty text has one line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Offset of the first byte of `row`.
    pub fn line_start(&self, row: u32) -> Option<u32> {
        self.line_starts.get(row as usize).copied()
    }

    /// Flat offset of a point: `line_starts[row] + column`.
    pub fn offset_of(&self, point: Position) -> Result<u32, LocatorError> {
        let start = self
            .line_start(point.row)
            .ok_or(LocatorError::RowOutOfBounds {
                row: point.row,
                rows: self.line_starts.len(),
            })?;
        Ok(start + point.column)
    }

    /// Point of a flat offset in `0..=len`.
    pub fn point_of(&self, offset: u32) -> Result<Position, LocatorError> {
        if offset > self.len {
            return Err(LocatorError::OffsetOutOfBounds {
                offset,
                len: self.len,
            });
        }
        // greatest row whose start is <= offset
        let row = self.line_starts.partition_point(|&start| start <= offset) - 1;
        Ok(Position::new(row as u32, offset - self.line_starts[row]))
    }

    /// Points of both ends of a range.
    pub fn range_of(&self, start: u32, end: u32) -> Result<PointRange, LocatorError> {
        Ok(PointRange {
            start: self.point_of(start)?,
            end: self.point_of(end)?,
        })
    }

    /// Points of both ends of a [`ByteRange`].
    pub fn points(&self, range: ByteRange) -> Result<PointRange, LocatorError> {
        self.range_of(range.start, range.end)
    }
}

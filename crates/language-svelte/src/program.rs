//! Generated JavaScript with a map back to the component source.

use language_core::ByteRange;

/// A run of generated code copied verbatim from the component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment {
    generated: u32,
    source: u32,
    len: u32,
}

/// JavaScript generated from a component.
///
/// Scripts and template expressions are copied from the component and
/// glued together with synthetic code (`if (`, `) => {`, ...). Only the
/// copied runs map back to the component; spans over synthetic code have
/// no source location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntheticProgram {
    code: String,
    segments: Vec<Segment>,
}

impl SyntheticProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Append synthetic code.
    pub fn push(&mut self, code: &str) {
        self.code.push_str(code);
    }

    /// Append `range` of `source`, remembering where it came from.
    pub fn push_source(&mut self, source: &str, range: ByteRange) {
        let Some(text) = range.slice(source) else {
            return;
        };
        if text.is_empty() {
            return;
        }
        self.segments.push(Segment {
            generated: self.code.len() as u32,
            source: range.start,
            len: range.len(),
        });
        self.code.push_str(text);
    }

    /// Source range of a generated range lying within one copied run.
    pub fn source_range(&self, range: ByteRange) -> Option<ByteRange> {
        let segment = self.segment_at(range.start)?;
        if range.end > segment.generated + segment.len {
            return None;
        }
        let delta = range.start - segment.generated;
        Some(ByteRange::new(
            segment.source + delta,
            segment.source + delta + range.len(),
        ))
    }

    /// Closest source offset for any generated offset, used to place
    /// errors reported on synthetic code.
    pub fn nearest_source_offset(&self, offset: u32) -> u32 {
        let index = self.segments.partition_point(|s| s.generated <= offset);
        match index.checked_sub(1).map(|i| self.segments[i]) {
            Some(segment) => segment.source + (offset - segment.generated).min(segment.len),
            None => self.segments.first().map_or(0, |s| s.source),
        }
    }

    fn segment_at(&self, offset: u32) -> Option<Segment> {
        let index = self.segments.partition_point(|s| s.generated <= offset);
        let segment = self.segments[..index].last().copied()?;
        (offset < segment.generated + segment.len).then_some(segment)
    }
}

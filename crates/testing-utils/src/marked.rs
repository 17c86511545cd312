//! Marked-source fixtures.
//!
//! A fixture is ordinary source code with three kinds of marks:
//!
//! * `«name»` wraps an expected occurrence, `«decl:name»` additionally
//!   pins its kind (`decl`, `ref`, `mut`, `namimp` or `defimp`);
//! * `§` is a cursor: querying at that offset must yield exactly the
//!   wrapped occurrences.
//!
//! Marks are removed before the code is handed to an analyzer, and all
//! offsets are computed against the cleaned code.

use language_core::{ByteRange, OccurrenceKind};

const RANGE_OPEN: char = '«';
const RANGE_CLOSE: char = '»';
const CURSOR: char = '§';

/// An expected occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedRange {
    pub range: ByteRange,
    /// `None` when the fixture does not pin the kind
    pub kind: Option<OccurrenceKind>,
}

/// Code with its cursors and expected occurrences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedSource {
    pub code: String,
    pub cursors: Vec<u32>,
    pub expected: Vec<ExpectedRange>,
}

impl MarkedSource {
    /// Strip the marks from `marked`.
    ///
    /// # Panics
    ///
    /// Panics on unbalanced `«»` marks or an unknown kind label, since a
    /// broken fixture is a bug in the test itself.
    pub fn parse(marked: &str) -> Self {
        let mut code = String::with_capacity(marked.len());
        let mut cursors = Vec::new();
        let mut expected = Vec::new();
        let mut open: Option<(u32, Option<OccurrenceKind>)> = None;

        let mut rest = marked;
        while let Some(c) = rest.chars().next() {
            rest = &rest[c.len_utf8()..];
            match c {
                CURSOR => cursors.push(code.len() as u32),
                RANGE_OPEN => {
                    assert!(open.is_none(), "nested «» marks in fixture:\n{marked}");
                    let (kind, remaining) = split_kind_label(rest);
                    rest = remaining;
                    open = Some((code.len() as u32, kind));
                }
                RANGE_CLOSE => {
                    let (start, kind) = open
                        .take()
                        .unwrap_or_else(|| panic!("unbalanced » in fixture:\n{marked}"));
                    expected.push(ExpectedRange {
                        range: ByteRange::new(start, code.len() as u32),
                        kind,
                    });
                }
                _ => code.push(c),
            }
        }
        assert!(open.is_none(), "unclosed « in fixture:\n{marked}");

        Self {
            code,
            cursors,
            expected,
        }
    }
}

fn split_kind_label(text: &str) -> (Option<OccurrenceKind>, &str) {
    if let Some((label, rest)) = text.split_once(':') {
        if let Some(kind) = OccurrenceKind::from_label(label) {
            return (Some(kind), rest);
        }
    }
    (None, text)
}

/// Remove the common indentation of all non-blank lines, plus a leading
/// newline and trailing blank space, so fixtures can be indented inline.
pub fn dedent(text: &str) -> String {
    let text = text.strip_prefix('\n').unwrap_or(text);
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    let lines: Vec<&str> = text
        .lines()
        .map(|line| if line.len() >= indent { &line[indent..] } else { line.trim_start() })
        .collect();
    lines.join("\n").trim_end().to_string()
}

/// Re-insert marks into `code` for display.
pub fn render(code: &str, ranges: &[(ByteRange, Option<OccurrenceKind>)]) -> String {
    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|(range, _)| (range.start, range.end));

    let mut out = String::with_capacity(code.len() + ranges.len() * 8);
    let mut last = 0usize;
    for (range, kind) in sorted {
        let start = (range.start as usize).clamp(last, code.len());
        let end = (range.end as usize).clamp(start, code.len());
        out.push_str(&code[last..start]);
        out.push(RANGE_OPEN);
        if let Some(kind) = kind {
            out.push_str(kind.as_str());
            out.push(':');
        }
        out.push_str(&code[start..end]);
        out.push(RANGE_CLOSE);
        last = end;
    }
    out.push_str(&code[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_marks() {
        let marked = MarkedSource::parse("const «decl:fo§o» = 1; «foo»§()");
        assert_eq!(marked.code, "const foo = 1; foo()");
        assert_eq!(marked.cursors, vec![8, 18]);
        assert_eq!(
            marked.expected,
            vec![
                ExpectedRange {
                    range: ByteRange::new(6, 9),
                    kind: Some(OccurrenceKind::Decl),
                },
                ExpectedRange {
                    range: ByteRange::new(15, 18),
                    kind: None,
                },
            ]
        );
    }

    #[test]
    fn test_colon_in_code_is_not_a_label() {
        let marked = MarkedSource::parse("{«a§»: 1}");
        assert_eq!(marked.code, "{a: 1}");
        assert_eq!(marked.expected[0].kind, None);
        assert_eq!(marked.expected[0].range, ByteRange::new(1, 2));
    }

    #[test]
    fn test_multibyte_offsets() {
        let marked = MarkedSource::parse("'é'; «§x»");
        assert_eq!(marked.code, "'é'; x");
        assert_eq!(marked.cursors, vec![6]);
    }

    #[test]
    fn test_dedent() {
        let text = "
            def f():
                return 1
        ";
        assert_eq!(dedent(text), "def f():\n    return 1");
    }

    #[test]
    fn test_render() {
        let code = "let a = a";
        let rendered = render(
            code,
            &[
                (ByteRange::new(8, 9), Some(OccurrenceKind::Ref)),
                (ByteRange::new(4, 5), None),
            ],
        );
        assert_eq!(rendered, "let «a» = «ref:a»");
    }

    #[test]
    #[should_panic(expected = "unclosed")]
    fn test_unclosed_mark_panics() {
        MarkedSource::parse("«foo");
    }
}

//! Assertions over marked-source fixtures.

use crate::marked::{dedent, render, MarkedSource};
use language_core::{ByteRange, Locator, Occurrence, OccurrenceKind};
use similar::{ChangeTag, TextDiff};

/// Check a fixture against a reference finder.
///
/// `find` receives the cleaned code and a cursor offset. For every `§` in
/// the fixture the returned occurrences must cover exactly the `«»`
/// ranges, with the pinned kinds. The fixture is dedented first.
///
/// # Panics
///
/// Panics with a diff of the annotated source when a cursor disagrees.
pub fn assert_references<F>(fixture: &str, find: F)
where
    F: Fn(&str, u32) -> Vec<Occurrence>,
{
    let marked = MarkedSource::parse(&dedent(fixture));
    assert!(
        !marked.cursors.is_empty(),
        "fixture has no § cursor:\n{fixture}"
    );
    let locator = Locator::new(&marked.code);

    for &cursor in &marked.cursors {
        let actual = find(&marked.code, cursor);
        if let Some(message) = compare(&marked, &actual) {
            let point = locator
                .point_of(cursor)
                .map(|p| p.to_string())
                .unwrap_or_else(|_| cursor.to_string());
            panic!("references from {point} do not match ({message}):\n{}", diff(&marked, &actual));
        }
    }
}

/// Check that a query at every cursor yields no occurrence at all.
pub fn assert_no_references<F>(fixture: &str, find: F)
where
    F: Fn(&str, u32) -> Vec<Occurrence>,
{
    let marked = MarkedSource::parse(&dedent(fixture));
    assert!(marked.expected.is_empty(), "fixture marks ranges:\n{fixture}");
    assert_references(fixture, find);
}

fn compare(marked: &MarkedSource, actual: &[Occurrence]) -> Option<String> {
    let mut expected: Vec<_> = marked.expected.clone();
    expected.sort_by_key(|e| (e.range.start, e.range.end));
    let mut actual: Vec<_> = actual.to_vec();
    actual.sort_by_key(|o| (o.range.start, o.range.end));

    if expected.len() != actual.len() {
        return Some(format!(
            "expected {} ranges, found {}",
            expected.len(),
            actual.len()
        ));
    }
    for (expected, actual) in expected.iter().zip(&actual) {
        if expected.range != actual.range {
            return Some(format!(
                "expected range {}..{}, found {}..{}",
                expected.range.start, expected.range.end, actual.range.start, actual.range.end
            ));
        }
        if let Some(kind) = expected.kind {
            if kind != actual.kind {
                return Some(format!(
                    "expected {kind} at {}..{}, found {}",
                    actual.range.start, actual.range.end, actual.kind
                ));
            }
        }
    }
    None
}

fn diff(marked: &MarkedSource, actual: &[Occurrence]) -> String {
    let expected: Vec<(ByteRange, Option<OccurrenceKind>)> = marked
        .expected
        .iter()
        .map(|e| (e.range, e.kind))
        .collect();
    let actual: Vec<(ByteRange, Option<OccurrenceKind>)> =
        actual.iter().map(|o| (o.range, Some(o.kind))).collect();
    let expected = render(&marked.code, &expected);
    let actual = render(&marked.code, &actual);

    let diff = TextDiff::from_lines(&expected, &actual);
    let mut result = String::new();
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        result.push_str(&format!("{sign}{change}"));
        if change.missing_newline() {
            result.push('\n');
        }
    }
    result
}

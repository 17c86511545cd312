//! Script extraction for HTML-like documents.

use regex::Regex;
use std::sync::OnceLock;

fn script_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?s)^(.*<script\b[^>]*>)(.*)</script>").ok())
        .as_ref()
}

/// Keep the content of the last `<script>` element and blank out the rest.
///
/// Every byte outside the script becomes a space except line breaks, so
/// offsets and rows of the result match the document. A document without
/// a script analyzes as an empty program.
pub fn extract_script(document: &str) -> String {
    let Some(captures) = script_pattern().and_then(|re| re.captures(document)) else {
        return blank(document);
    };
    let (Some(prefix), Some(content)) = (captures.get(1), captures.get(2)) else {
        return blank(document);
    };

    let mut out = String::with_capacity(document.len());
    out.push_str(&blank(&document[..prefix.end()]));
    out.push_str(content.as_str());
    out.push_str(&blank(&document[content.end()..]));
    out
}

fn blank(text: &str) -> String {
    text.bytes()
        .map(|b| if b == b'\n' || b == b'\r' { b as char } else { ' ' })
        .collect()
}

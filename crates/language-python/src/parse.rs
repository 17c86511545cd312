//! Parsing and syntax error collection.

use crate::error::{PythonError, PythonResult};
use language_core::ByteRange;
use tree_sitter::{Node, Parser, Tree};

/// Parse Python source into a concrete syntax tree.
///
/// The tree is returned even when it contains errors; see
/// [`syntax_errors`].
pub fn parse_tree(code: &str) -> PythonResult<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| PythonError::Language(e.to_string()))?;
    parser.parse(code, None).ok_or(PythonError::NoTree)
}

/// Syntax errors of `tree`, in document order.
///
/// IPython line magics (`%time ...`) and cell magics (`%%bash`) are not
/// Python, but notebooks exported as scripts are full of them: an error
/// node whose text starts with `%` is skipped, along with any other error
/// confined to the rows it spans.
pub fn syntax_errors(tree: &Tree, code: &str) -> Vec<PythonError> {
    let mut collector = ErrorCollector {
        code,
        magic_rows: Vec::new(),
        errors: Vec::new(),
    };
    collector.visit(tree.root_node());
    collector.errors
}

struct ErrorCollector<'a> {
    code: &'a str,
    magic_rows: Vec<(usize, usize)>,
    errors: Vec<PythonError>,
}

impl ErrorCollector<'_> {
    fn visit(&mut self, node: Node) {
        if !node.has_error() {
            return;
        }
        if node.is_error() || node.is_missing() {
            let (start_row, end_row) = (node.start_position().row, node.end_position().row);
            let text = node.utf8_text(self.code.as_bytes()).unwrap_or_default();
            if node.is_error() && text.trim_start().starts_with('%') {
                log::debug!("ignoring magic line(s) {start_row}..={end_row}");
                self.magic_rows.push((start_row, end_row));
                return;
            }
            let in_magic = self
                .magic_rows
                .iter()
                .any(|&(start, end)| start_row >= start && end_row <= end);
            if !in_magic {
                let message = if node.is_missing() {
                    format!("Missing {}", node.kind())
                } else {
                    "Parse error".to_string()
                };
                self.errors.push(PythonError::Syntax {
                    message,
                    range: ByteRange::new(node.start_byte() as u32, node.end_byte() as u32),
                });
            }
            if node.is_missing() {
                return;
            }
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors(code: &str) -> Vec<PythonError> {
        let tree = parse_tree(code).unwrap();
        syntax_errors(&tree, code)
    }

    #[test]
    fn test_valid_code() {
        assert!(errors("import os\n\ndef f(a, b=1):\n    return os.path.join(a, b)\n").is_empty());
    }

    #[test]
    fn test_syntax_error() {
        let found = errors("x = 1\ny = = 2\n");
        assert!(!found.is_empty());
        let PythonError::Syntax { range, .. } = &found[0] else {
            panic!("expected a syntax error");
        };
        assert!(range.start >= 6);
    }

    #[test]
    fn test_magic_lines_are_ignored() {
        assert!(errors("%matplotlib inline\nimport os\n").is_empty());
        assert!(errors("%%time\nx = 1\n").is_empty());
    }
}

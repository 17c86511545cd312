//! Parsing and syntax error collection.

use crate::error::{PhpError, PhpResult};
use language_core::ByteRange;
use tree_sitter::{Node, Parser, Tree};

/// Parse a PHP file, inline HTML included.
pub fn parse_tree(code: &str) -> PhpResult<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_php::LANGUAGE_PHP.into())
        .map_err(|e| PhpError::Language(e.to_string()))?;
    parser.parse(code, None).ok_or(PhpError::NoTree)
}

/// The first syntax error of `tree` in document order, if any.
pub fn first_syntax_error(tree: &Tree) -> Option<PhpError> {
    find_error(tree.root_node())
}

fn find_error(node: Node) -> Option<PhpError> {
    if !node.has_error() {
        return None;
    }
    if node.is_missing() {
        return Some(syntax_error(node, format!("Missing {}", node.kind())));
    }
    let mut cursor = node.walk();
    let nested = node.children(&mut cursor).find_map(find_error);
    match nested {
        Some(error) => Some(error),
        None if node.is_error() => Some(syntax_error(node, "Parse error".to_string())),
        None => None,
    }
}

fn syntax_error(node: Node, message: String) -> PhpError {
    PhpError::Syntax {
        message,
        range: ByteRange::new(node.start_byte() as u32, node.end_byte() as u32),
    }
}

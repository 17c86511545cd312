//! Definitions, `use` imports and included files of a PHP file.

use crate::index::{last_name, node_range, use_clause_local, SymbolIndex};
use language_core::{JumpInfo, DEFAULT_EXPORT};
use tree_sitter::Node;

const INCLUDES: &[&str] = &[
    "include_expression",
    "include_once_expression",
    "require_expression",
    "require_once_expression",
];

/// Collect exports, imported names and included paths.
///
/// Top-level functions, class-likes and constants are exports. A `use`
/// clause imports its last segment from the fully qualified name, and
/// `include`/`require` of a literal string is a path.
pub fn collect_jump_info(root: Node, source: &str, index: &SymbolIndex) -> JumpInfo {
    let mut info = JumpInfo::default();
    for definition in index.definitions() {
        if !info.exports.contains_key(&definition.name) {
            info.add_export(definition.name.clone(), definition.range);
        }
    }
    collect_imports(root, source, &mut info);
    info
}

fn collect_imports(node: Node, source: &str, info: &mut JumpInfo) {
    let kind = node.kind();
    if kind == "namespace_use_declaration" {
        use_declaration(node, source, "", info);
        return;
    }
    if INCLUDES.contains(&kind) {
        include(node, source, info);
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_imports(child, source, info);
    }
}

fn text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or_default()
}

/// `use A\B;`, `use A\{B, C as D};`
fn use_declaration(node: Node, source: &str, prefix: &str, info: &mut JumpInfo) {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();
    let group_prefix = children
        .iter()
        .find(|c| c.kind() == "namespace_name")
        .map(|c| format!("{prefix}{}\\", text(*c, source)));

    for child in children {
        match child.kind() {
            "namespace_use_clause" | "namespace_use_group_clause" => {
                let Some(local) = use_clause_local(child) else {
                    continue;
                };
                let mut parts = child.walk();
                let Some(name) = child
                    .named_children(&mut parts)
                    .find(|c| c.kind() == "name" || c.kind() == "qualified_name")
                else {
                    continue;
                };
                let Some(imported) = last_name(name) else {
                    continue;
                };
                let qualified = text(name, source).trim_start_matches('\\');
                let module_name = format!("{}{qualified}", group_prefix.as_deref().unwrap_or(prefix));
                info.add_module(
                    text(local, source),
                    module_name.as_str(),
                    text(imported, source),
                    node_range(local),
                );
            }
            "namespace_use_group" => {
                use_declaration(child, source, group_prefix.as_deref().unwrap_or(prefix), info)
            }
            _ => {}
        }
    }
}

/// `require 'lib.php'`, `include __DIR__ . '/lib.php'`
fn include(node: Node, source: &str, info: &mut JumpInfo) {
    let mut cursor = node.walk();
    let Some(argument) = node.named_children(&mut cursor).next() else {
        return;
    };
    let argument = match argument.kind() {
        "parenthesized_expression" => {
            let mut inner = argument.walk();
            let Some(inner) = argument.named_children(&mut inner).next() else {
                return;
            };
            inner
        }
        _ => argument,
    };

    match argument.kind() {
        "string" | "encapsed_string" => {
            if let Some(path) = literal(argument, source) {
                info.add_path(path, DEFAULT_EXPORT, node_range(argument));
            }
        }
        "binary_expression" => {
            let (Some(left), Some(right)) = (
                argument.child_by_field_name("left"),
                argument.child_by_field_name("right"),
            ) else {
                return;
            };
            if text(left, source) != "__DIR__" {
                return;
            }
            if let Some(path) = literal(right, source) {
                info.add_path(format!(".{path}"), DEFAULT_EXPORT, node_range(right));
            }
        }
        _ => {}
    }
}

/// Contents of a string literal without interpolation.
fn literal<'s>(node: Node, source: &'s str) -> Option<&'s str> {
    if !matches!(node.kind(), "string" | "encapsed_string") {
        return None;
    }
    let text = text(node, source);
    let inner = text
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .or_else(|| text.strip_prefix('"').and_then(|t| t.strip_suffix('"')))?;
    (!inner.is_empty() && !inner.contains('$')).then_some(inner)
}

//! Import/export summary of a Python module.

use crate::scope::{node_range, ScopeIndex};
use language_core::{JumpInfo, DEFAULT_EXPORT};
use tree_sitter::Node;

/// Collect exports, imported bindings and module paths.
///
/// Every top-level binding is importable from the module, including the
/// names it imports itself, so a first write or declaration of a
/// module-scope name is an export.
pub fn collect_jump_info(root: Node, source: &str, index: &ScopeIndex) -> JumpInfo {
    let mut info = JumpInfo::default();
    for binding in index.module_bindings() {
        if !info.exports.contains_key(&binding.name) {
            info.add_export(binding.name.clone(), binding.range);
        }
    }
    collect_imports(root, source, &mut info);
    info
}

fn collect_imports(node: Node, source: &str, info: &mut JumpInfo) {
    match node.kind() {
        "import_statement" => import_statement(node, source, info),
        "import_from_statement" => import_from_statement(node, source, info),
        _ => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                collect_imports(child, source, info);
            }
        }
    }
}

fn text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or_default()
}

/// `import a.b`, `import a.b as c`
fn import_statement(node: Node, source: &str, info: &mut JumpInfo) {
    let mut cursor = node.walk();
    for name in node.children_by_field_name("name", &mut cursor) {
        match name.kind() {
            "dotted_name" => {
                let mut parts = name.walk();
                let Some(package) = name.named_children(&mut parts).next() else {
                    continue;
                };
                let local = text(package, source);
                info.add_module(local, local, DEFAULT_EXPORT, node_range(package));
                info.add_path(text(name, source), DEFAULT_EXPORT, node_range(name));
            }
            "aliased_import" => {
                let (Some(module), Some(alias)) = (
                    name.child_by_field_name("name"),
                    name.child_by_field_name("alias"),
                ) else {
                    continue;
                };
                let module_name = text(module, source);
                info.add_module(text(alias, source), module_name, DEFAULT_EXPORT, node_range(alias));
                info.add_path(module_name, DEFAULT_EXPORT, node_range(module));
            }
            _ => {}
        }
    }
}

/// `from m import a`, `from .m import a as b`
fn import_from_statement(node: Node, source: &str, info: &mut JumpInfo) {
    let Some(module) = node.child_by_field_name("module_name") else {
        return;
    };
    let module_name = text(module, source);
    info.add_path(module_name, DEFAULT_EXPORT, node_range(module));

    let mut cursor = node.walk();
    for name in node.children_by_field_name("name", &mut cursor) {
        match name.kind() {
            "dotted_name" => {
                let imported = text(name, source);
                info.add_module(imported, module_name, imported, node_range(name));
            }
            "aliased_import" => {
                let (Some(imported), Some(alias)) = (
                    name.child_by_field_name("name"),
                    name.child_by_field_name("alias"),
                ) else {
                    continue;
                };
                let imported_name = text(imported, source);
                info.add_module(text(alias, source), module_name, imported_name, node_range(alias));
                info.add_path(module_name, imported_name, node_range(imported));
            }
            _ => {}
        }
    }
}

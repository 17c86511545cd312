//! Hand-written scope analysis over the tree-sitter CST.
//!
//! The grammar has no notion of scopes, so one walk records every name
//! occurrence together with the scope it appears in, and which names each
//! scope writes. A name then resolves to the nearest enclosing scope that
//! writes it (unless the scope declares it `global`/`nonlocal`), or to
//! the module when no scope does.

use language_core::ByteRange;
use std::collections::HashSet;
use tree_sitter::Node;

pub type ScopeId = usize;

/// The module scope.
pub const MODULE_SCOPE: ScopeId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    Class,
    Function,
    Lambda,
    Comprehension,
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub range: ByteRange,
    /// Names bound in this scope, nested scopes excluded
    pub writes: HashSet<String>,
    pub globals: HashSet<String>,
    pub nonlocals: HashSet<String>,
}

impl Scope {
    /// A write here makes the name local to this scope.
    pub fn shadows(&self, name: &str) -> bool {
        self.writes.contains(name) && !self.globals.contains(name) && !self.nonlocals.contains(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRole {
    /// `def`/`class` name, parameter or import binding
    Declaration,
    /// Assignment, loop or `as` target
    Write,
    Read,
}

/// One identifier occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    pub range: ByteRange,
    pub name: String,
    pub role: NameRole,
    /// Scope the occurrence is evaluated in
    pub scope: ScopeId,
}

/// Every name occurrence of a module, sorted by position.
#[derive(Debug, Clone)]
pub struct ScopeIndex {
    pub scopes: Vec<Scope>,
    pub names: Vec<Name>,
}

impl ScopeIndex {
    pub fn build(root: Node, source: &str) -> Self {
        let mut builder = IndexBuilder {
            source,
            scopes: Vec::new(),
            names: Vec::new(),
        };
        let module = builder.push_scope(ScopeKind::Module, root, None);
        builder.visit_children(root, module);

        let mut names = builder.names;
        names.sort_by_key(|n| (n.range.start, n.range.end));
        names.dedup_by_key(|n| n.range);
        ScopeIndex {
            scopes: builder.scopes,
            names,
        }
    }

    /// Identifier containing `offset`.
    pub fn name_at(&self, offset: u32) -> Option<&Name> {
        let candidates = self.names.partition_point(|n| n.range.end <= offset);
        self.names[candidates..]
            .iter()
            .take_while(|n| n.range.start <= offset)
            .find(|n| n.range.contains(offset))
    }

    /// Scope whose binding `name` refers to.
    pub fn resolve(&self, name: &Name) -> ScopeId {
        let mut current = name.scope;
        loop {
            let scope = &self.scopes[current];
            if scope.globals.contains(&name.name) {
                return MODULE_SCOPE;
            }
            if scope.shadows(&name.name) {
                return current;
            }
            match scope.parent {
                Some(parent) => current = parent,
                None => return current,
            }
        }
    }

    /// Declarations and writes bound in the module scope.
    pub fn module_bindings(&self) -> impl Iterator<Item = &Name> {
        self.names
            .iter()
            .filter(move |n| n.role != NameRole::Read && self.resolve(n) == MODULE_SCOPE)
    }
}

const COMPREHENSIONS: &[&str] = &[
    "list_comprehension",
    "set_comprehension",
    "dictionary_comprehension",
    "generator_expression",
];

/// Nodes that may appear on the left of an assignment and bind the
/// identifiers they contain.
const TARGET_PATTERNS: &[&str] = &[
    "pattern_list",
    "tuple_pattern",
    "list_pattern",
    "list_splat_pattern",
    "tuple",
    "list",
    "list_splat",
    "expression_list",
    "parenthesized_expression",
    "as_pattern_target",
];

struct IndexBuilder<'s> {
    source: &'s str,
    scopes: Vec<Scope>,
    names: Vec<Name>,
}

impl IndexBuilder<'_> {
    fn push_scope(&mut self, kind: ScopeKind, node: Node, parent: Option<ScopeId>) -> ScopeId {
        self.scopes.push(Scope {
            kind,
            parent,
            range: node_range(node),
            writes: HashSet::new(),
            globals: HashSet::new(),
            nonlocals: HashSet::new(),
        });
        self.scopes.len() - 1
    }

    fn text(&self, node: Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    fn record(&mut self, node: Node, role: NameRole, scope: ScopeId) {
        let name = self.text(node).to_string();
        if name.is_empty() {
            return;
        }
        if role != NameRole::Read {
            self.scopes[scope].writes.insert(name.clone());
        }
        self.names.push(Name {
            range: node_range(node),
            name,
            role,
            scope,
        });
    }

    fn visit(&mut self, node: Node, scope: ScopeId) {
        match node.kind() {
            "identifier" => self.record(node, NameRole::Read, scope),
            "function_definition" => self.visit_function(node, scope),
            "class_definition" => self.visit_class(node, scope),
            "lambda" => {
                let inner = self.push_scope(ScopeKind::Lambda, node, Some(scope));
                if let Some(parameters) = node.child_by_field_name("parameters") {
                    self.visit_parameters(parameters, inner, scope);
                }
                if let Some(body) = node.child_by_field_name("body") {
                    self.visit(body, inner);
                }
            }
            kind if COMPREHENSIONS.contains(&kind) => {
                let inner = self.push_scope(ScopeKind::Comprehension, node, Some(scope));
                self.visit_children(node, inner);
            }
            "for_in_clause" | "for_statement" => {
                if let Some(left) = node.child_by_field_name("left") {
                    self.visit_target(left, scope);
                }
                self.visit_fields_except(node, "left", scope);
            }
            "assignment" | "augmented_assignment" => {
                if let Some(left) = node.child_by_field_name("left") {
                    self.visit_target(left, scope);
                }
                self.visit_fields_except(node, "left", scope);
            }
            "named_expression" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.visit_target(name, scope);
                }
                self.visit_fields_except(node, "name", scope);
            }
            // `obj.attr`: only `obj` is a name
            "attribute" => {
                if let Some(object) = node.child_by_field_name("object") {
                    self.visit(object, scope);
                }
            }
            // `f(key=value)`: `key` is not a name
            "keyword_argument" => {
                if let Some(value) = node.child_by_field_name("value") {
                    self.visit(value, scope);
                }
            }
            "import_statement" | "import_from_statement" => self.visit_import(node, scope),
            "future_import_statement" => {}
            "global_statement" | "nonlocal_statement" => {
                let global = node.kind() == "global_statement";
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    if child.kind() != "identifier" {
                        continue;
                    }
                    let name = self.text(child).to_string();
                    if global {
                        self.scopes[scope].globals.insert(name);
                    } else {
                        self.scopes[scope].nonlocals.insert(name);
                    }
                    self.record(child, NameRole::Read, scope);
                }
            }
            _ => self.visit_children(node, scope),
        }
    }

    /// Visit named children; `alias` fields (`with x as y`,
    /// `except E as e`) are targets.
    fn visit_children(&mut self, node: Node, scope: ScopeId) {
        let mut cursor = node.walk();
        if !cursor.goto_first_child() {
            return;
        }
        loop {
            let child = cursor.node();
            if child.is_named() {
                if cursor.field_name() == Some("alias") {
                    self.visit_target(child, scope);
                } else {
                    self.visit(child, scope);
                }
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }

    fn visit_fields_except(&mut self, node: Node, skipped: &str, scope: ScopeId) {
        let mut cursor = node.walk();
        if !cursor.goto_first_child() {
            return;
        }
        loop {
            let child = cursor.node();
            if child.is_named() && cursor.field_name() != Some(skipped) {
                self.visit(child, scope);
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }

    fn visit_target(&mut self, node: Node, scope: ScopeId) {
        match node.kind() {
            "identifier" => self.record(node, NameRole::Write, scope),
            kind if TARGET_PATTERNS.contains(&kind) => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.visit_target(child, scope);
                }
            }
            // `obj.x = 1`, `a[i] = 1`
            _ => self.visit(node, scope),
        }
    }

    fn visit_function(&mut self, node: Node, scope: ScopeId) {
        if let Some(name) = node.child_by_field_name("name") {
            self.record(name, NameRole::Declaration, scope);
        }
        let inner = self.push_scope(ScopeKind::Function, node, Some(scope));
        if let Some(parameters) = node.child_by_field_name("parameters") {
            self.visit_parameters(parameters, inner, scope);
        }
        if let Some(return_type) = node.child_by_field_name("return_type") {
            self.visit(return_type, scope);
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.visit(body, inner);
        }
    }

    fn visit_class(&mut self, node: Node, scope: ScopeId) {
        if let Some(name) = node.child_by_field_name("name") {
            self.record(name, NameRole::Declaration, scope);
        }
        if let Some(superclasses) = node.child_by_field_name("superclasses") {
            self.visit(superclasses, scope);
        }
        let inner = self.push_scope(ScopeKind::Class, node, Some(scope));
        if let Some(body) = node.child_by_field_name("body") {
            self.visit(body, inner);
        }
    }

    /// Parameter names bind in the function; annotations and default
    /// values are evaluated in the enclosing scope (`def f(a, b=a)`).
    fn visit_parameters(&mut self, parameters: Node, inner: ScopeId, outer: ScopeId) {
        let mut cursor = parameters.walk();
        for parameter in parameters.named_children(&mut cursor) {
            match parameter.kind() {
                "identifier" => self.record(parameter, NameRole::Declaration, inner),
                "default_parameter" | "typed_default_parameter" => {
                    if let Some(name) = parameter.child_by_field_name("name") {
                        self.declare_pattern(name, inner);
                    }
                    for field in ["type", "value"] {
                        if let Some(child) = parameter.child_by_field_name(field) {
                            self.visit(child, outer);
                        }
                    }
                }
                "typed_parameter" => {
                    let mut inner_cursor = parameter.walk();
                    for child in parameter.named_children(&mut inner_cursor) {
                        if child.kind() != "type" {
                            self.declare_pattern(child, inner);
                        }
                    }
                    if let Some(annotation) = parameter.child_by_field_name("type") {
                        self.visit(annotation, outer);
                    }
                }
                "list_splat_pattern" | "dictionary_splat_pattern" | "tuple_pattern" => {
                    self.declare_pattern(parameter, inner)
                }
                _ => {}
            }
        }
    }

    fn declare_pattern(&mut self, node: Node, scope: ScopeId) {
        if node.kind() == "identifier" {
            self.record(node, NameRole::Declaration, scope);
            return;
        }
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.declare_pattern(child, scope);
        }
    }

    /// Imports bind a name; module paths and imported names are not
    /// references.
    fn visit_import(&mut self, node: Node, scope: ScopeId) {
        let from_import = node.kind() == "import_from_statement";
        let mut cursor = node.walk();
        for child in node.children_by_field_name("name", &mut cursor) {
            let binding = match child.kind() {
                "aliased_import" => child.child_by_field_name("alias"),
                // `import a.b` binds `a`, `from m import a` binds `a`
                "dotted_name" => {
                    let mut names = child.walk();
                    let mut identifiers = child.named_children(&mut names);
                    if from_import {
                        identifiers.last()
                    } else {
                        identifiers.next()
                    }
                }
                _ => None,
            };
            if let Some(binding) = binding {
                self.record(binding, NameRole::Declaration, scope);
            }
        }
    }
}

pub(crate) fn node_range(node: Node) -> ByteRange {
    ByteRange::new(node.start_byte() as u32, node.end_byte() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_tree;

    fn index(code: &str) -> ScopeIndex {
        let tree = parse_tree(code).unwrap();
        ScopeIndex::build(tree.root_node(), code)
    }

    fn roles(index: &ScopeIndex, name: &str) -> Vec<NameRole> {
        index
            .names
            .iter()
            .filter(|n| n.name == name)
            .map(|n| n.role)
            .collect()
    }

    #[test]
    fn test_roles() {
        let index = index("import os\nx = 1\nx += os.x\ndef f(a): return a\nf(x=x)\n");
        assert_eq!(roles(&index, "os"), vec![NameRole::Declaration, NameRole::Read]);
        assert_eq!(
            roles(&index, "x"),
            vec![NameRole::Write, NameRole::Write, NameRole::Read]
        );
        assert_eq!(roles(&index, "a"), vec![NameRole::Declaration, NameRole::Read]);
        assert_eq!(roles(&index, "f"), vec![NameRole::Declaration, NameRole::Read]);
    }

    #[test]
    fn test_scopes() {
        let index = index("def f():\n    c = 2\nclass C:\n    pass\nlambda y: y\n[z for z in range(3)]\n");
        let kinds: Vec<ScopeKind> = index.scopes.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ScopeKind::Module,
                ScopeKind::Function,
                ScopeKind::Class,
                ScopeKind::Lambda,
                ScopeKind::Comprehension
            ]
        );
        assert!(index.scopes[1].writes.contains("c"));
        assert!(index.scopes[MODULE_SCOPE].writes.contains("f"));
        assert!(!index.scopes[MODULE_SCOPE].writes.contains("c"));
    }

    #[test]
    fn test_resolution() {
        let code = "c = 1\ndef f():\n    global c\n    c = 2\ndef g():\n    c = 3\n";
        let index = index(code);
        let scopes: Vec<ScopeId> = index
            .names
            .iter()
            .filter(|n| n.name == "c")
            .map(|n| index.resolve(n))
            .collect();
        assert_eq!(scopes, vec![MODULE_SCOPE, MODULE_SCOPE, MODULE_SCOPE, 2]);
    }

    #[test]
    fn test_imports() {
        let index = index("import a.b\nimport c.d as e\nfrom m import x, y as z\nfrom . import w\n");
        let declared: Vec<&str> = index
            .names
            .iter()
            .filter(|n| n.role == NameRole::Declaration)
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(declared, vec!["a", "e", "x", "z", "w"]);
        assert_eq!(index.names.len(), 5);
    }
}

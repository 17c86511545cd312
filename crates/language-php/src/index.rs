//! Symbol index over the tree-sitter-php CST.
//!
//! PHP has a few unrelated kinds of names. Variables are local to their
//! function unless captured by `use (...)` or imported with `global`.
//! Functions, classes and constants live in namespaces. Class members are
//! only reachable through `$this->`, `self::` or `static::` inside the
//! class that declares them. One walk records every occurrence with the
//! scope it belongs to; [`SymbolIndex::binding`] then groups occurrences
//! that denote the same thing.

use language_core::ByteRange;
use std::collections::HashSet;
use tree_sitter::Node;

pub type ScopeId = usize;

/// The implicit global namespace of the file.
pub const FILE_SCOPE: ScopeId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    File,
    Namespace,
    Class,
    Function,
    Closure,
    Arrow,
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub range: ByteRange,
    /// Namespace the scope is declared in
    pub namespace: ScopeId,
    /// Variables a closure takes from its parent with `use (...)`
    pub captures: HashSet<String>,
    /// Parameters of an arrow function
    pub params: HashSet<String>,
    /// Variables imported with `global`
    pub globals: HashSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    /// `$this`
    This,
    Function,
    /// Class, interface, trait or enum
    Class,
    Constant,
    /// Method (callable) or property and class constant
    Member { callable: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolRole {
    /// Definition or parameter
    Declaration,
    /// Name bound by a `use` clause
    Import,
    Write,
    Read,
}

/// One name occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub range: ByteRange,
    /// Name without the `$` sigil
    pub name: String,
    pub kind: SymbolKind,
    pub role: SymbolRole,
    /// Scope the occurrence appears in: its function for variables, its
    /// namespace for functions, classes and constants, its class for
    /// members and `$this`
    pub scope: ScopeId,
}

/// What an occurrence denotes. Occurrences with equal bindings are
/// references to each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Binding {
    Variable(ScopeId, String),
    This(ScopeId),
    Function(ScopeId, String),
    Class(ScopeId, String),
    Constant(ScopeId, String),
    Member(ScopeId, bool, String),
}

/// Every name occurrence of a file, sorted by position.
#[derive(Debug, Clone)]
pub struct SymbolIndex {
    pub scopes: Vec<Scope>,
    pub symbols: Vec<Symbol>,
}

impl SymbolIndex {
    pub fn build(root: Node, source: &str) -> Self {
        let mut builder = IndexBuilder {
            source,
            scopes: Vec::new(),
            symbols: Vec::new(),
        };
        let file = builder.push_scope(ScopeKind::File, root, None, FILE_SCOPE);
        let context = Context {
            namespace: file,
            class: None,
            variables: file,
        };
        builder.visit_children(root, context);

        let mut symbols = builder.symbols;
        symbols.sort_by_key(|s| (s.range.start, s.range.end));
        symbols.dedup_by_key(|s| s.range);
        SymbolIndex {
            scopes: builder.scopes,
            symbols,
        }
    }

    /// Symbol containing `offset`.
    pub fn symbol_at(&self, offset: u32) -> Option<&Symbol> {
        let candidates = self.symbols.partition_point(|s| s.range.end <= offset);
        self.symbols[candidates..]
            .iter()
            .take_while(|s| s.range.start <= offset)
            .find(|s| s.range.contains(offset))
    }

    pub fn binding(&self, symbol: &Symbol) -> Binding {
        match symbol.kind {
            SymbolKind::Variable => Binding::Variable(
                self.resolve_variable(symbol.scope, &symbol.name),
                symbol.name.clone(),
            ),
            SymbolKind::This => Binding::This(symbol.scope),
            // function and class names are case-insensitive
            SymbolKind::Function => {
                Binding::Function(symbol.scope, symbol.name.to_ascii_lowercase())
            }
            SymbolKind::Class => Binding::Class(symbol.scope, symbol.name.to_ascii_lowercase()),
            SymbolKind::Constant => Binding::Constant(symbol.scope, symbol.name.clone()),
            SymbolKind::Member { callable: true } => {
                Binding::Member(symbol.scope, true, symbol.name.to_ascii_lowercase())
            }
            SymbolKind::Member { callable: false } => {
                Binding::Member(symbol.scope, false, symbol.name.clone())
            }
        }
    }

    /// Scope owning variable `name` as seen from `scope`.
    pub fn resolve_variable(&self, scope: ScopeId, name: &str) -> ScopeId {
        let mut current = scope;
        loop {
            let scope = &self.scopes[current];
            let inherited = match scope.kind {
                ScopeKind::Closure => scope.captures.contains(name),
                ScopeKind::Arrow => !scope.params.contains(name),
                _ => false,
            };
            if !inherited {
                if scope.globals.contains(name) {
                    return scope.namespace;
                }
                return current;
            }
            match scope.parent {
                Some(parent) => current = parent,
                None => return current,
            }
        }
    }

    /// Function, class and constant definitions outside of classes.
    pub fn definitions(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter(|s| {
            s.role == SymbolRole::Declaration
                && matches!(
                    s.kind,
                    SymbolKind::Function | SymbolKind::Class | SymbolKind::Constant
                )
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Context {
    namespace: ScopeId,
    class: Option<ScopeId>,
    /// Function (or namespace) holding the variables of this point
    variables: ScopeId,
}

const CLASS_LIKES: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "trait_declaration",
    "enum_declaration",
];

const CLOSURES: &[&str] = &["anonymous_function", "anonymous_function_creation_expression"];

const ASSIGNMENTS: &[&str] = &[
    "assignment_expression",
    "augmented_assignment_expression",
    "reference_assignment_expression",
];

const PARAMETERS: &[&str] = &[
    "simple_parameter",
    "variadic_parameter",
    "property_promotion_parameter",
];

struct IndexBuilder<'a> {
    source: &'a str,
    scopes: Vec<Scope>,
    symbols: Vec<Symbol>,
}

impl IndexBuilder<'_> {
    fn push_scope(
        &mut self,
        kind: ScopeKind,
        node: Node,
        parent: Option<ScopeId>,
        namespace: ScopeId,
    ) -> ScopeId {
        let id = self.scopes.len();
        self.scopes.push(Scope {
            kind,
            parent,
            range: node_range(node),
            namespace: if kind == ScopeKind::Namespace || kind == ScopeKind::File {
                id
            } else {
                namespace
            },
            captures: HashSet::new(),
            params: HashSet::new(),
            globals: HashSet::new(),
        });
        id
    }

    fn text(&self, node: Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    fn record(&mut self, range: ByteRange, name: &str, kind: SymbolKind, role: SymbolRole, scope: ScopeId) {
        if name.is_empty() {
            return;
        }
        self.symbols.push(Symbol {
            range,
            name: name.to_string(),
            kind,
            role,
            scope,
        });
    }

    fn visit_children(&mut self, node: Node, mut context: Context) {
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        for child in children {
            if child.kind() == "namespace_definition" && child.child_by_field_name("body").is_none() {
                // `namespace Foo;` covers the rest of the file
                let namespace = self.push_scope(ScopeKind::Namespace, node, Some(FILE_SCOPE), 0);
                context = Context {
                    namespace,
                    class: None,
                    variables: namespace,
                };
                continue;
            }
            self.visit(child, context);
        }
    }

    fn visit(&mut self, node: Node, context: Context) {
        let kind = node.kind();
        match kind {
            "comment" | "text" | "php_tag" | "namespace_name" | "relative_scope"
            | "attribute_list" => {}
            "namespace_definition" => {
                let namespace = self.push_scope(ScopeKind::Namespace, node, Some(FILE_SCOPE), 0);
                if let Some(body) = node.child_by_field_name("body") {
                    self.visit_children(
                        body,
                        Context {
                            namespace,
                            class: None,
                            variables: namespace,
                        },
                    );
                }
            }
            _ if CLASS_LIKES.contains(&kind) => self.visit_class(node, context),
            "function_definition" => {
                if let Some(name) = node.child_by_field_name("name") {
                    let text = self.text(name).to_string();
                    self.record(
                        node_range(name),
                        &text,
                        SymbolKind::Function,
                        SymbolRole::Declaration,
                        context.namespace,
                    );
                }
                let parent = context.class.unwrap_or(context.namespace);
                self.visit_function(node, ScopeKind::Function, parent, context);
            }
            "method_declaration" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.record_member(name, true, SymbolRole::Declaration, context);
                }
                let parent = context.class.unwrap_or(context.namespace);
                self.visit_function(node, ScopeKind::Function, parent, context);
            }
            _ if CLOSURES.contains(&kind) => {
                self.visit_function(node, ScopeKind::Closure, context.variables, context)
            }
            "arrow_function" => {
                self.visit_function(node, ScopeKind::Arrow, context.variables, context)
            }
            _ if PARAMETERS.contains(&kind) => self.visit_parameter(node, context),
            "variable_name" => self.record_variable(node, SymbolRole::Read, context),
            _ if ASSIGNMENTS.contains(&kind) => {
                if let Some(left) = node.child_by_field_name("left") {
                    self.visit_target(left, context);
                }
                if let Some(right) = node.child_by_field_name("right") {
                    self.visit(right, context);
                }
            }
            "update_expression" => {
                let mut cursor = node.walk();
                let children: Vec<Node> = node.named_children(&mut cursor).collect();
                for child in children {
                    self.visit_target(child, context);
                }
            }
            "foreach_statement" => {
                let mut cursor = node.walk();
                let children: Vec<Node> = node.named_children(&mut cursor).collect();
                for (i, child) in children.into_iter().enumerate() {
                    if i == 1 {
                        self.visit_target(child, context);
                    } else {
                        self.visit(child, context);
                    }
                }
            }
            "catch_clause" => {
                let name = node.child_by_field_name("name");
                let mut cursor = node.walk();
                let children: Vec<Node> = node.named_children(&mut cursor).collect();
                for child in children {
                    if Some(child) == name {
                        self.record_variable(child, SymbolRole::Write, context);
                    } else if child.kind() == "type_list" {
                        self.visit_type_names(child, context);
                    } else {
                        self.visit(child, context);
                    }
                }
            }
            "global_declaration" => {
                let mut cursor = node.walk();
                let children: Vec<Node> = node.named_children(&mut cursor).collect();
                for child in children.into_iter().filter(|c| c.kind() == "variable_name") {
                    let name = variable_text(self.text(child)).to_string();
                    self.scopes[context.variables].globals.insert(name);
                    self.record_variable(child, SymbolRole::Read, context);
                }
            }
            "static_variable_declaration" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.record_variable(name, SymbolRole::Declaration, context);
                }
                if let Some(value) = node.child_by_field_name("value") {
                    self.visit(value, context);
                }
            }
            "function_call_expression" => {
                if let Some(function) = node.child_by_field_name("function") {
                    match last_name(function) {
                        Some(name) => {
                            let text = self.text(name).to_string();
                            self.record(
                                node_range(name),
                                &text,
                                SymbolKind::Function,
                                SymbolRole::Read,
                                context.namespace,
                            );
                        }
                        // `$callback()` and friends
                        None => self.visit(function, context),
                    }
                }
                if let Some(arguments) = node.child_by_field_name("arguments") {
                    self.visit(arguments, context);
                }
            }
            "member_call_expression"
            | "nullsafe_member_call_expression"
            | "member_access_expression"
            | "nullsafe_member_access_expression" => {
                self.visit_member_access(node, SymbolRole::Read, context)
            }
            "scoped_call_expression" | "scoped_property_access_expression" => {
                self.visit_scoped_access(node, SymbolRole::Read, context)
            }
            "class_constant_access_expression" => {
                let mut cursor = node.walk();
                let children: Vec<Node> = node.named_children(&mut cursor).collect();
                let Some(scope) = children.first().copied() else {
                    return;
                };
                if !is_own_class(self.text(scope)) {
                    // `Foo::BAR` and `Foo::class`
                    self.visit_type_names(scope, context);
                } else if let Some(name) = children.last().filter(|_| children.len() > 1) {
                    self.record_member(*name, false, SymbolRole::Read, context);
                }
            }
            "object_creation_expression" => {
                let mut cursor = node.walk();
                let children: Vec<Node> = node.named_children(&mut cursor).collect();
                for child in children {
                    match child.kind() {
                        "name" | "qualified_name" => self.visit_type_names(child, context),
                        _ => self.visit(child, context),
                    }
                }
            }
            "named_type" | "base_clause" | "class_interface_clause" => {
                self.visit_type_names(node, context)
            }
            "binary_expression" => {
                let is_instanceof = node
                    .child_by_field_name("operator")
                    .is_some_and(|op| self.text(op) == "instanceof");
                if let Some(left) = node.child_by_field_name("left") {
                    self.visit(left, context);
                }
                if let Some(right) = node.child_by_field_name("right") {
                    if is_instanceof {
                        self.visit_type_names(right, context);
                    } else {
                        self.visit(right, context);
                    }
                }
            }
            "property_declaration" => {
                let mut cursor = node.walk();
                let children: Vec<Node> = node.named_children(&mut cursor).collect();
                for child in children {
                    if child.kind() == "property_element" {
                        self.visit_property_element(child, context);
                    } else {
                        self.visit(child, context);
                    }
                }
            }
            "const_declaration" => {
                let mut cursor = node.walk();
                let elements: Vec<Node> = node
                    .named_children(&mut cursor)
                    .filter(|c| c.kind() == "const_element")
                    .collect();
                for element in elements {
                    self.visit_const_element(element, context);
                }
            }
            "namespace_use_declaration" => self.visit_use_declaration(node, context),
            // trait imports
            "use_declaration" => self.visit_type_names(node, context),
            "enum_case" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.record_member(name, false, SymbolRole::Declaration, context);
                }
                if let Some(value) = node.child_by_field_name("value") {
                    self.visit(value, context);
                }
            }
            "argument" => {
                // skip the label of named arguments
                let label = node.child_by_field_name("name");
                let mut cursor = node.walk();
                let children: Vec<Node> = node.named_children(&mut cursor).collect();
                for child in children.into_iter().filter(|c| Some(*c) != label) {
                    self.visit(child, context);
                }
            }
            "name" | "qualified_name" => {
                // a bare name in expression position is a constant
                if let Some(name) = last_name(node) {
                    let text = self.text(name).to_string();
                    self.record(
                        node_range(name),
                        &text,
                        SymbolKind::Constant,
                        SymbolRole::Read,
                        context.namespace,
                    );
                }
            }
            _ => self.visit_children(node, context),
        }
    }

    fn visit_class(&mut self, node: Node, context: Context) {
        let name = node.child_by_field_name("name");
        if let Some(name) = name {
            let text = self.text(name).to_string();
            self.record(
                node_range(name),
                &text,
                SymbolKind::Class,
                SymbolRole::Declaration,
                context.namespace,
            );
        }
        let class = self.push_scope(ScopeKind::Class, node, Some(context.namespace), context.namespace);
        let body = node.child_by_field_name("body");
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        for child in children {
            if Some(child) == name {
                continue;
            }
            if Some(child) == body {
                self.visit_children(
                    child,
                    Context {
                        class: Some(class),
                        variables: class,
                        ..context
                    },
                );
            } else {
                self.visit(child, context);
            }
        }
    }

    /// Functions, methods, closures and arrow functions.
    fn visit_function(&mut self, node: Node, kind: ScopeKind, parent: ScopeId, context: Context) {
        let scope = self.push_scope(kind, node, Some(parent), context.namespace);
        let inner = Context {
            variables: scope,
            ..context
        };
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        for child in children {
            match child.kind() {
                "name" => {}
                "formal_parameters" => {
                    let mut cursor = child.walk();
                    let parameters: Vec<Node> = child.named_children(&mut cursor).collect();
                    for parameter in parameters {
                        if kind == ScopeKind::Arrow {
                            if let Some(name) = parameter.child_by_field_name("name") {
                                let name = variable_text(self.text(name)).to_string();
                                self.scopes[scope].params.insert(name);
                            }
                        }
                        self.visit(parameter, inner);
                    }
                }
                "anonymous_function_use_clause" => {
                    let mut cursor = child.walk();
                    let captured: Vec<Node> = child.named_children(&mut cursor).collect();
                    for variable in captured {
                        let variable = if variable.kind() == "by_ref" {
                            variable
                                .named_children(&mut variable.walk())
                                .find(|c| c.kind() == "variable_name")
                        } else {
                            Some(variable)
                        };
                        let Some(variable) = variable.filter(|v| v.kind() == "variable_name") else {
                            continue;
                        };
                        let name = variable_text(self.text(variable)).to_string();
                        self.scopes[scope].captures.insert(name);
                        self.record_variable(variable, SymbolRole::Read, inner);
                    }
                }
                // return type is written outside the body
                _ if Some(child) == node.child_by_field_name("return_type") => {
                    self.visit(child, context)
                }
                _ => self.visit(child, inner),
            }
        }
    }

    fn visit_parameter(&mut self, node: Node, context: Context) {
        let name = node.child_by_field_name("name");
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        for child in children {
            if Some(child) == name {
                self.record_variable(child, SymbolRole::Declaration, context);
            } else {
                self.visit(child, context);
            }
        }
    }

    /// Left-hand side of an assignment or `foreach` value.
    fn visit_target(&mut self, node: Node, context: Context) {
        match node.kind() {
            "variable_name" => self.record_variable(node, SymbolRole::Write, context),
            "list_literal" | "array_creation_expression" | "array_element_initializer" | "pair"
            | "by_ref" => {
                let mut cursor = node.walk();
                let children: Vec<Node> = node.named_children(&mut cursor).collect();
                for child in children {
                    self.visit_target(child, context);
                }
            }
            "member_access_expression" | "nullsafe_member_access_expression" => {
                self.visit_member_access(node, SymbolRole::Write, context)
            }
            "scoped_property_access_expression" => {
                self.visit_scoped_access(node, SymbolRole::Write, context)
            }
            // `$items[] = ...` writes to `$items`
            "subscript_expression" => {
                let mut cursor = node.walk();
                let children: Vec<Node> = node.named_children(&mut cursor).collect();
                for (i, child) in children.into_iter().enumerate() {
                    if i == 0 {
                        self.visit_target(child, context);
                    } else {
                        self.visit(child, context);
                    }
                }
            }
            _ => self.visit(node, context),
        }
    }

    /// `$object->name` and `$object->name()`; only `$this` members are
    /// resolved.
    fn visit_member_access(&mut self, node: Node, role: SymbolRole, context: Context) {
        let callable = node.kind().ends_with("call_expression");
        let object = node.child_by_field_name("object");
        if let Some(object) = object {
            self.visit(object, context);
        }
        let on_this = object.is_some_and(|o| o.kind() == "variable_name" && self.text(o) == "$this");
        if let Some(name) = node.child_by_field_name("name") {
            if on_this && name.kind() == "name" {
                self.record_member(name, callable, role, context);
            } else if name.kind() != "name" {
                // `$obj->$prop`
                self.visit(name, context);
            }
        }
        if let Some(arguments) = node.child_by_field_name("arguments") {
            self.visit(arguments, context);
        }
    }

    /// `self::method()`, `static::$property` and `Other::method()`.
    fn visit_scoped_access(&mut self, node: Node, role: SymbolRole, context: Context) {
        let callable = node.kind() == "scoped_call_expression";
        let scope = node.child_by_field_name("scope");
        let own = scope.is_some_and(|s| is_own_class(self.text(s)));
        if let Some(scope) = scope.filter(|_| !own) {
            self.visit_type_names(scope, context);
        }
        if let Some(name) = node.child_by_field_name("name") {
            if own {
                self.record_member(name, callable, role, context);
            }
        }
        if let Some(arguments) = node.child_by_field_name("arguments") {
            self.visit(arguments, context);
        }
    }

    fn visit_property_element(&mut self, node: Node, context: Context) {
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        let mut named = false;
        for child in children {
            if !named && child.kind() == "variable_name" {
                named = true;
                self.record_member(child, false, SymbolRole::Declaration, context);
            } else {
                self.visit(child, context);
            }
        }
    }

    fn visit_const_element(&mut self, node: Node, context: Context) {
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        let mut named = false;
        for child in children {
            if !named && child.kind() == "name" {
                named = true;
                if context.class.is_some() {
                    self.record_member(child, false, SymbolRole::Declaration, context);
                } else {
                    let text = self.text(child).to_string();
                    self.record(
                        node_range(child),
                        &text,
                        SymbolKind::Constant,
                        SymbolRole::Declaration,
                        context.namespace,
                    );
                }
            } else {
                self.visit(child, context);
            }
        }
    }

    /// `use Foo\Bar;`, `use Foo\{Bar, Baz as Qux};`, `use function f;`.
    fn visit_use_declaration(&mut self, node: Node, context: Context) {
        let kind = use_kind(node, self.source);
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let mut cursor = current.walk();
            for child in current.named_children(&mut cursor) {
                if matches!(child.kind(), "namespace_use_clause" | "namespace_use_group_clause") {
                    if let Some(local) = use_clause_local(child) {
                        let text = self.text(local).to_string();
                        self.record(
                            node_range(local),
                            &text,
                            kind,
                            SymbolRole::Import,
                            context.namespace,
                        );
                    }
                } else if child.kind() == "namespace_use_group" {
                    stack.push(child);
                }
            }
        }
    }

    /// Class names in type positions.
    fn visit_type_names(&mut self, node: Node, context: Context) {
        match node.kind() {
            "name" | "qualified_name" => {
                if let Some(name) = last_name(node) {
                    let text = self.text(name).to_string();
                    if !is_own_class(&text) {
                        self.record(
                            node_range(name),
                            &text,
                            SymbolKind::Class,
                            SymbolRole::Read,
                            context.namespace,
                        );
                    }
                }
            }
            "primitive_type" | "relative_scope" => {}
            _ => {
                let mut cursor = node.walk();
                let children: Vec<Node> = node.named_children(&mut cursor).collect();
                for child in children {
                    self.visit_type_names(child, context);
                }
            }
        }
    }

    fn record_variable(&mut self, node: Node, role: SymbolRole, context: Context) {
        let text = self.text(node);
        let name = variable_text(text).to_string();
        if name == "this" {
            let scope = context.class.unwrap_or(context.variables);
            self.record(node_range(node), &name, SymbolKind::This, SymbolRole::Read, scope);
        } else {
            self.record(node_range(node), &name, SymbolKind::Variable, role, context.variables);
        }
    }

    /// Member name of the enclosing class; the `$` of properties is not
    /// part of the range.
    fn record_member(&mut self, node: Node, callable: bool, role: SymbolRole, context: Context) {
        let Some(class) = context.class else {
            return;
        };
        let text = self.text(node).to_string();
        let mut range = node_range(node);
        let name = match text.strip_prefix('$') {
            Some(name) => {
                range = ByteRange::new(range.start + 1, range.end);
                name
            }
            None => text.as_str(),
        };
        self.record(range, name, SymbolKind::Member { callable }, role, class);
    }
}

fn use_kind(node: Node, source: &str) -> SymbolKind {
    let mut cursor = node.walk();
    let keyword = node
        .children(&mut cursor)
        .filter(|c| !c.is_named())
        .find_map(|c| match c.utf8_text(source.as_bytes()).unwrap_or_default() {
            "function" => Some(SymbolKind::Function),
            "const" => Some(SymbolKind::Constant),
            _ => None,
        });
    keyword.unwrap_or(SymbolKind::Class)
}

/// Name a `use` clause binds: its alias, or the last segment.
pub(crate) fn use_clause_local(clause: Node) -> Option<Node> {
    if let Some(alias) = clause.child_by_field_name("alias") {
        return Some(alias);
    }
    let mut cursor = clause.walk();
    let children: Vec<Node> = clause.named_children(&mut cursor).collect();
    for child in &children {
        if child.kind() == "namespace_aliasing_clause" {
            return child.named_children(&mut child.walk()).find(|c| c.kind() == "name");
        }
    }
    children
        .into_iter()
        .find(|c| c.kind() == "name" || c.kind() == "qualified_name")
        .and_then(last_name)
}

/// Last `name` segment of a (qualified) name.
pub(crate) fn last_name(node: Node) -> Option<Node> {
    match node.kind() {
        "name" => Some(node),
        "qualified_name" => node
            .named_children(&mut node.walk())
            .filter(|c| c.kind() == "name")
            .last(),
        _ => None,
    }
}

fn is_own_class(scope: &str) -> bool {
    scope.eq_ignore_ascii_case("self") || scope.eq_ignore_ascii_case("static")
}

fn variable_text(text: &str) -> &str {
    text.strip_prefix('$').unwrap_or(text)
}

pub(crate) fn node_range(node: Node) -> ByteRange {
    ByteRange::new(node.start_byte() as u32, node.end_byte() as u32)
}

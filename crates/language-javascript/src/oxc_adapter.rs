//! OXC integration for parsing and scope analysis.
//!
//! [`analyze_program`] parses a program, runs the semantic builder over it
//! and flattens everything reference queries need into an owned
//! [`ProgramIndex`], so no arena outlives the call.

use crate::error::JsAnalysisError;
use crate::jump_context::collect_jump_info;
use language_core::{ByteRange, JumpInfo, RenameHint};
use oxc::allocator::Allocator;
use oxc::ast::ast::{
    BindingIdentifier, BindingProperty, Expression, IdentifierReference, ImportDefaultSpecifier,
    ImportNamespaceSpecifier, ImportSpecifier, ObjectProperty,
};
use oxc::ast_visit::{walk, Visit};
use oxc::diagnostics::OxcDiagnostic;
use oxc::parser::Parser;
use oxc::semantic::{Scoping, SemanticBuilder};
use oxc::span::{GetSpan, SourceType, Span};
use std::collections::{HashMap, HashSet};

/// How a binding identifier introduces its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// Variables, functions, classes, parameters, catch params
    Plain,
    /// `import x from`
    DefaultImport,
    /// `import { x } from`
    NamedImport,
    /// `import * as x from`
    NamespaceImport,
}

/// The syntactic role of one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierRole {
    Declaration(DeclarationKind),
    Read,
    Write,
}

/// One identifier of the program that takes part in name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub span: ByteRange,
    pub name: String,
    pub role: IdentifierRole,
    /// Resolved symbol; `None` for globals
    pub symbol: Option<u32>,
    pub rename: Option<RenameHint>,
}

impl Identifier {
    pub fn is_declaration(&self) -> bool {
        matches!(self.role, IdentifierRole::Declaration(_))
    }
}

/// A declared symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub name: String,
    /// Declared in the program (module) scope
    pub root_scope: bool,
}

/// Everything reference queries and jump contexts need from one program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramIndex {
    /// Identifiers sorted by position
    pub identifiers: Vec<Identifier>,
    pub symbols: HashMap<u32, SymbolInfo>,
    /// Symbols reported as declared twice in the same scope
    pub redeclared: HashSet<u32>,
    pub jump: JumpInfo,
}

impl ProgramIndex {
    /// Rewrite every span through `map`, dropping what it rejects.
    ///
    /// Used to move an index built on generated code back to the
    /// coordinates of the document the code was generated from.
    pub fn map_spans(self, map: impl Fn(ByteRange) -> Option<ByteRange>) -> ProgramIndex {
        let identifiers = self
            .identifiers
            .into_iter()
            .filter_map(|identifier| {
                let span = map(identifier.span)?;
                let rename = identifier.rename.map(|hint| RenameHint {
                    key: hint.key.and_then(&map),
                    ..hint
                });
                Some(Identifier {
                    span,
                    rename,
                    ..identifier
                })
            })
            .collect();
        ProgramIndex {
            identifiers,
            symbols: self.symbols,
            redeclared: self.redeclared,
            jump: self.jump.map_ranges(&map),
        }
    }

    pub fn symbol(&self, symbol: u32) -> Option<&SymbolInfo> {
        self.symbols.get(&symbol)
    }
}

/// Parse and analyze a program of the given source type.
pub fn analyze_program(
    source: &str,
    source_type: SourceType,
) -> Result<ProgramIndex, JsAnalysisError> {
    let allocator = Allocator::default();
    let parser_return = Parser::new(&allocator, source, source_type).parse();

    if let Some(error) = parser_return.errors.first() {
        return Err(syntax_error(error));
    }
    if parser_return.panicked {
        return Err(JsAnalysisError::Syntax {
            message: "Unexpected token".to_string(),
            span: None,
        });
    }

    let program = parser_return.program;
    let semantic_return = SemanticBuilder::new().build(&program);

    // Redeclarations are the only semantic errors worth keeping: the
    // affected symbol resolves to nothing instead of failing the parse.
    let redeclaration_spans: HashSet<ByteRange> = semantic_return
        .errors
        .iter()
        .filter(|error| is_redeclaration(&error.to_string()))
        .flat_map(label_ranges)
        .collect();

    let scoping = semantic_return.semantic.scoping();
    let root_scope = scoping.root_scope_id();
    let symbols = scoping
        .symbol_ids()
        .map(|symbol_id| {
            (
                symbol_id.index() as u32,
                SymbolInfo {
                    name: scoping.symbol_name(symbol_id).to_string(),
                    root_scope: scoping.symbol_scope_id(symbol_id) == root_scope,
                },
            )
        })
        .collect();

    let mut builder = IndexBuilder::new(scoping);
    builder.visit_program(&program);
    let identifiers = builder.finish();

    let redeclared: HashSet<u32> = identifiers
        .iter()
        .filter(|i| i.is_declaration() && redeclaration_spans.contains(&i.span))
        .filter_map(|i| i.symbol)
        .collect();
    if !redeclared.is_empty() {
        log::debug!("redeclared symbols: {:?}", redeclared);
    }

    Ok(ProgramIndex {
        identifiers,
        symbols,
        redeclared,
        jump: collect_jump_info(&program),
    })
}

/// Parse as an ES module with JSX, falling back to a sloppy-mode script
/// and then to TSX, which takes Flow-style type annotations.
///
/// The module error is reported when all of them fail.
pub fn analyze_source(source: &str) -> Result<ProgramIndex, JsAnalysisError> {
    let module_error = match analyze_program(source, SourceType::mjs().with_jsx(true)) {
        Ok(index) => return Ok(index),
        Err(err) => err,
    };
    log::debug!("module parse failed ({module_error}), retrying as script");
    if let Ok(index) = analyze_program(source, SourceType::cjs().with_jsx(true)) {
        return Ok(index);
    }
    log::debug!("script parse failed, retrying with type annotations");
    analyze_program(source, SourceType::tsx()).map_err(|_| module_error)
}

/// Convert OXC Span to ByteRange.
pub fn span_to_byte_range(span: Span) -> ByteRange {
    ByteRange::new(span.start, span.end)
}

fn syntax_error(diagnostic: &OxcDiagnostic) -> JsAnalysisError {
    JsAnalysisError::Syntax {
        message: diagnostic.to_string(),
        span: label_ranges(diagnostic).next(),
    }
}

fn label_ranges(diagnostic: &OxcDiagnostic) -> impl Iterator<Item = ByteRange> + '_ {
    diagnostic
        .labels
        .iter()
        .flatten()
        .map(|label| ByteRange::new(label.offset() as u32, (label.offset() + label.len()) as u32))
}

/// "Identifier `a` has already been declared"
fn is_redeclaration(message: &str) -> bool {
    message.contains("already been declared")
}

/// Collects identifiers with their resolution.
struct IndexBuilder<'s> {
    scoping: &'s Scoping,
    identifiers: Vec<Identifier>,
    rename_hints: HashMap<(u32, u32), RenameHint>,
}

impl<'s> IndexBuilder<'s> {
    fn new(scoping: &'s Scoping) -> Self {
        Self {
            scoping,
            identifiers: Vec::new(),
            rename_hints: HashMap::new(),
        }
    }

    fn push_declaration(
        &mut self,
        ident: &BindingIdentifier,
        kind: DeclarationKind,
        rename: Option<RenameHint>,
    ) {
        let Some(symbol_id) = ident.symbol_id.get() else {
            return;
        };
        self.identifiers.push(Identifier {
            span: span_to_byte_range(ident.span),
            name: ident.name.to_string(),
            role: IdentifierRole::Declaration(kind),
            symbol: Some(symbol_id.index() as u32),
            rename,
        });
    }

    fn finish(mut self) -> Vec<Identifier> {
        for identifier in &mut self.identifiers {
            if identifier.rename.is_none() {
                let key = (identifier.span.start, identifier.span.end);
                identifier.rename = self.rename_hints.get(&key).copied();
            }
        }
        self.identifiers.sort_by_key(|i| (i.span.start, i.span.end));
        self.identifiers.dedup_by_key(|i| i.span);
        self.identifiers
    }
}

impl<'a, 's> Visit<'a> for IndexBuilder<'s> {
    fn visit_binding_identifier(&mut self, it: &BindingIdentifier<'a>) {
        self.push_declaration(it, DeclarationKind::Plain, None);
    }

    fn visit_identifier_reference(&mut self, it: &IdentifierReference<'a>) {
        let (symbol, role) = match it.reference_id.get() {
            Some(reference_id) => {
                let reference = self.scoping.get_reference(reference_id);
                let role = if reference.flags().is_write() {
                    IdentifierRole::Write
                } else {
                    IdentifierRole::Read
                };
                (reference.symbol_id().map(|id| id.index() as u32), role)
            }
            None => (None, IdentifierRole::Read),
        };
        self.identifiers.push(Identifier {
            span: span_to_byte_range(it.span),
            name: it.name.to_string(),
            role,
            symbol,
            rename: None,
        });
    }

    fn visit_import_specifier(&mut self, it: &ImportSpecifier<'a>) {
        let imported = it.imported.span();
        let key = (imported != it.local.span).then(|| span_to_byte_range(imported));
        self.push_declaration(
            &it.local,
            DeclarationKind::NamedImport,
            Some(RenameHint::import_specifier(key)),
        );
    }

    fn visit_import_default_specifier(&mut self, it: &ImportDefaultSpecifier<'a>) {
        self.push_declaration(&it.local, DeclarationKind::DefaultImport, None);
    }

    fn visit_import_namespace_specifier(&mut self, it: &ImportNamespaceSpecifier<'a>) {
        self.push_declaration(&it.local, DeclarationKind::NamespaceImport, None);
    }

    fn visit_object_property(&mut self, it: &ObjectProperty<'a>) {
        if let Expression::Identifier(ident) = &it.value {
            let value = (ident.span.start, ident.span.end);
            if it.shorthand {
                self.rename_hints
                    .insert(value, RenameHint::shorthand_property());
            } else if !it.computed {
                let key = span_to_byte_range(it.key.span());
                self.rename_hints
                    .insert(value, RenameHint::keyed_property(key));
            }
        }
        walk::walk_object_property(self, it);
    }

    fn visit_binding_property(&mut self, it: &BindingProperty<'a>) {
        let value = it.value.span();
        if it.shorthand {
            self.rename_hints
                .insert((value.start, value.end), RenameHint::shorthand_property());
        } else if !it.computed {
            let key = span_to_byte_range(it.key.span());
            self.rename_hints
                .insert((value.start, value.end), RenameHint::keyed_property(key));
        }
        walk::walk_binding_property(self, it);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(source: &str) -> ProgramIndex {
        analyze_source(source).unwrap()
    }

    fn find<'i>(index: &'i ProgramIndex, source: &str, needle: &str) -> &'i Identifier {
        let start = source.find(needle).unwrap() as u32;
        index
            .identifiers
            .iter()
            .find(|i| i.span.start == start)
            .unwrap()
    }

    #[test]
    fn test_identifiers_are_resolved() {
        let source = "const a = 1; a = a + 1; console.log(a)";
        let index = index(source);

        let names: Vec<&str> = index.identifiers.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a", "a", "a", "console", "a"]);

        let declaration = &index.identifiers[0];
        assert_eq!(declaration.role, IdentifierRole::Declaration(DeclarationKind::Plain));
        assert_eq!(index.identifiers[1].role, IdentifierRole::Write);
        assert_eq!(index.identifiers[2].role, IdentifierRole::Read);
        assert!(index.identifiers[..3]
            .iter()
            .all(|i| i.symbol == declaration.symbol));

        let console = &index.identifiers[3];
        assert_eq!(console.symbol, None);
        assert!(index.symbol(declaration.symbol.unwrap()).unwrap().root_scope);
    }

    #[test]
    fn test_member_properties_are_not_identifiers() {
        let source = "o.handler = 1; handler()";
        let index = index(source);
        assert_eq!(index.identifiers.len(), 2);
        assert_eq!(index.identifiers[0].name, "o");
        assert_eq!(index.identifiers[1].name, "handler");
    }

    #[test]
    fn test_import_declarations() {
        let source = "import a from 'a'; import { b, c as d } from 'b'; import * as e from 'e'";
        let index = index(source);

        let roles: Vec<(&str, IdentifierRole)> = index
            .identifiers
            .iter()
            .map(|i| (i.name.as_str(), i.role))
            .collect();
        assert_eq!(
            roles,
            vec![
                ("a", IdentifierRole::Declaration(DeclarationKind::DefaultImport)),
                ("b", IdentifierRole::Declaration(DeclarationKind::NamedImport)),
                ("d", IdentifierRole::Declaration(DeclarationKind::NamedImport)),
                ("e", IdentifierRole::Declaration(DeclarationKind::NamespaceImport)),
            ]
        );

        let b = find(&index, source, "b,");
        assert_eq!(b.rename, Some(RenameHint::import_specifier(None)));
        let d = find(&index, source, "d }");
        let c_start = source.find("c as").unwrap() as u32;
        assert_eq!(d.rename.unwrap().key, Some(ByteRange::new(c_start, c_start + 1)));
    }

    #[test]
    fn test_shorthand_property_hint() {
        let source = "const foo = 1; const o = { foo, bar: foo }";
        let index = index(source);
        let refs: Vec<&Identifier> = index
            .identifiers
            .iter()
            .filter(|i| i.name == "foo" && !i.is_declaration())
            .collect();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].rename, Some(RenameHint::shorthand_property()));
        let bar = source.find("bar").unwrap() as u32;
        assert_eq!(refs[1].rename.unwrap().key, Some(ByteRange::new(bar, bar + 3)));
    }

    #[test]
    fn test_redeclaration_is_recorded() {
        let index = index("let a = 1; let a = 2");
        let first = index.identifiers.iter().find(|i| i.name == "a").unwrap();
        assert!(index.redeclared.contains(&first.symbol.unwrap()));
    }

    #[test]
    fn test_syntax_error_has_location() {
        let err = analyze_source("const a = ;").unwrap_err();
        assert!(
            matches!(err, JsAnalysisError::Syntax { span: Some(span), .. } if span.start == 10)
        );
    }

    #[test]
    fn test_script_fallback() {
        // `with` is a syntax error in strict (module) code only
        let index = index("with (o) { a }");
        assert!(index.identifiers.iter().any(|i| i.name == "a"));
    }

    #[test]
    fn test_jsx_component_is_a_reference() {
        let source = "import Foo from './Foo'; const el = <Foo bar={1} />";
        let index = index(source);
        let foo: Vec<&Identifier> = index.identifiers.iter().filter(|i| i.name == "Foo").collect();
        assert_eq!(foo.len(), 2);
        assert_eq!(foo[0].symbol, foo[1].symbol);
    }

    #[test]
    fn test_redeclared_symbols() {
        let source = "const a = 1\nfunction f() { let a; let a }";
        let index = index(source);
        let outer = index.identifiers.iter().find(|i| i.name == "a").unwrap();
        let inner = index.identifiers.iter().rfind(|i| i.name == "a").unwrap();
        assert!(!index.redeclared.contains(&outer.symbol.unwrap()));
        assert!(index.redeclared.contains(&inner.symbol.unwrap()));
        assert!(is_redeclaration("Identifier `a` has already been declared"));
        assert!(!is_redeclaration("Unexpected token"));
    }

    #[test]
    fn test_type_annotation_fallback() {
        let source = "function f(a: number): number { return a }";
        let index = index(source);
        let a: Vec<&Identifier> = index.identifiers.iter().filter(|i| i.name == "a").collect();
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].span, ByteRange::new(11, 12));
        assert_eq!(a[0].symbol, a[1].symbol);

        // failing every parse reports the module error
        let err = analyze_source("function f(a: number) { return }\nconst = 1").unwrap_err();
        assert!(
            matches!(err, JsAnalysisError::Syntax { span: Some(span), .. } if span.start < 20)
        );
    }
}

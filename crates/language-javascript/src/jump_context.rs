//! Import/export summary of a JavaScript program.
//!
//! Covers ES modules (`import`, `export`, `import()`) and CommonJS
//! (`require`, `require.resolve`, `module.exports`).

use crate::oxc_adapter::span_to_byte_range;
use language_core::{JumpInfo, DEFAULT_EXPORT, NAMESPACE_IMPORT};
use oxc::ast::ast::{
    Argument, AssignmentExpression, AssignmentTarget, BindingIdentifier, BindingPattern,
    BindingPatternKind, CallExpression, Declaration, ExportAllDeclaration,
    ExportDefaultDeclaration, ExportDefaultDeclarationKind, ExportNamedDeclaration, Expression,
    ImportDeclaration, ImportDeclarationSpecifier, ImportExpression, Program, VariableDeclarator,
};
use oxc::ast_visit::{walk, Visit};
use oxc::span::{GetSpan, Span};

/// Collect exports, imported bindings and module paths of `program`.
pub fn collect_jump_info(program: &Program) -> JumpInfo {
    let mut collector = JumpInfoCollector::default();
    collector.visit_program(program);
    collector.info
}

#[derive(Default)]
struct JumpInfoCollector {
    info: JumpInfo,
}

impl JumpInfoCollector {
    fn add_declaration_exports(&mut self, declaration: &Declaration) {
        match declaration {
            Declaration::VariableDeclaration(variables) => {
                for declarator in &variables.declarations {
                    for (name, span) in bound_names(&declarator.id) {
                        self.info.add_export(name, span_to_byte_range(span));
                    }
                }
            }
            Declaration::FunctionDeclaration(function) => {
                if let Some(id) = &function.id {
                    self.info.add_export(id.name.as_str(), span_to_byte_range(id.span));
                }
            }
            Declaration::ClassDeclaration(class) => {
                if let Some(id) = &class.id {
                    self.info.add_export(id.name.as_str(), span_to_byte_range(id.span));
                }
            }
            _ => {}
        }
    }
}

impl<'a> Visit<'a> for JumpInfoCollector {
    fn visit_import_declaration(&mut self, it: &ImportDeclaration<'a>) {
        let module_name = it.source.value.as_str();

        for specifier in it.specifiers.iter().flatten() {
            match specifier {
                ImportDeclarationSpecifier::ImportDefaultSpecifier(default) => {
                    self.info.add_module(
                        default.local.name.as_str(),
                        module_name,
                        DEFAULT_EXPORT,
                        span_to_byte_range(default.local.span),
                    );
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(namespace) => {
                    self.info.add_module(
                        namespace.local.name.as_str(),
                        module_name,
                        NAMESPACE_IMPORT,
                        span_to_byte_range(namespace.local.span),
                    );
                }
                ImportDeclarationSpecifier::ImportSpecifier(named) => {
                    let imported = named.imported.name();
                    // `{ a as b }` also navigates from `a`
                    if named.imported.span() != named.local.span {
                        self.info.add_path(
                            module_name,
                            imported.as_str(),
                            span_to_byte_range(named.imported.span()),
                        );
                    }
                    self.info.add_module(
                        named.local.name.as_str(),
                        module_name,
                        imported.as_str(),
                        span_to_byte_range(named.local.span),
                    );
                }
            }
        }

        self.info
            .add_path(module_name, DEFAULT_EXPORT, span_to_byte_range(it.source.span));
    }

    fn visit_export_named_declaration(&mut self, it: &ExportNamedDeclaration<'a>) {
        let module_name = it.source.as_ref().map(|source| source.value.as_str());

        for specifier in &it.specifiers {
            let local = specifier.local.name();
            match module_name {
                Some(module_name) => {
                    // No local binding: both names navigate into the module.
                    self.info.add_export(
                        specifier.exported.name().as_str(),
                        span_to_byte_range(specifier.exported.span()),
                    );
                    self.info.add_path(
                        module_name,
                        local.as_str(),
                        span_to_byte_range(specifier.local.span()),
                    );
                    if specifier.exported.span() != specifier.local.span() {
                        self.info.add_path(
                            module_name,
                            local.as_str(),
                            span_to_byte_range(specifier.exported.span()),
                        );
                    }
                }
                None => {
                    self.info.add_export(
                        specifier.exported.name().as_str(),
                        span_to_byte_range(specifier.local.span()),
                    );
                }
            }
        }

        if let Some(declaration) = &it.declaration {
            self.add_declaration_exports(declaration);
        }

        if let Some(source) = &it.source {
            self.info.add_path(
                source.value.as_str(),
                DEFAULT_EXPORT,
                span_to_byte_range(source.span),
            );
        }

        walk::walk_export_named_declaration(self, it);
    }

    fn visit_export_default_declaration(&mut self, it: &ExportDefaultDeclaration<'a>) {
        let span = match &it.declaration {
            ExportDefaultDeclarationKind::Identifier(id) => id.span,
            _ => it.span,
        };
        self.info.add_export(DEFAULT_EXPORT, span_to_byte_range(span));
        walk::walk_export_default_declaration(self, it);
    }

    fn visit_export_all_declaration(&mut self, it: &ExportAllDeclaration<'a>) {
        let module_name = it.source.value.as_str();
        if let Some(exported) = &it.exported {
            self.info.add_export(
                exported.name().as_str(),
                span_to_byte_range(exported.span()),
            );
            self.info.add_path(
                module_name,
                NAMESPACE_IMPORT,
                span_to_byte_range(exported.span()),
            );
        }
        self.info
            .add_path(module_name, DEFAULT_EXPORT, span_to_byte_range(it.source.span));
    }

    fn visit_variable_declarator(&mut self, it: &VariableDeclarator<'a>) {
        if let Some(Expression::CallExpression(call)) = &it.init {
            if let Some((module_name, _)) = module_call(call) {
                if let BindingPatternKind::BindingIdentifier(id) = &it.id.kind {
                    self.info.add_module(
                        id.name.as_str(),
                        module_name.as_str(),
                        DEFAULT_EXPORT,
                        span_to_byte_range(id.span),
                    );
                } else {
                    // const { a, b } = require('x')
                    for (name, span) in bound_names(&it.id) {
                        self.info.add_module(
                            name.as_str(),
                            module_name.as_str(),
                            name.as_str(),
                            span_to_byte_range(span),
                        );
                    }
                }
            }
        }
        walk::walk_variable_declarator(self, it);
    }

    fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
        if let Some((module_name, span)) = module_call(it) {
            self.info
                .add_path(module_name, DEFAULT_EXPORT, span_to_byte_range(span));
        }
        walk::walk_call_expression(self, it);
    }

    fn visit_import_expression(&mut self, it: &ImportExpression<'a>) {
        let literal = match &it.source {
            Expression::StringLiteral(literal) => Some((literal.value.to_string(), literal.span)),
            Expression::TemplateLiteral(template) if template.expressions.is_empty() => template
                .quasis
                .first()
                .and_then(|quasi| quasi.value.cooked.as_ref())
                .map(|cooked| (cooked.to_string(), template.span)),
            _ => None,
        };
        if let Some((module_name, span)) = literal {
            self.info
                .add_path(module_name, DEFAULT_EXPORT, span_to_byte_range(span));
        }
        walk::walk_import_expression(self, it);
    }

    fn visit_assignment_expression(&mut self, it: &AssignmentExpression<'a>) {
        if let Some(target) = module_exports_target(&it.left) {
            self.info
                .add_export(DEFAULT_EXPORT, span_to_byte_range(target));
            // module.exports = require('x') forwards the whole module
            if let Expression::CallExpression(call) = &it.right {
                if let Some((module_name, _)) = module_call(call) {
                    self.info
                        .add_path(module_name, DEFAULT_EXPORT, span_to_byte_range(target));
                }
            }
        }
        walk::walk_assignment_expression(self, it);
    }
}

/// Module specifier and its span for `require('x')` and
/// `require.resolve('x')` calls with a literal argument.
fn module_call(call: &CallExpression) -> Option<(String, Span)> {
    let is_require = match &call.callee {
        Expression::Identifier(id) => id.name == "require",
        Expression::StaticMemberExpression(member) => {
            matches!(&member.object, Expression::Identifier(object) if object.name == "require")
                && member.property.name == "resolve"
        }
        _ => false,
    };
    if !is_require {
        return None;
    }
    match call.arguments.first()? {
        Argument::StringLiteral(literal) => Some((literal.value.to_string(), literal.span)),
        Argument::TemplateLiteral(template) if template.expressions.is_empty() => {
            let cooked = template.quasis.first()?.value.cooked.as_ref()?;
            Some((cooked.to_string(), template.span))
        }
        _ => None,
    }
}

fn module_exports_target(target: &AssignmentTarget) -> Option<Span> {
    match target {
        AssignmentTarget::StaticMemberExpression(member)
            if member.property.name == "exports"
                && matches!(&member.object, Expression::Identifier(object) if object.name == "module") =>
        {
            Some(member.span)
        }
        _ => None,
    }
}

/// Names bound by a declaration pattern.
fn bound_names(pattern: &BindingPattern) -> Vec<(String, Span)> {
    #[derive(Default)]
    struct Names(Vec<(String, Span)>);

    impl<'a> Visit<'a> for Names {
        fn visit_binding_identifier(&mut self, it: &BindingIdentifier<'a>) {
            self.0.push((it.name.to_string(), it.span));
        }
    }

    let mut names = Names::default();
    names.visit_binding_pattern(pattern);
    names.0
}

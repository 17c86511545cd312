//! Scope analysis of a whole component.

use crate::error::SvelteError;
use crate::template::scan_component;
use language_core::ByteRange;
use language_javascript::{analyze_program, JsAnalysisError, ProgramIndex, SourceType};

/// Analyze a component as one program.
///
/// Both scripts and the markup share the component scope, so a name
/// declared in either script is visible everywhere. The returned index is
/// in component coordinates; only exports of the module script are kept,
/// since instance exports are component props.
pub fn analyze_component(source: &str) -> Result<ProgramIndex, SvelteError> {
    let component = scan_component(source)?;
    let program = &component.program;
    let source_type = if component.typescript {
        SourceType::ts()
    } else {
        SourceType::mjs()
    };

    let index = analyze_program(program.code(), source_type).map_err(|err| match err {
        JsAnalysisError::Syntax { message, span } => {
            let offset = span.map_or(0, |span| program.nearest_source_offset(span.start));
            SvelteError::Script {
                message,
                range: ByteRange::new(offset, offset),
            }
        }
    })?;

    let mut index = index.map_spans(|span| program.source_range(span));
    index
        .jump
        .exports
        .retain(|_, range| component.module_script.is_some_and(|script| range.is_within(&script)));
    alias_stores(&mut index);
    index.identifiers.sort_by_key(|i| (i.span.start, i.span.end));
    log::debug!(
        "component analyzed: {} identifiers, module script: {}",
        index.identifiers.len(),
        component.module_script.is_some()
    );
    Ok(index)
}

/// Resolve `$store` auto-subscriptions to the store binding.
///
/// An unbound `$name` refers to the top-level `name`; its range starts
/// after the `$`.
pub fn alias_stores(index: &mut ProgramIndex) {
    let ProgramIndex {
        identifiers,
        symbols,
        ..
    } = index;

    for identifier in identifiers.iter_mut() {
        if identifier.symbol.is_some() {
            continue;
        }
        let Some(store) = identifier.name.strip_prefix('$') else {
            continue;
        };
        if store.is_empty() || store.starts_with('$') {
            continue;
        }
        let symbol = symbols
            .iter()
            .filter(|(_, info)| info.root_scope && info.name == store)
            .map(|(&id, _)| id)
            .min();
        if let Some(symbol) = symbol {
            identifier.span = ByteRange::new(identifier.span.start + 1, identifier.span.end);
            identifier.name = store.to_string();
            identifier.symbol = Some(symbol);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_exports_are_props() {
        let source = "<script context=\"module\">export const a = 1</script>\n<script>export let b</script>";
        let index = analyze_component(source).unwrap();
        let exports: Vec<_> = index.jump.exports.keys().cloned().collect();
        assert_eq!(exports, vec!["a".to_string()]);
    }

    #[test]
    fn test_imports_are_kept() {
        let source = "<script>import Foo from './Foo.svelte'</script>\n<Foo/>";
        let index = analyze_component(source).unwrap();
        let module = &index.jump.external_modules[0];
        assert_eq!(module.local, "Foo");
        assert_eq!(module.module_name, "./Foo.svelte");
        assert_eq!(module.range.slice(source), Some("Foo"));
        assert!(index
            .jump
            .paths
            .iter()
            .any(|p| p.range.slice(source) == Some("'./Foo.svelte'")));
    }

    #[test]
    fn test_script_error_is_located() {
        let source = "<p>{a}</p>\n<script>\nconst a = 1\nconst b 2345\n</script>";
        let err = analyze_component(source).unwrap_err();
        let range = match err {
            SvelteError::Script { range, .. } => range,
            other => panic!("expected a script error, got {other:?}"),
        };
        let line_start = source.find("const b").unwrap() as u32;
        assert!(range.start >= line_start);
        assert!(range.start <= line_start + "const b 2345".len() as u32);
    }

    #[test]
    fn test_typescript_scripts() {
        let source = "<script lang=\"ts\">let count: number = 0</script>\n{count}";
        let index = analyze_component(source).unwrap();
        assert_eq!(
            index
                .identifiers
                .iter()
                .filter(|i| i.name == "count")
                .count(),
            2
        );
    }
}

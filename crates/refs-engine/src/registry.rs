//! Static registry from editor scope ids to analyzers.

use language_core::{
    ContextError, JumpContextResult, LanguageAnalyzer, Occurrence, ParseError,
};
use language_javascript::JavaScriptAnalyzer;
use language_php::PhpAnalyzer;
use language_python::PythonAnalyzer;
use language_svelte::SvelteAnalyzer;
use std::path::Path;

/// The languages with a reference analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    Svelte,
    Python,
    Php,
}

/// Scope used for files with an unknown extension.
pub const DEFAULT_SCOPE: &str = "source.js.jsx";

impl Language {
    pub const ALL: [Language; 4] = [
        Language::JavaScript,
        Language::Svelte,
        Language::Python,
        Language::Php,
    ];

    /// Language analyzing `scope`, if any.
    pub fn for_scope(scope: &str) -> Option<Language> {
        Self::ALL
            .into_iter()
            .find(|language| language.scopes().contains(&scope))
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::JavaScript => JavaScriptAnalyzer.name(),
            Language::Svelte => SvelteAnalyzer.name(),
            Language::Python => PythonAnalyzer.name(),
            Language::Php => PhpAnalyzer.name(),
        }
    }

    pub fn scopes(self) -> &'static [&'static str] {
        match self {
            Language::JavaScript => JavaScriptAnalyzer.scopes(),
            Language::Svelte => SvelteAnalyzer.scopes(),
            Language::Python => PythonAnalyzer.scopes(),
            Language::Php => PhpAnalyzer.scopes(),
        }
    }
}

/// Every scope id with an analyzer.
pub fn supported_scopes() -> Vec<&'static str> {
    Language::ALL
        .into_iter()
        .flat_map(|language| language.scopes().iter().copied())
        .collect()
}

/// Editor scope of a file, from its extension.
pub fn scope_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("js" | "mjs" | "cjs" | "jsx") => "source.js.jsx",
        Some("html" | "htm") => "text.html.basic",
        Some("vue") => "text.html.vue",
        Some("svelte" | "svench") => "source.svelte",
        Some("py") => "source.python",
        Some("php") => "text.html.php",
        _ => {
            log::warn!(
                "no scope for {}, analyzing as {DEFAULT_SCOPE}",
                path.display()
            );
            DEFAULT_SCOPE
        }
    }
}

/// Why references could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferencesError {
    #[error("unsupported scope '{0}'")]
    UnsupportedScope(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Parse `code` and find the occurrences of the binding at `offset`.
pub fn find_references(
    code: &str,
    scope: &str,
    offset: u32,
) -> Result<Vec<Occurrence>, ReferencesError> {
    match Language::for_scope(scope) {
        Some(Language::JavaScript) => references_with(JavaScriptAnalyzer, code, scope, offset),
        Some(Language::Svelte) => references_with(SvelteAnalyzer, code, scope, offset),
        Some(Language::Python) => references_with(PythonAnalyzer, code, scope, offset),
        Some(Language::Php) => references_with(PhpAnalyzer, code, scope, offset),
        None => Err(ReferencesError::UnsupportedScope(scope.to_string())),
    }
}

fn references_with<A: LanguageAnalyzer>(
    analyzer: A,
    code: &str,
    scope: &str,
    offset: u32,
) -> Result<Vec<Occurrence>, ReferencesError> {
    let document = analyzer.parse(code, scope)?;
    Ok(analyzer.find_references(&document, offset))
}

/// Build the jump context of `code` with the analyzer of `scope`.
pub fn create_jump_context(code: &str, scope: &str) -> JumpContextResult {
    match Language::for_scope(scope) {
        Some(Language::JavaScript) => JavaScriptAnalyzer.create_jump_context(code, scope),
        Some(Language::Svelte) => SvelteAnalyzer.create_jump_context(code, scope),
        Some(Language::Python) => PythonAnalyzer.create_jump_context(code, scope),
        Some(Language::Php) => PhpAnalyzer.create_jump_context(code, scope),
        None => Err(ContextError::UnsupportedScope(scope.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use language_core::OccurrenceKind;

    #[test]
    fn test_language_for_scope() {
        assert_eq!(Language::for_scope("source.js"), Some(Language::JavaScript));
        assert_eq!(Language::for_scope("text.html.vue"), Some(Language::JavaScript));
        assert_eq!(Language::for_scope("source.svelte"), Some(Language::Svelte));
        assert_eq!(Language::for_scope("source.python"), Some(Language::Python));
        assert_eq!(Language::for_scope("source.php"), Some(Language::Php));
        assert_eq!(Language::for_scope("text.plain"), None);
    }

    #[test]
    fn test_scope_for_path() {
        assert_eq!(scope_for_path(Path::new("a/b.mjs")), "source.js.jsx");
        assert_eq!(scope_for_path(Path::new("index.HTML")), "text.html.basic");
        assert_eq!(scope_for_path(Path::new("App.vue")), "text.html.vue");
        assert_eq!(scope_for_path(Path::new("App.svench")), "source.svelte");
        assert_eq!(scope_for_path(Path::new("main.py")), "source.python");
        assert_eq!(scope_for_path(Path::new("index.php")), "text.html.php");
        assert_eq!(scope_for_path(Path::new("Makefile")), DEFAULT_SCOPE);
    }

    #[test]
    fn test_supported_scopes_are_unique() {
        let scopes = supported_scopes();
        let mut unique = scopes.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(scopes.len(), unique.len());
        assert!(scopes.contains(&"javascript"));
    }

    #[test]
    fn test_find_references_dispatch() {
        let occurrences = find_references("x = 1\nprint(x)\n", "source.python", 0).unwrap();
        let kinds: Vec<_> = occurrences.iter().map(|o| o.kind).collect();
        assert_eq!(kinds, vec![OccurrenceKind::Decl, OccurrenceKind::Ref]);

        assert_eq!(
            find_references("x", "text.plain", 0),
            Err(ReferencesError::UnsupportedScope("text.plain".into()))
        );
        assert!(matches!(
            find_references("const = ;", "source.js", 0),
            Err(ReferencesError::Parse(_))
        ));
    }

    #[test]
    fn test_unsupported_jump_context() {
        assert!(matches!(
            create_jump_context("", "text.plain"),
            Err(ContextError::UnsupportedScope(_))
        ));
    }
}

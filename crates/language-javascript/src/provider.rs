//! JavaScript analyzer implementation.

use crate::find_references::find_references;
use crate::oxc_adapter::{analyze_source, ProgramIndex};
use crate::script::extract_script;
use language_core::{JumpInfo, LanguageAnalyzer, Occurrence, ParseError};

/// Scopes whose documents are HTML hosting a `<script>` element.
const HTML_SCOPES: &[&str] = &["text.html.basic", "text.html.vue"];

const SCOPES: &[&str] = &[
    "source.js",
    "source.js.jsx",
    "source.jsx",
    "javascript",
    "source.babel",
    "text.html.basic",
    "text.html.vue",
];

/// Analyzer for JavaScript and JSX using OXC.
///
/// Documents are analyzed once at parse time: the OXC arena is dropped
/// and queries run against the owned [`ProgramIndex`].
///
/// HTML-like scopes analyze the last `<script>` element of the document,
/// with everything else blanked so offsets match the host document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaScriptAnalyzer;

/// A parsed JavaScript document.
#[derive(Debug, Clone)]
pub struct JsDocument {
    pub index: ProgramIndex,
}

impl JavaScriptAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn is_html(scope: &str) -> bool {
        HTML_SCOPES.contains(&scope)
    }
}

impl LanguageAnalyzer for JavaScriptAnalyzer {
    type Document = JsDocument;

    fn name(&self) -> &'static str {
        "javascript"
    }

    fn scopes(&self) -> &'static [&'static str] {
        SCOPES
    }

    fn parse(&self, code: &str, scope: &str) -> Result<JsDocument, ParseError> {
        let index = if Self::is_html(scope) {
            let script = extract_script(code);
            analyze_source(&script).map_err(|e| e.into_parse_error(&script))?
        } else {
            analyze_source(code).map_err(|e| e.into_parse_error(code))?
        };
        log::debug!(
            "parsed {} identifiers, {} symbols",
            index.identifiers.len(),
            index.symbols.len()
        );
        Ok(JsDocument { index })
    }

    fn find_references(&self, document: &JsDocument, offset: u32) -> Vec<Occurrence> {
        find_references(&document.index, offset)
    }

    fn jump_info(&self, document: &JsDocument) -> Result<JumpInfo, ParseError> {
        Ok(document.index.jump.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use language_core::{Jump, JumpOptions, OccurrenceKind, Position};

    #[test]
    fn test_scopes() {
        let analyzer = JavaScriptAnalyzer::new();
        assert!(analyzer.supports_scope("source.js"));
        assert!(analyzer.supports_scope("text.html.vue"));
        assert!(!analyzer.supports_scope("source.python"));
    }

    #[test]
    fn test_parse_error_is_located() {
        let error = JavaScriptAnalyzer
            .parse("let a = 1\nlet = ;", "source.js")
            .unwrap_err();
        assert_eq!(error.start.map(|p| p.row), Some(1));
    }

    #[test]
    fn test_html_offsets_match_document() {
        let code = "<div>{x}</div>\n<script>\nconst x = 1\nx\n</script>\n";
        let analyzer = JavaScriptAnalyzer;
        let document = analyzer.parse(code, "text.html.basic").unwrap();
        let declaration = code.find("x = 1").unwrap() as u32;

        let occurrences = analyzer.find_references(&document, declaration);
        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].range.start, declaration);
        assert_eq!(occurrences[0].kind, OccurrenceKind::Decl);
        // markup is not analyzed
        assert!(analyzer
            .find_references(&document, code.find('x').unwrap() as u32)
            .is_empty());
    }

    #[test]
    fn test_jump_context() {
        let code = "import { a } from './a'\na()";
        let context = JavaScriptAnalyzer
            .create_jump_context(code, "source.js")
            .unwrap();
        let jump = context
            .build_jump(Position::new(1, 0), JumpOptions::default())
            .unwrap();
        assert_eq!(
            jump,
            Some(Jump::FromImport {
                module_name: "./a".into(),
                imported: "a".into(),
                binding: language_core::ByteRange::new(9, 10),
            })
        );
    }

    #[test]
    fn test_unsupported_scope() {
        let result = JavaScriptAnalyzer.create_jump_context("x", "source.php");
        assert!(matches!(
            result,
            Err(language_core::ContextError::UnsupportedScope(_))
        ));
    }
}

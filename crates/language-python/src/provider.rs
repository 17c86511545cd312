//! Python analyzer implementation.

use crate::find_references::find_references;
use crate::jump_context::collect_jump_info;
use crate::parse::{parse_tree, syntax_errors};
use crate::scope::ScopeIndex;
use language_core::{JumpInfo, LanguageAnalyzer, Occurrence, ParseError};

const SCOPES: &[&str] = &["source.python"];

/// Analyzer for Python using tree-sitter.
///
/// The syntax tree is only needed while indexing; documents keep the
/// owned [`ScopeIndex`] and jump summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonAnalyzer;

/// A parsed Python module.
#[derive(Debug, Clone)]
pub struct PythonDocument {
    pub index: ScopeIndex,
    pub jump: JumpInfo,
}

impl PythonAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageAnalyzer for PythonAnalyzer {
    type Document = PythonDocument;

    fn name(&self) -> &'static str {
        "python"
    }

    fn scopes(&self) -> &'static [&'static str] {
        SCOPES
    }

    fn parse(&self, code: &str, _scope: &str) -> Result<PythonDocument, ParseError> {
        let tree = parse_tree(code).map_err(|e| e.into_parse_error(code))?;
        if let Some(error) = syntax_errors(&tree, code).into_iter().next() {
            return Err(error.into_parse_error(code));
        }
        let root = tree.root_node();
        let index = ScopeIndex::build(root, code);
        let jump = collect_jump_info(root, code, &index);
        log::debug!(
            "parsed {} names in {} scopes",
            index.names.len(),
            index.scopes.len()
        );
        Ok(PythonDocument { index, jump })
    }

    fn find_references(&self, document: &PythonDocument, offset: u32) -> Vec<Occurrence> {
        find_references(&document.index, offset)
    }

    fn jump_info(&self, document: &PythonDocument) -> Result<JumpInfo, ParseError> {
        Ok(document.jump.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use language_core::{ByteRange, Jump, JumpOptions, Position};

    #[test]
    fn test_parse_error_is_located() {
        let error = PythonAnalyzer
            .parse("x = 1\ny = = 2\n", "source.python")
            .unwrap_err();
        assert_eq!(error.start.map(|p| p.row), Some(1));
    }

    #[test]
    fn test_notebook_magics() {
        let code = "%matplotlib inline\nimport os\nos.getcwd()\n";
        let document = PythonAnalyzer.parse(code, "source.python").unwrap();
        let offset = code.rfind("os").unwrap() as u32;
        assert_eq!(PythonAnalyzer.find_references(&document, offset).len(), 2);
    }

    #[test]
    fn test_jump_from_import() {
        let code = "from .models import User\n\nUser()\n";
        let context = PythonAnalyzer
            .create_jump_context(code, "source.python")
            .unwrap();
        let jump = context
            .build_jump(Position::new(2, 1), JumpOptions::default())
            .unwrap();
        assert_eq!(
            jump,
            Some(Jump::FromImport {
                module_name: ".models".into(),
                imported: "User".into(),
                binding: ByteRange::new(20, 24),
            })
        );
    }

    #[test]
    fn test_jump_to_local_binding() {
        let code = "total = 0\ntotal += 1\n";
        let context = PythonAnalyzer
            .create_jump_context(code, "source.python")
            .unwrap();
        let jump = context
            .build_jump(Position::new(1, 2), JumpOptions::default())
            .unwrap();
        assert_eq!(
            jump,
            Some(Jump::Binding {
                destination: Position::new(0, 2)
            })
        );
    }
}

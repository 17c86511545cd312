//! PHP analyzer implementation.

use crate::find_references::find_references;
use crate::index::SymbolIndex;
use crate::jump_context::collect_jump_info;
use crate::parse::{first_syntax_error, parse_tree};
use language_core::{JumpInfo, LanguageAnalyzer, Occurrence, ParseError};

const SCOPES: &[&str] = &["text.html.php", "source.php"];

/// Analyzer for PHP files using tree-sitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpAnalyzer;

/// A parsed PHP file.
#[derive(Debug, Clone)]
pub struct PhpDocument {
    pub index: SymbolIndex,
    pub jump: JumpInfo,
}

impl PhpAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageAnalyzer for PhpAnalyzer {
    type Document = PhpDocument;

    fn name(&self) -> &'static str {
        "php"
    }

    fn scopes(&self) -> &'static [&'static str] {
        SCOPES
    }

    fn parse(&self, code: &str, _scope: &str) -> Result<PhpDocument, ParseError> {
        let tree = parse_tree(code).map_err(|e| e.into_parse_error(code))?;
        if let Some(error) = first_syntax_error(&tree) {
            return Err(error.into_parse_error(code));
        }
        let root = tree.root_node();
        let index = SymbolIndex::build(root, code);
        let jump = collect_jump_info(root, code, &index);
        log::debug!(
            "parsed {} symbols in {} scopes",
            index.symbols.len(),
            index.scopes.len()
        );
        Ok(PhpDocument { index, jump })
    }

    fn find_references(&self, document: &PhpDocument, offset: u32) -> Vec<Occurrence> {
        find_references(&document.index, offset)
    }

    fn jump_info(&self, document: &PhpDocument) -> Result<JumpInfo, ParseError> {
        Ok(document.jump.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use language_core::{Jump, JumpOptions, Position};

    #[test]
    fn test_parse_error_is_located() {
        let error = PhpAnalyzer
            .parse("<?php\n$a = 1;\n$b = = 2;\n", "text.html.php")
            .unwrap_err();
        assert_eq!(error.start.map(|p| p.row), Some(2));
    }

    #[test]
    fn test_jump_from_use_clause() {
        let code = "<?php\nuse App\\Models\\User;\n\n$user = new User();\n";
        let context = PhpAnalyzer
            .create_jump_context(code, "text.html.php")
            .unwrap();
        let jump = context
            .build_jump(Position::new(3, 13), JumpOptions::default())
            .unwrap();
        let Some(Jump::FromImport {
            module_name,
            imported,
            binding,
        }) = jump
        else {
            panic!("expected an import jump, got {jump:?}");
        };
        assert_eq!(module_name, "App\\Models\\User");
        assert_eq!(imported, "User");
        assert_eq!(binding.slice(code), Some("User"));
    }

    #[test]
    fn test_jump_to_include() {
        let code = "<?php\nrequire 'lib/helpers.php';\n";
        let context = PhpAnalyzer
            .create_jump_context(code, "text.html.php")
            .unwrap();
        let jump = context
            .build_jump(Position::new(1, 12), JumpOptions::default())
            .unwrap();
        assert_eq!(
            jump.as_ref().and_then(Jump::module_name),
            Some("lib/helpers.php")
        );
    }

    #[test]
    fn test_jump_to_local_function() {
        let code = "<?php\nfunction helper() {}\nhelper();\n";
        let context = PhpAnalyzer
            .create_jump_context(code, "text.html.php")
            .unwrap();
        let jump = context
            .build_jump(Position::new(2, 2), JumpOptions::default())
            .unwrap();
        assert_eq!(
            jump,
            Some(Jump::Binding {
                destination: Position::new(1, 11)
            })
        );
    }
}

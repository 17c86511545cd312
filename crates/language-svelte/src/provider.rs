//! Svelte analyzer implementation.

use crate::component::analyze_component;
use language_core::{JumpInfo, LanguageAnalyzer, Occurrence, ParseError};
use language_javascript::{find_references, ProgramIndex};

const SCOPES: &[&str] = &["source.svelte"];

/// Analyzer for Svelte components.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvelteAnalyzer;

/// A parsed component, in component coordinates.
#[derive(Debug, Clone)]
pub struct SvelteDocument {
    pub index: ProgramIndex,
}

impl SvelteAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageAnalyzer for SvelteAnalyzer {
    type Document = SvelteDocument;

    fn name(&self) -> &'static str {
        "svelte"
    }

    fn scopes(&self) -> &'static [&'static str] {
        SCOPES
    }

    fn parse(&self, code: &str, _scope: &str) -> Result<SvelteDocument, ParseError> {
        let index = analyze_component(code).map_err(|e| e.into_parse_error(code))?;
        Ok(SvelteDocument { index })
    }

    fn find_references(&self, document: &SvelteDocument, offset: u32) -> Vec<Occurrence> {
        find_references(&document.index, offset)
    }

    fn jump_info(&self, document: &SvelteDocument) -> Result<JumpInfo, ParseError> {
        Ok(document.index.jump.clone())
    }
}

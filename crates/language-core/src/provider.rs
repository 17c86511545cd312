//! Core trait for language analyzers.

use crate::error::{ContextError, ParseError};
use crate::jump::{JumpContext, JumpInfo, ReferenceLookup};
use crate::types::Occurrence;

/// Core trait for language analyzers.
///
/// An analyzer parses source text of the scopes it supports into a
/// self-contained `Document`, answers reference queries against it and
/// extracts the import/export summary used for navigation.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`, and so must their documents, so
/// that jump contexts can be cached and shared between threads.
pub trait LanguageAnalyzer: Clone + Send + Sync + 'static {
    /// Parsed form of one source text.
    type Document: Send + Sync + 'static;

    /// Human-readable language name, used in logs.
    fn name(&self) -> &'static str;

    /// Editor scope identifiers handled by this analyzer.
    fn scopes(&self) -> &'static [&'static str];

    /// Check if this analyzer handles the given scope.
    fn supports_scope(&self, scope: &str) -> bool {
        self.scopes().contains(&scope)
    }

    /// Parse `code`, which was written in `scope`.
    fn parse(&self, code: &str, scope: &str) -> Result<Self::Document, ParseError>;

    /// All occurrences of the binding at `offset`, sorted by position.
    ///
    /// An offset that is not on a name yields an empty list.
    fn find_references(&self, document: &Self::Document, offset: u32) -> Vec<Occurrence>;

    /// Exports, imports and module paths of the document.
    fn jump_info(&self, document: &Self::Document) -> Result<JumpInfo, ParseError>;

    /// Parse `code` and summarize it for navigation.
    fn create_jump_context(&self, code: &str, scope: &str) -> Result<JumpContext, ContextError> {
        if !self.supports_scope(scope) {
            return Err(ContextError::UnsupportedScope(scope.to_string()));
        }
        let document = self.parse(code, scope)?;
        let info = self.jump_info(&document)?;
        log::debug!(
            "{} jump context: {} exports, {} imports, {} paths",
            self.name(),
            info.exports.len(),
            info.external_modules.len(),
            info.paths.len()
        );
        let lookup = AnalyzedDocument {
            analyzer: self.clone(),
            document,
        };
        Ok(JumpContext::new(code, info, Box::new(lookup)))
    }
}

/// A document together with the analyzer that produced it.
pub struct AnalyzedDocument<A: LanguageAnalyzer> {
    pub analyzer: A,
    pub document: A::Document,
}

impl<A: LanguageAnalyzer> ReferenceLookup for AnalyzedDocument<A> {
    fn find_references_at(&self, offset: u32) -> Vec<Occurrence> {
        self.analyzer.find_references(&self.document, offset)
    }
}

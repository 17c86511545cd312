//! Core traits and types shared by the reference analyzers.
//!
//! This crate provides the language-independent pieces of reference
//! resolution: offset/point conversion, occurrence ranges, parse errors,
//! the [`LanguageAnalyzer`] trait every language implements, and the jump
//! decision that turns a click into a navigation intent.

pub mod filesystem;
mod error;
mod jump;
mod locator;
mod provider;
mod types;

pub use error::{AnalysisError, AnalysisResult, ContextError, LocatorError, ParseError};
pub use jump::{
    build_jump, ExternalModule, ImportPath, Jump, JumpContext, JumpContextResult, JumpInfo,
    JumpOptions, ReferenceLookup, DEFAULT_EXPORT, NAMESPACE_IMPORT,
};
pub use locator::Locator;
pub use provider::{AnalyzedDocument, LanguageAnalyzer};
pub use types::{
    normalize_occurrences, ByteRange, Occurrence, OccurrenceKind, PointRange, Position,
    RenameHint,
};

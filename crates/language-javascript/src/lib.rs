//! JavaScript/JSX reference analysis using OXC.
//!
//! This crate implements [`LanguageAnalyzer`](language_core::LanguageAnalyzer)
//! for JavaScript, JSX and HTML documents hosting a script, using the OXC
//! parser and semantic analyzer.
//!
//! # Features
//!
//! - Find all occurrences of a binding (declaration, reads, writes, imports)
//! - Global aggregation for names without a local binding
//! - Import/export summaries for ES modules and CommonJS
//!
//! # Example
//!
//! ```no_run
//! use language_javascript::JavaScriptAnalyzer;
//! use language_core::LanguageAnalyzer;
//!
//! let analyzer = JavaScriptAnalyzer::new();
//! let document = analyzer.parse("const a = 1; a++", "source.js").unwrap();
//! let occurrences = analyzer.find_references(&document, 6);
//! assert_eq!(occurrences.len(), 2);
//! ```

mod error;
mod find_references;
mod jump_context;
mod oxc_adapter;
mod provider;
mod script;

pub use error::JsAnalysisError;
pub use find_references::{
    find_references, global_occurrences, identifier_at, occurrences_of_symbol,
};
pub use jump_context::collect_jump_info;
pub use oxc_adapter::{
    analyze_program, analyze_source, span_to_byte_range, DeclarationKind, Identifier,
    IdentifierRole, ProgramIndex, SymbolInfo,
};
pub use provider::{JavaScriptAnalyzer, JsDocument};
pub use script::extract_script;

pub use oxc::span::SourceType;

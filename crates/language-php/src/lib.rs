//! PHP reference analysis over tree-sitter.
//!
//! Variables resolve within their function (closures only see what they
//! capture with `use`), functions, classes and constants within their
//! namespace, and class members within the class body through `$this`,
//! `self` and `static`.
//!
//! # Example
//!
//! ```no_run
//! use language_core::LanguageAnalyzer;
//! use language_php::PhpAnalyzer;
//!
//! let code = "<?php\n$a = 1;\necho $a;\n";
//! let document = PhpAnalyzer.parse(code, "text.html.php").unwrap();
//! assert_eq!(PhpAnalyzer.find_references(&document, 7).len(), 2);
//! ```

mod error;
mod find_references;
mod index;
mod jump_context;
mod parse;
mod provider;

pub use error::{PhpError, PhpResult};
pub use find_references::find_references;
pub use index::{
    Binding, Scope, ScopeId, ScopeKind, Symbol, SymbolIndex, SymbolKind, SymbolRole, FILE_SCOPE,
};
pub use jump_context::collect_jump_info;
pub use parse::{first_syntax_error, parse_tree};
pub use provider::{PhpAnalyzer, PhpDocument};

//! Python reference analysis over tree-sitter.
//!
//! tree-sitter-python has no scope analysis, so this crate resolves
//! names by hand: `def`, `class`, `lambda` and comprehensions open
//! scopes, a name is local to the nearest enclosing scope that writes
//! it, and `global`/`nonlocal` opt out of that rule.
//!
//! # Example
//!
//! ```no_run
//! use language_core::LanguageAnalyzer;
//! use language_python::PythonAnalyzer;
//!
//! let code = "c = 1\ndef f():\n    c = 2\n    print(c)\n";
//! let document = PythonAnalyzer.parse(code, "source.python").unwrap();
//! // the inner `c` and its read
//! assert_eq!(PythonAnalyzer.find_references(&document, 19).len(), 2);
//! ```

mod error;
mod find_references;
mod jump_context;
mod parse;
mod provider;
mod scope;

pub use error::{PythonError, PythonResult};
pub use find_references::find_references;
pub use jump_context::collect_jump_info;
pub use parse::{parse_tree, syntax_errors};
pub use provider::{PythonAnalyzer, PythonDocument};
pub use scope::{Name, NameRole, Scope, ScopeId, ScopeIndex, ScopeKind, MODULE_SCOPE};

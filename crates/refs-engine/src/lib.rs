//! Find-references and go-to-definition over several languages.
//!
//! [`find_references`] dispatches a buffer to the analyzer registered for
//! its editor scope and returns the occurrences of the binding under the
//! cursor. [`Navigator`] follows a click across files: it resolves module
//! specifiers, keeps one [`JumpContext`](language_core::JumpContext) per
//! file in a [`JumpContextCache`] and walks re-export chains up to
//! [`MAX_JUMPS`] hops.
//!
//! ```no_run
//! use refs_engine::{LogWorkspace, NavigationConfig, Navigator};
//! use language_core::Position;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let navigator = Navigator::on_disk(NavigationConfig::default(), Arc::new(LogWorkspace));
//! let source = std::fs::read_to_string("src/main.js").unwrap();
//! let destination = navigator
//!     .definition(Path::new("src/main.js"), &source, Position::new(3, 10))
//!     .unwrap();
//! ```

pub mod cache;
pub mod config;
pub mod navigate;
pub mod registry;
pub mod resolver;
pub mod workspace;

pub use cache::JumpContextCache;
pub use config::NavigationConfig;
pub use navigate::{Destination, JumpSession, Navigator, MAX_JUMPS};
pub use registry::{
    create_jump_context, find_references, scope_for_path, supported_scopes, Language,
    ReferencesError, DEFAULT_SCOPE,
};
pub use resolver::{ModuleResolver, NodeModuleResolver, Resolution, SimpleModuleResolver};
pub use workspace::{LogWorkspace, RecordingWorkspace, Workspace};

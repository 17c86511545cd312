//! Svelte component reference analysis.
//!
//! A component is scanned into a single JavaScript program (see
//! [`scan_component`]) and analyzed with the JavaScript analyzer, so
//! names declared in either script resolve in the markup and the other
//! script alike.

mod component;
mod error;
mod program;
mod provider;
mod template;

pub use component::{alias_stores, analyze_component};
pub use error::SvelteError;
pub use program::SyntheticProgram;
pub use provider::{SvelteAnalyzer, SvelteDocument};
pub use template::{scan_component, Component};

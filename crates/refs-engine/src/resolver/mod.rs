//! Module specifier resolution.
//!
//! A specifier resolves to a URL (opened outside of the editor), to a
//! file, or to nothing. A file resolution may name a path that does not
//! exist yet: relative specifiers always produce their candidate so that
//! creating the missing file can be offered.

mod node;
mod simple;

pub use node::NodeModuleResolver;
pub use simple::SimpleModuleResolver;

use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Resolution {
    /// `None` when the module could not be located
    File { filename: Option<PathBuf> },
    Url { url: String },
}

impl Resolution {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Resolution::File {
            filename: Some(path.into()),
        }
    }

    pub fn not_found() -> Self {
        Resolution::File { filename: None }
    }
}

/// Resolves the module specifiers found in a file.
pub trait ModuleResolver: Send + Sync {
    fn resolve(&self, from_file: &Path, specifier: &str) -> Resolution;
}

pub fn is_url(specifier: &str) -> bool {
    specifier.starts_with("http://")
        || specifier.starts_with("https://")
        || specifier.starts_with("//")
}

pub(crate) fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier.starts_with('/')
}

/// How specifiers of a file are to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModuleSystem {
    Node,
    Python,
    Php,
}

impl ModuleSystem {
    pub(crate) fn of(from_file: &Path) -> Self {
        match from_file.extension().and_then(|ext| ext.to_str()) {
            Some("py") => ModuleSystem::Python,
            Some("php") => ModuleSystem::Php,
            _ => ModuleSystem::Node,
        }
    }
}

pub(crate) fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or(Path::new("/"))
}

//! Navigation settings.

use language_core::JumpOptions;
use serde::{Deserialize, Serialize};

/// Extensions tried when a module specifier names no existing file.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".svelte", ".jsx", ".vue", ".json", ".node"];

/// How go-to-definition behaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigationConfig {
    /// Stop at the import statement instead of leaving the file.
    pub jump_to_import: bool,

    /// Follow re-exports to the module that declares the binding.
    pub skip_intermediate: bool,

    /// Offer to create the target of a clicked path that does not exist.
    pub create_not_found: bool,

    pub extensions: Vec<String>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            jump_to_import: false,
            skip_intermediate: true,
            create_not_found: true,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl NavigationConfig {
    pub fn jump_options(&self) -> JumpOptions {
        JumpOptions {
            jump_to_import: self.jump_to_import,
        }
    }

    /// Parse a JSON settings object; missing keys keep their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

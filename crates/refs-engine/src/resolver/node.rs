//! Node-style resolution on the real disk through `oxc_resolver`.

use super::{is_relative, is_url, parent_dir, ModuleResolver, ModuleSystem, Resolution};
use super::SimpleModuleResolver;
use language_core::filesystem::{normalize, StdFileSystem};
use oxc_resolver::{ResolveOptions, Resolver};
use std::path::Path;
use std::sync::Arc;

/// Resolver for files on disk.
///
/// JavaScript-family specifiers go through `oxc_resolver` (package
/// `exports`, `module`/`main` fields, extension search); Python and PHP
/// files use the lookups of [`SimpleModuleResolver`].
pub struct NodeModuleResolver {
    resolver: Resolver,
    fallback: SimpleModuleResolver,
}

impl NodeModuleResolver {
    pub fn new(extensions: Vec<String>) -> Self {
        let options = ResolveOptions {
            extensions: extensions.clone(),
            main_fields: vec!["module".to_string(), "main".to_string()],
            condition_names: vec![
                "import".to_string(),
                "require".to_string(),
                "node".to_string(),
                "default".to_string(),
            ],
            ..Default::default()
        };
        Self {
            resolver: Resolver::new(options),
            fallback: SimpleModuleResolver::new(Arc::new(StdFileSystem), extensions),
        }
    }
}

impl std::fmt::Debug for NodeModuleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeModuleResolver").finish_non_exhaustive()
    }
}

impl ModuleResolver for NodeModuleResolver {
    fn resolve(&self, from_file: &Path, specifier: &str) -> Resolution {
        if is_url(specifier) {
            return Resolution::Url {
                url: specifier.to_string(),
            };
        }
        if ModuleSystem::of(from_file) != ModuleSystem::Node {
            return self.fallback.resolve(from_file, specifier);
        }

        let from_dir = parent_dir(from_file);
        match self.resolver.resolve(from_dir, specifier) {
            Ok(resolution) => Resolution::file(resolution.into_path_buf()),
            Err(err) => {
                log::debug!("cannot resolve '{specifier}' from {}: {err}", from_dir.display());
                if is_relative(specifier) {
                    Resolution::file(normalize(&from_dir.join(specifier)))
                } else {
                    Resolution::not_found()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EXTENSIONS;
    use std::fs;
    use tempfile::TempDir;

    fn resolver() -> NodeModuleResolver {
        NodeModuleResolver::new(DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect())
    }

    #[test]
    fn test_relative_with_extension_search() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::write(root.join("util.js"), "export const a = 1").unwrap();
        fs::write(root.join("main.js"), "import { a } from './util'").unwrap();

        let resolved = resolver().resolve(&root.join("main.js"), "./util");
        assert_eq!(resolved, Resolution::file(root.join("util.js")));
    }

    #[test]
    fn test_node_modules_package() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let package = root.join("node_modules").join("lib");
        fs::create_dir_all(&package).unwrap();
        fs::write(package.join("package.json"), r#"{"name": "lib", "main": "main.js"}"#).unwrap();
        fs::write(package.join("main.js"), "module.exports = 1").unwrap();
        fs::write(root.join("app.js"), "require('lib')").unwrap();

        let resolved = resolver().resolve(&root.join("app.js"), "lib");
        assert_eq!(resolved, Resolution::file(package.join("main.js")));
    }

    #[test]
    fn test_missing_modules() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let from = root.join("app.js");
        assert_eq!(
            resolver().resolve(&from, "./missing/file.js"),
            Resolution::file(root.join("missing").join("file.js"))
        );
        assert_eq!(resolver().resolve(&from, "not-installed"), Resolution::not_found());
    }

    #[test]
    fn test_python_files_use_python_lookup() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::write(root.join("models.py"), "class User: pass\n").unwrap();
        let resolved = resolver().resolve(&root.join("app.py"), ".models");
        assert_eq!(resolved, Resolution::file(root.join("models.py")));
    }
}

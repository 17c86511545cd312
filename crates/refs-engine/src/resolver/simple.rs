//! Resolution over any [`FileSystem`].

use super::{is_relative, is_url, parent_dir, ModuleResolver, ModuleSystem, Resolution};
use language_core::filesystem::{normalize, FileSystem};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A small resolver that only needs the [`FileSystem`] primitives, so it
/// runs against in-memory trees as well as the disk.
///
/// * JavaScript: relative paths with extension and `index` search, and
///   `node_modules` packages through their `module`/`main` field.
/// * Python: relative (`.models`, `..pkg.mod`) and dotted module names,
///   as `.py` files or package `__init__.py`.
/// * PHP: include paths relative to the including file, and namespaced
///   names (`App\Models\User`) as class files below an ancestor directory.
#[derive(Clone)]
pub struct SimpleModuleResolver {
    fs: Arc<dyn FileSystem>,
    extensions: Vec<String>,
}

impl std::fmt::Debug for SimpleModuleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleModuleResolver")
            .field("extensions", &self.extensions)
            .finish_non_exhaustive()
    }
}

impl SimpleModuleResolver {
    pub fn new(fs: Arc<dyn FileSystem>, extensions: Vec<String>) -> Self {
        Self { fs, extensions }
    }

    fn is_file(&self, path: &Path) -> bool {
        self.fs.exists(path) && !self.fs.is_dir(path)
    }

    /// `path` itself, with an extension appended, or as a directory with
    /// a package entry or `index` file.
    fn find_file(&self, path: &Path) -> Option<PathBuf> {
        if self.is_file(path) {
            return Some(path.to_path_buf());
        }
        if let Some(found) = self
            .extensions
            .iter()
            .map(|ext| with_suffix(path, ext))
            .find(|candidate| self.is_file(candidate))
        {
            return Some(found);
        }
        if !self.fs.is_dir(path) {
            return None;
        }
        if let Some(entry) = self.package_entry(path) {
            return Some(entry);
        }
        let index = path.join("index");
        self.extensions
            .iter()
            .map(|ext| with_suffix(&index, ext))
            .find(|candidate| self.is_file(candidate))
    }

    /// File named by the `module` or `main` field of `dir/package.json`.
    fn package_entry(&self, dir: &Path) -> Option<PathBuf> {
        let manifest = self.fs.read_to_string(&dir.join("package.json")).ok()?;
        let manifest: serde_json::Value = match serde_json::from_str(&manifest) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("ignoring invalid package.json in {}: {err}", dir.display());
                return None;
            }
        };
        let main = ["module", "main"]
            .iter()
            .find_map(|field| manifest.get(field).and_then(|v| v.as_str()))?;
        let entry = normalize(&dir.join(main));
        if entry == dir {
            return None;
        }
        self.find_file(&entry)
    }

    fn resolve_node(&self, from_dir: &Path, specifier: &str) -> Resolution {
        if is_relative(specifier) {
            let base = normalize(&from_dir.join(specifier));
            return Resolution::file(self.find_file(&base).unwrap_or(base));
        }

        let (package, subpath) = split_package(specifier);
        for dir in from_dir.ancestors() {
            let package_dir = dir.join("node_modules").join(package);
            if !self.fs.is_dir(&package_dir) {
                continue;
            }
            let target = match subpath {
                Some(subpath) => package_dir.join(subpath),
                None => package_dir,
            };
            if let Some(found) = self.find_file(&target) {
                return Resolution::file(found);
            }
        }
        Resolution::not_found()
    }

    fn resolve_python(&self, from_dir: &Path, specifier: &str) -> Resolution {
        let dots = specifier.chars().take_while(|c| *c == '.').count();
        let parts: Vec<&str> = specifier[dots..]
            .split('.')
            .filter(|part| !part.is_empty())
            .collect();

        if dots > 0 {
            // one dot is the current package, each further dot a parent
            let mut base = from_dir.to_path_buf();
            for _ in 1..dots {
                base.pop();
            }
            if parts.is_empty() {
                return Resolution::file(base.join("__init__.py"));
            }
            let module = parts.iter().fold(base, |path, part| path.join(part));
            let found = self.python_module(&module);
            return Resolution::file(found.unwrap_or_else(|| with_suffix(&module, ".py")));
        }

        if parts.is_empty() {
            return Resolution::not_found();
        }
        for dir in from_dir.ancestors() {
            let module = parts.iter().fold(dir.to_path_buf(), |path, part| path.join(part));
            if let Some(found) = self.python_module(&module) {
                return Resolution::file(found);
            }
        }
        Resolution::not_found()
    }

    fn python_module(&self, module: &Path) -> Option<PathBuf> {
        [with_suffix(module, ".py"), module.join("__init__.py")]
            .into_iter()
            .find(|candidate| self.is_file(candidate))
    }

    fn resolve_php(&self, from_dir: &Path, specifier: &str) -> Resolution {
        let is_class_name =
            specifier.contains('\\') || Path::new(specifier).extension().is_none();
        if !is_class_name {
            let path = normalize(&from_dir.join(specifier));
            if self.is_file(&path) {
                return Resolution::file(path);
            }
            // include_path style lookup from the project root
            let found = from_dir
                .ancestors()
                .skip(1)
                .map(|dir| normalize(&dir.join(specifier)))
                .find(|candidate| self.is_file(candidate));
            return Resolution::file(found.unwrap_or(path));
        }

        let segments: Vec<&str> = specifier
            .split('\\')
            .filter(|segment| !segment.is_empty())
            .collect();
        for dir in from_dir.ancestors() {
            // autoloaders map a namespace prefix to a directory, so try
            // dropping leading segments as well
            for skip in 0..segments.len() {
                if let Some(found) = self.php_class_file(dir, &segments[skip..]) {
                    return Resolution::file(found);
                }
            }
        }
        Resolution::not_found()
    }

    fn php_class_file(&self, dir: &Path, segments: &[&str]) -> Option<PathBuf> {
        let (first, rest) = segments.split_first()?;
        let lowered = first.to_ascii_lowercase();
        [first.to_string(), lowered]
            .into_iter()
            .map(|first| {
                let path = rest.iter().fold(dir.join(first), |path, part| path.join(part));
                with_suffix(&path, ".php")
            })
            .find(|candidate| self.is_file(candidate))
    }
}

impl ModuleResolver for SimpleModuleResolver {
    fn resolve(&self, from_file: &Path, specifier: &str) -> Resolution {
        if is_url(specifier) {
            return Resolution::Url {
                url: specifier.to_string(),
            };
        }
        let from_dir = parent_dir(from_file);
        let resolution = match ModuleSystem::of(from_file) {
            ModuleSystem::Node => self.resolve_node(from_dir, specifier),
            ModuleSystem::Python => self.resolve_python(from_dir, specifier),
            ModuleSystem::Php => self.resolve_php(from_dir, specifier),
        };
        log::debug!("'{specifier}' from {} -> {resolution:?}", from_file.display());
        resolution
    }
}

/// `@scope/pkg/sub/path` -> (`@scope/pkg`, `sub/path`)
fn split_package(specifier: &str) -> (&str, Option<&str>) {
    let name_segments = if specifier.starts_with('@') { 2 } else { 1 };
    let mut end = 0;
    for (i, segment) in specifier.split('/').take(name_segments).enumerate() {
        end += segment.len() + usize::from(i > 0);
    }
    let subpath = specifier.get(end + 1..).filter(|s| !s.is_empty());
    (&specifier[..end], subpath)
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

//! Jump contexts cached per file.

use crate::registry::create_jump_context;
use language_core::JumpContextResult;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

struct CacheEntry {
    hash: u64,
    context: Arc<JumpContextResult>,
}

/// Jump contexts keyed by path and validated against the content they
/// were built from.
///
/// A failed build (unsupported scope, parse error) is cached like a
/// context, so a broken file is not reparsed on every jump through it.
#[derive(Default)]
pub struct JumpContextCache {
    entries: RwLock<HashMap<PathBuf, CacheEntry>>,
}

impl JumpContextCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The context of `path` if it was built from `content`.
    pub fn get(&self, path: &Path, content: &str) -> Option<Arc<JumpContextResult>> {
        let entries = self.entries.read();
        let entry = entries.get(path)?;
        (entry.hash == hash_content(content)).then(|| Arc::clone(&entry.context))
    }

    /// Store the context built from `content`, replacing any previous one.
    pub fn set(
        &self,
        path: PathBuf,
        content: &str,
        context: JumpContextResult,
    ) -> Arc<JumpContextResult> {
        let context = Arc::new(context);
        self.entries.write().insert(
            path,
            CacheEntry {
                hash: hash_content(content),
                context: Arc::clone(&context),
            },
        );
        context
    }

    /// Drop the entry of `path` unless it was built from `content`.
    ///
    /// Returns whether an entry was dropped.
    pub fn invalidate(&self, path: &Path, content: &str) -> bool {
        let mut entries = self.entries.write();
        let stale = entries
            .get(path)
            .is_some_and(|entry| entry.hash != hash_content(content));
        if stale {
            log::debug!("invalidated {}", path.display());
            entries.remove(path);
        }
        stale
    }

    pub fn delete(&self, path: &Path) -> bool {
        self.entries.write().remove(path).is_some()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// The context of `path` for `content`, built with the analyzer of
    /// `scope` on a miss.
    pub fn get_or_create(&self, path: &Path, content: &str, scope: &str) -> Arc<JumpContextResult> {
        if let Some(context) = self.get(path, content) {
            log::debug!("jump context cache hit: {}", path.display());
            return context;
        }
        log::debug!("jump context cache miss: {}", path.display());
        self.set(path.to_path_buf(), content, create_jump_context(content, scope))
    }
}

impl std::fmt::Debug for JumpContextCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JumpContextCache")
            .field("len", &self.len())
            .finish()
    }
}

/// Content hash used to detect stale entries.
pub fn hash_content(content: &str) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use language_core::ContextError;

    #[test]
    fn test_get_requires_same_content() {
        let cache = JumpContextCache::new();
        let path = Path::new("/a.js");
        cache.get_or_create(path, "export const a = 1", "source.js");

        assert!(cache.get(path, "export const a = 1").is_some());
        assert!(cache.get(path, "export const a = 2").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_or_create_reuses_entries() {
        let cache = JumpContextCache::new();
        let path = Path::new("/a.js");
        let first = cache.get_or_create(path, "export const a = 1", "source.js");
        let second = cache.get_or_create(path, "export const a = 1", "source.js");
        assert!(Arc::ptr_eq(&first, &second));

        let third = cache.get_or_create(path, "export const b = 1", "source.js");
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failures_are_cached() {
        let cache = JumpContextCache::new();
        let context = cache.get_or_create(Path::new("/notes.txt"), "hello", "text.plain");
        assert!(matches!(
            context.as_ref(),
            Err(ContextError::UnsupportedScope(_))
        ));
        let context = cache.get_or_create(Path::new("/broken.js"), "const = ;", "source.js");
        assert!(matches!(context.as_ref(), Err(ContextError::Parse(_))));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_invalidate_delete_clear() {
        let cache = JumpContextCache::new();
        let a = Path::new("/a.py");
        let b = Path::new("/b.py");
        cache.get_or_create(a, "x = 1\n", "source.python");
        cache.get_or_create(b, "y = 1\n", "source.python");

        assert!(!cache.invalidate(a, "x = 1\n"));
        assert!(cache.invalidate(a, "x = 2\n"));
        assert!(!cache.invalidate(a, "x = 2\n"));
        assert_eq!(cache.len(), 1);

        assert!(cache.delete(b));
        assert!(!cache.delete(b));
        assert!(cache.is_empty());

        cache.get_or_create(a, "x = 1\n", "source.python");
        cache.clear();
        assert!(cache.is_empty());
    }
}

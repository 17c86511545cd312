//! Filesystem collaborator used by navigation.
//!
//! Navigation only needs three primitives: read a file, check that it
//! exists and canonicalize its path. [`StdFileSystem`] serves them from the
//! real disk; [`VfsFileSystem`] serves them from any `vfs` root, which is
//! how tests run navigation against an in-memory tree.
//!
//! # Example
//!
//! ```rust,ignore
//! use language_core::filesystem::{memory_fs, FileSystem, VfsFileSystem};
//! use std::io::Write;
//!
//! let root = memory_fs();
//! root.join("main.js")?.create_file()?.write_all(b"export const x = 1")?;
//! let fs = VfsFileSystem::new(root);
//! assert!(fs.exists("/main.js".as_ref()));
//! ```

use std::io::Read;
use std::path::{Component, Path, PathBuf};

// Re-export core vfs types
pub use vfs::{MemoryFS, PhysicalFS, VfsError, VfsPath, VfsResult};

/// Blocking filesystem primitives.
pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    fn exists(&self, path: &Path) -> bool;

    /// Canonical form of an existing path.
    fn real_path(&self, path: &Path) -> std::io::Result<PathBuf>;

    fn is_dir(&self, path: &Path) -> bool;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn real_path(&self, path: &Path) -> std::io::Result<PathBuf> {
        path.canonicalize()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// A filesystem rooted at a `vfs` path; absolute paths are taken relative
/// to that root.
#[derive(Clone)]
pub struct VfsFileSystem {
    root: VfsPath,
}

impl VfsFileSystem {
    pub fn new(root: VfsPath) -> Self {
        Self { root }
    }

    fn vfs_path(&self, path: &Path) -> std::io::Result<VfsPath> {
        let relative = normalize(path);
        let relative = relative.to_string_lossy();
        let relative = relative.trim_start_matches('/');
        if relative.is_empty() {
            return Ok(self.root.clone());
        }
        self.root.join(relative).map_err(to_io_error)
    }
}

impl std::fmt::Debug for VfsFileSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VfsFileSystem")
            .field("root", &"<VfsPath>")
            .finish()
    }
}

impl FileSystem for VfsFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        read_to_string(&self.vfs_path(path)?).map_err(to_io_error)
    }

    fn exists(&self, path: &Path) -> bool {
        self.vfs_path(path)
            .and_then(|p| p.exists().map_err(to_io_error))
            .unwrap_or(false)
    }

    fn real_path(&self, path: &Path) -> std::io::Result<PathBuf> {
        if !self.exists(path) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ));
        }
        Ok(normalize(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.vfs_path(path)
            .and_then(|p| p.is_dir().map_err(to_io_error))
            .unwrap_or(false)
    }
}

fn to_io_error(err: VfsError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}

/// Lexically resolve `.` and `..` components.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Read a file to string from a VfsPath.
pub fn read_to_string(path: &VfsPath) -> VfsResult<String> {
    let mut content = String::new();
    path.open_file()?.read_to_string(&mut content)?;
    Ok(content)
}

/// Create a VfsPath from a std::path::Path using PhysicalFS.
pub fn physical_path(path: &Path) -> VfsPath {
    PhysicalFS::new(path).into()
}

/// Create a VfsPath backed by an in-memory filesystem.
pub fn memory_fs() -> VfsPath {
    MemoryFS::new().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_physical_fs_read() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("test.txt"), "hello world").unwrap();

        let fs = VfsFileSystem::new(physical_path(dir.path()));
        assert_eq!(fs.read_to_string(Path::new("/test.txt")).unwrap(), "hello world");
        assert!(fs.exists(Path::new("test.txt")));
    }

    #[test]
    fn test_memory_fs_nested_paths() {
        let root = memory_fs();
        root.join("src").unwrap().create_dir().unwrap();
        root.join("src/main.js")
            .unwrap()
            .create_file()
            .unwrap()
            .write_all(b"const x = 1;")
            .unwrap();

        let fs = VfsFileSystem::new(root);
        let path = Path::new("/src/lib/../main.js");
        assert!(fs.exists(path));
        assert!(fs.is_dir(Path::new("/src")));
        assert_eq!(fs.real_path(path).unwrap(), PathBuf::from("/src/main.js"));
        assert_eq!(fs.read_to_string(path).unwrap(), "const x = 1;");
    }

    #[test]
    fn test_file_not_found() {
        let fs = VfsFileSystem::new(memory_fs());
        assert!(!fs.exists(Path::new("/nonexistent.txt")));
        assert!(fs.read_to_string(Path::new("/nonexistent.txt")).is_err());
        assert!(fs.real_path(Path::new("/nonexistent.txt")).is_err());
    }

    #[test]
    fn test_std_fs() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.js");
        std::fs::write(&file, "x").unwrap();
        assert!(StdFileSystem.exists(&file));
        assert!(!StdFileSystem.is_dir(&file));
        assert_eq!(StdFileSystem.read_to_string(&file).unwrap(), "x");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
    }
}

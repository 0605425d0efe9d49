//! Filesystem capability used by the guide core.
//!
//! Everything that reads templates, examples, sources or static assets goes
//! through [`FileSystem`], so the core can run against [`OsFileSystem`] in
//! the binary and [`MemoryFileSystem`] in tests.

use crate::error::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Read-only view of a filesystem
pub trait FileSystem: Send + Sync {
    /// Whether `path` exists. Errors other than "not found" are returned.
    fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Whether `path` is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a whole file
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Read a whole file as UTF-8
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{}: {}", path.display(), e),
            )
        })
    }

    /// Every regular file below `root`, recursively, in sorted order
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        match std::fs::metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

/// In-memory filesystem for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: BTreeMap<PathBuf, Vec<u8>>,
    broken: BTreeSet<PathBuf>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent directories implicitly
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl AsRef<[u8]>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Make every access to `path` fail with a permission error
    pub fn with_broken_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.broken.insert(path.into());
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl AsRef<[u8]>) {
        self.files.insert(path.into(), contents.as_ref().to_vec());
    }

    fn check(&self, path: &Path) -> io::Result<()> {
        if self.broken.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ));
        }
        Ok(())
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        self.check(path)?;
        Ok(self.files.contains_key(path) || self.is_dir(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files
            .keys()
            .any(|file| file != path && file.starts_with(path))
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.check(path)?;
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self
            .files
            .keys()
            .filter(|file| file.starts_with(root))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_os_exists() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();

        let fs = OsFileSystem;
        assert!(fs.exists(&dir.path().join("a.txt")).unwrap());
        assert!(!fs.exists(&dir.path().join("b.txt")).unwrap());
    }

    #[test]
    fn test_os_walk_files_sorted_and_recursive() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.html"), "b").unwrap();
        std::fs::write(dir.path().join("a.html"), "a").unwrap();
        std::fs::write(dir.path().join("nested/c.html"), "c").unwrap();

        let files = OsFileSystem.walk_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.html"),
                PathBuf::from("b.html"),
                PathBuf::from("nested/c.html"),
            ]
        );
    }

    #[test]
    fn test_memory_read_and_dirs() {
        let fs = MemoryFileSystem::new().with_file("/t/layout.html", "{{ content }}");

        assert!(fs.exists(Path::new("/t/layout.html")).unwrap());
        assert!(fs.exists(Path::new("/t")).unwrap());
        assert!(fs.is_dir(Path::new("/t")));
        assert!(!fs.is_dir(Path::new("/t/layout.html")));
        assert_eq!(
            fs.read_to_string(Path::new("/t/layout.html")).unwrap(),
            "{{ content }}"
        );
        assert!(fs.read(Path::new("/t/missing.html")).is_err());
    }

    #[test]
    fn test_memory_broken_path() {
        let fs = MemoryFileSystem::new().with_broken_path("/locked/x");
        let err = fs.exists(Path::new("/locked/x")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_memory_walk_files() {
        let fs = MemoryFileSystem::new()
            .with_file("/ex/2.1.html", "a")
            .with_file("/ex/deep/1.1.html", "b")
            .with_file("/other/x.html", "c");

        let files = fs.walk_files(Path::new("/ex")).unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from("/ex/2.1.html"), PathBuf::from("/ex/deep/1.1.html")]
        );
    }
}

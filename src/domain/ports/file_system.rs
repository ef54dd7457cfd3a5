//! FileSystem port - abstraction over file I/O operations
//!
//! The pipeline performs every read, write, copy and directory operation
//! through this trait so scaffolding can be exercised against an in-memory
//! implementation.

use std::path::{Path, PathBuf};

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// I/O error
    Io(std::io::Error),
    /// Other error
    Other(String),
}

impl FsError {
    /// Classify an I/O error, keeping the path it happened at.
    pub fn at(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io(err),
        }
    }
}

impl From<std::io::Error> for FsError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(PathBuf::new()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(PathBuf::new()),
            _ => FsError::Io(err),
        }
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            FsError::Io(err) => write!(f, "I/O error: {}", err),
            FsError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FsError {}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O with atomic writes
/// - `MockFileSystem` - in-memory for testing
pub trait FileSystem {
    /// Read file content as string
    fn read(&self, path: &Path) -> FsResult<String>;

    /// Read raw file content
    fn read_bytes(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Write content to file atomically
    fn write(&self, path: &Path, content: &str) -> FsResult<()>;

    /// Copy a single file, returning the bytes copied
    fn copy(&self, from: &Path, to: &Path) -> FsResult<u64>;

    /// Copy every file below `from` into `to`, keeping relative paths
    fn copy_tree(&self, from: &Path, to: &Path) -> FsResult<Vec<PathBuf>>;

    /// Check if a file or directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Remove a directory and everything below it
    fn remove_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Remove a single file
    fn remove_file(&self, path: &Path) -> FsResult<()>;

    /// Files directly inside `dir`, sorted by path
    fn list_files(&self, dir: &Path) -> FsResult<Vec<PathBuf>>;
}

/// Mock file system for testing
///
/// Uses `Arc<Mutex<>>` internally so it can be cloned and shared.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockFileSystem {
    pub files: std::sync::Arc<std::sync::Mutex<std::collections::BTreeMap<PathBuf, Vec<u8>>>>,
    pub dirs: std::sync::Arc<std::sync::Mutex<std::collections::BTreeSet<PathBuf>>>,
    denied: Vec<PathBuf>,
}

#[cfg(test)]
impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every mutation at or below `prefix` with PermissionDenied.
    pub fn deny_under(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.denied.push(prefix.into());
        self
    }

    /// Seed a file.
    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.as_bytes().to_vec());
        self
    }

    /// Seed a file with raw bytes.
    pub fn with_bytes(self, path: impl Into<PathBuf>, content: &[u8]) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.to_vec());
        self
    }

    /// Raw content of a file, if present
    pub fn bytes(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }

    /// Content of a file as text, if present
    pub fn content(&self, path: &Path) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    fn check_allowed(&self, path: &Path) -> FsResult<()> {
        if self.denied.iter().any(|d| path.starts_with(d)) {
            return Err(FsError::PermissionDenied(path.to_path_buf()));
        }
        Ok(())
    }
}

#[cfg(test)]
impl FileSystem for MockFileSystem {
    fn read(&self, path: &Path) -> FsResult<String> {
        self.read_bytes(path)
            .map(|b| String::from_utf8_lossy(&b).into_owned())
    }

    fn read_bytes(&self, path: &Path) -> FsResult<Vec<u8>> {
        let files = self.files.lock().unwrap();
        files
            .get(path)
            .cloned()
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        self.check_allowed(path)?;
        let mut files = self.files.lock().unwrap();
        files.insert(path.to_path_buf(), content.as_bytes().to_vec());
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<u64> {
        self.check_allowed(to)?;
        let bytes = self.read_bytes(from)?;
        let len = bytes.len() as u64;
        self.files.lock().unwrap().insert(to.to_path_buf(), bytes);
        Ok(len)
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> FsResult<Vec<PathBuf>> {
        self.check_allowed(to)?;
        let sources: Vec<(PathBuf, Vec<u8>)> = self
            .files
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p.starts_with(from))
            .map(|(p, b)| (p.clone(), b.clone()))
            .collect();
        let mut copied = Vec::new();
        let mut files = self.files.lock().unwrap();
        for (path, bytes) in sources {
            if let Ok(rel) = path.strip_prefix(from) {
                let dest = to.join(rel);
                files.insert(dest.clone(), bytes);
                copied.push(dest);
            }
        }
        Ok(copied)
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path) || self.dirs.lock().unwrap().contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        self.check_allowed(path)?;
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> FsResult<()> {
        self.check_allowed(path)?;
        self.files.lock().unwrap().retain(|p, _| !p.starts_with(path));
        self.dirs.lock().unwrap().retain(|p| !p.starts_with(path));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> FsResult<()> {
        self.check_allowed(path)?;
        self.files
            .lock()
            .unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn list_files(&self, dir: &Path) -> FsResult<Vec<PathBuf>> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect())
    }
}

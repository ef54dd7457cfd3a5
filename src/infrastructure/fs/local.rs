//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Local file system implementation
///
/// Writes go through a temp file in the target directory and are renamed
/// into place, so a file is either fully written or untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| FsError::at(path, e))
    }

    fn read_bytes(&self, path: &Path) -> FsResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| FsError::at(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| FsError::at(parent, e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| FsError::at(parent, e))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| FsError::at(path, e))?;
        tmp.persist(path)
            .map_err(|e| FsError::at(path, e.error))?;
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<u64> {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent).map_err(|e| FsError::at(parent, e))?;
        }
        std::fs::copy(from, to).map_err(|e| FsError::at(from, e))
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> FsResult<Vec<PathBuf>> {
        let mut copied = Vec::new();
        for entry in WalkDir::new(from).sort_by_file_name() {
            let entry = entry.map_err(|e| FsError::Other(e.to_string()))?;
            let rel = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| FsError::Other(e.to_string()))?;
            let dest = to.join(rel);
            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest).map_err(|e| FsError::at(&dest, e))?;
            } else if entry.file_type().is_file() {
                self.copy(entry.path(), &dest)?;
                copied.push(dest);
            }
        }
        Ok(copied)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        std::fs::create_dir_all(path).map_err(|e| FsError::at(path, e))
    }

    fn remove_dir_all(&self, path: &Path) -> FsResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| FsError::at(path, e))
    }

    fn remove_file(&self, path: &Path) -> FsResult<()> {
        std::fs::remove_file(path).map_err(|e| FsError::at(path, e))
    }

    fn list_files(&self, dir: &Path) -> FsResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(|e| FsError::at(dir, e))? {
            let entry = entry.map_err(|e| FsError::at(dir, e))?;
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn local_fs_write_and_read() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("test.txt");
        let fs = LocalFs::new();

        fs.write(&file, "hello world").unwrap();
        let content = fs.read(&file).unwrap();

        assert_eq!(content, "hello world");
    }

    #[test]
    fn local_fs_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nested").join("dir").join("test.txt");
        let fs = LocalFs::new();

        fs.write(&file, "content").unwrap();

        assert!(file.exists());
    }

    #[test]
    fn local_fs_write_overwrites() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("CMakeLists.txt");
        let fs = LocalFs::new();

        fs.write(&file, "Original").unwrap();
        fs.write(&file, "Replaced").unwrap();

        assert_eq!(fs.read(&file).unwrap(), "Replaced");
    }

    #[test]
    fn local_fs_read_missing_reports_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.h");
        let err = LocalFs::new().read(&missing).unwrap_err();
        assert!(err.to_string().contains("missing.h"));
    }

    #[test]
    fn local_fs_copy_tree_keeps_relative_paths() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("Example01");
        std::fs::create_dir_all(src.join("cpp")).unwrap();
        std::fs::write(src.join("Example01.h"), "h").unwrap();
        std::fs::write(src.join("cpp/Example01.cpp"), "c").unwrap();

        let dest = dir.path().join("copy");
        let copied = LocalFs::new().copy_tree(&src, &dest).unwrap();

        assert_eq!(copied.len(), 2);
        assert_eq!(std::fs::read_to_string(dest.join("cpp/Example01.cpp")).unwrap(), "c");
    }

    #[test]
    fn local_fs_list_files_is_sorted_and_skips_dirs() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.so"), "").unwrap();
        std::fs::write(dir.path().join("a.pyd"), "").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let files = LocalFs::new().list_files(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.pyd"), dir.path().join("b.so")]
        );
    }

    #[test]
    fn local_fs_copy_keeps_non_utf8_bytes() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("Example01.h");
        let to = dir.path().join("copy").join("Example01.h");
        let bytes = b"// caf\xe9\nint add(int a, int b);\n";
        std::fs::write(&from, bytes).unwrap();
        let fs = LocalFs::new();

        assert_eq!(fs.copy(&from, &to).unwrap(), bytes.len() as u64);
        assert_eq!(fs.read_bytes(&to).unwrap(), bytes.to_vec());
        assert!(fs.read(&to).is_err());
    }

    #[test]
    fn local_fs_remove_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("__init__.py");
        let fs = LocalFs::new();

        fs.write(&file, "x").unwrap();
        fs.remove_file(&file).unwrap();

        assert!(!fs.exists(&file));
        assert!(fs.remove_file(&file).is_err());
    }

    #[test]
    fn local_fs_remove_dir_all() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("build").join("src");
        let fs = LocalFs::new();

        fs.create_dir_all(&nested).unwrap();
        fs.remove_dir_all(&dir.path().join("build")).unwrap();

        assert!(!fs.exists(&nested));
    }
}

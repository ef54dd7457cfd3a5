//! WrittenFile entity - a file produced by the scaffold stage
//!
//! Carries the path and a hash of what was written, so reports and the
//! verify stage can refer to exact content.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::value_objects::ContentHash;

/// A file the pipeline wrote to disk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrittenFile {
    path: PathBuf,
    hash: ContentHash,
    len: usize,
}

impl WrittenFile {
    /// Record text content written at `path`
    pub fn new(path: impl Into<PathBuf>, content: &str) -> Self {
        Self::from_bytes(path, content.as_bytes())
    }

    /// Record binary content (copied headers, artifacts)
    pub fn from_bytes(path: impl Into<PathBuf>, content: &[u8]) -> Self {
        Self {
            path: path.into(),
            hash: ContentHash::from_bytes(content),
            len: content.len(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    /// Content length in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_hash_and_length() {
        let file = WrittenFile::new("build/CMakeLists.txt", "project(x)\n");
        assert_eq!(file.path(), Path::new("build/CMakeLists.txt"));
        assert_eq!(file.len(), 11);
        assert_eq!(file.hash(), &ContentHash::from_content("project(x)\n"));
        assert!(!file.is_empty());
    }
}

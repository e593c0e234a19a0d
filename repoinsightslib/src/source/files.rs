//! File-system access for the collectors that look at file contents.

use std::path::{Path, PathBuf};

use crate::error::InsightsError;
use crate::Result;

/// Reads repository files by repository-relative path.
pub trait FileReader {
    /// Return the full text content of `path`.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Whether `path` exists. The default tries to read it.
    fn exists(&self, path: &Path) -> bool {
        self.read_to_string(path).is_ok()
    }
}

impl<T: FileReader + ?Sized> FileReader for &T {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        (**self).read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}

/// Reads files from disk relative to a work tree root.
#[derive(Debug, Clone)]
pub struct FsReader {
    root: PathBuf,
}

impl FsReader {
    /// Create a reader for files below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileReader for FsReader {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let full = self.root.join(path);
        std::fs::read_to_string(&full).map_err(|source| InsightsError::FileRead {
            path: path.to_path_buf(),
            source,
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.root.join(path).is_file()
    }
}

/// Line count as the report defines it: the number of `\n`-separated
/// segments, so a trailing newline contributes one empty segment.
pub fn line_count(content: &str) -> u64 {
    content.split('\n').count() as u64
}

/// Character count in Unicode scalar values.
pub fn char_count(content: &str) -> u64 {
    content.chars().count() as u64
}

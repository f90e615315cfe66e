//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Metadata about a file
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub size: u64,
    pub file_type: FileType,
}

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

impl FileMetadata {
    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }

    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    pub fn len(&self) -> u64 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// Controls which files a recursive walk yields
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Maximum directory depth below the root (`None` walks everything)
    pub max_depth: Option<usize>,
    /// Skip files matched by .gitignore / .ignore rules
    pub respect_gitignore: bool,
    /// Directory names that are never descended into
    pub excluded_dirs: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            respect_gitignore: false,
            excluded_dirs: vec![".git".to_string()],
        }
    }
}

impl WalkOptions {
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == name)
    }
}

/// An entry a walk could not visit
#[derive(Debug)]
pub struct WalkError {
    /// The unreadable entry, or the walk root when the walker names none
    pub path: PathBuf,
    pub error: anyhow::Error,
}

impl WalkError {
    pub fn new(path: impl Into<PathBuf>, error: anyhow::Error) -> Self {
        Self {
            path: path.into(),
            error,
        }
    }
}

/// Abstraction over file system operations for testability
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Get file/directory metadata
    fn metadata(&self, path: &Path) -> Result<FileMetadata>;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Recursively list every file under `root`, sorted by path.
    ///
    /// The outer error means the walk could not start. Inner errors are
    /// entries that could not be visited; the walk carries on past them.
    fn walk_files(
        &self,
        root: &Path,
        options: &WalkOptions,
    ) -> Result<Vec<Result<PathBuf, WalkError>>>;
}

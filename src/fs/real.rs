use super::{FileMetadata, FileSystem, FileType, WalkError, WalkOptions};
use anyhow::{Context, Result};
use ignore::{overrides::OverrideBuilder, WalkBuilder};
use std::fs;
use std::path::{Path, PathBuf};

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn metadata(&self, path: &Path) -> Result<FileMetadata> {
        let meta = fs::metadata(path).context(format!("Failed to get metadata for {:?}", path))?;

        let file_type = if meta.is_file() {
            FileType::File
        } else if meta.is_dir() {
            FileType::Directory
        } else {
            FileType::Symlink
        };

        Ok(FileMetadata {
            size: meta.len(),
            file_type,
        })
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context(format!("Failed to read file {:?}", path))
    }

    fn walk_files(
        &self,
        root: &Path,
        options: &WalkOptions,
    ) -> Result<Vec<Result<PathBuf, WalkError>>> {
        let mut override_builder = OverrideBuilder::new(root);
        for excluded in &options.excluded_dirs {
            override_builder
                .add(&format!("!{}/", excluded))
                .context(format!("Invalid excluded directory pattern {:?}", excluded))?;
        }
        let overrides = override_builder
            .build()
            .context("Failed to build walk overrides")?;

        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(options.respect_gitignore)
            .hidden(false)
            .require_git(false)
            .max_depth(options.max_depth)
            .overrides(overrides)
            .sort_by_file_name(|a, b| a.cmp(b));

        let mut files = Vec::new();
        for result in builder.build() {
            match result {
                Ok(entry) => {
                    if entry.path().is_file() {
                        files.push(Ok(entry.into_path()));
                    }
                }
                Err(err) => {
                    let path = error_path(&err).unwrap_or(root).to_path_buf();
                    files.push(Err(WalkError::new(
                        path,
                        anyhow::Error::new(err).context("Failed to read directory entry"),
                    )));
                }
            }
        }

        Ok(files)
    }
}

/// The path a walker error is about, looking through depth and line wrappers
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path),
        ignore::Error::Loop { child, .. } => Some(child),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Partial(errs) => errs.iter().find_map(error_path),
        _ => None,
    }
}

//! Repository scanner
//!
//! Walks a repository, hands each recognized file to its handler and folds
//! the findings into one [`DiscoveryMap`]. Every scan starts from an empty
//! map and returns it by value inside a [`ScanReport`].

use crate::config::ConfigError;
use crate::discovery::{DiscoveryMap, ServiceCategory};
use crate::error::ScanError;
use crate::fs::{FileSystem, RealFileSystem, WalkOptions};
use crate::handlers::{FileHandler, HandlerRegistry};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub walk: WalkOptions,
    /// Larger files are counted as visited but not parsed
    pub max_file_size: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            walk: WalkOptions::default(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Outcome of scanning one repository
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub root: PathBuf,
    pub discovery: DiscoveryMap,
    pub files_visited: usize,
    pub files_parsed: usize,
    pub errors: Vec<ScanError>,
    pub scan_time_ms: u64,
}

impl ScanReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub struct RepositoryScanner {
    fs: Arc<dyn FileSystem>,
    registry: Arc<HandlerRegistry>,
    config: ScanConfig,
}

impl RepositoryScanner {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self::with_registry(fs, Arc::new(HandlerRegistry::with_defaults()))
    }

    /// Scanner over the real filesystem with the default handlers
    pub fn local() -> Self {
        Self::new(Arc::new(RealFileSystem::new()))
    }

    pub fn with_registry(fs: Arc<dyn FileSystem>, registry: Arc<HandlerRegistry>) -> Self {
        Self {
            fs,
            registry,
            config: ScanConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    /// Checks that `root` can be scanned at all
    pub fn check_root(&self, root: &Path) -> Result<(), ConfigError> {
        if !self.fs.exists(root) {
            return Err(ConfigError::PathNotFound(root.to_path_buf()));
        }
        if !self.fs.is_dir(root) {
            return Err(ConfigError::NotADirectory(root.to_path_buf()));
        }
        Ok(())
    }

    /// Scans `root` and returns everything detected under it.
    ///
    /// Unreadable or malformed files do not stop the scan; they end up in
    /// [`ScanReport::errors`].
    pub fn scan(&self, root: &Path) -> Result<ScanReport, ConfigError> {
        self.check_root(root)?;
        let start = Instant::now();

        info!(
            root = %root.display(),
            max_depth = ?self.config.walk.max_depth,
            respect_gitignore = self.config.walk.respect_gitignore,
            "Starting repository scan"
        );

        let mut discovery = DiscoveryMap::new();
        let mut errors = Vec::new();
        let mut files_visited = 0;
        let mut files_parsed = 0;

        let entries = match self.fs.walk_files(root, &self.config.walk) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(root = %root.display(), error = %err, "Failed to walk repository");
                errors.push(ScanError::file_access(root, &err));
                Vec::new()
            }
        };

        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(err) => {
                    warn!(path = %err.path.display(), error = %err.error, "Failed to read directory entry");
                    errors.push(ScanError::file_access(err.path, &err.error));
                    continue;
                }
            };

            files_visited += 1;
            // Any file at all counts as static content
            discovery.mark_enabled(ServiceCategory::StaticContent);

            let Some(handler) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|name| self.registry.select(name))
            else {
                continue;
            };

            match self.parse_file(handler, &path) {
                Ok(Some(findings)) => {
                    files_parsed += 1;
                    discovery.merge(findings);
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Skipping file");
                    errors.push(err);
                }
            }
        }

        let scan_time_ms = start.elapsed().as_millis() as u64;

        info!(
            root = %root.display(),
            files_visited,
            files_parsed,
            categories = discovery.len(),
            errors = errors.len(),
            scan_time_ms,
            "Repository scan completed"
        );

        Ok(ScanReport {
            root: root.to_path_buf(),
            discovery,
            files_visited,
            files_parsed,
            errors,
            scan_time_ms,
        })
    }

    /// `Ok(None)` means the file was deliberately left unparsed
    fn parse_file(
        &self,
        handler: &dyn FileHandler,
        path: &Path,
    ) -> Result<Option<DiscoveryMap>, ScanError> {
        let metadata = self
            .fs
            .metadata(path)
            .map_err(|e| ScanError::file_access(path, &e))?;
        if metadata.len() > self.config.max_file_size {
            debug!(
                path = %path.display(),
                size = metadata.len(),
                max_file_size = self.config.max_file_size,
                "File too large, not parsing"
            );
            return Ok(None);
        }

        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| ScanError::file_access(path, &e))?;

        debug!(path = %path.display(), handler = %handler.kind(), "Parsing file");
        handler.parse(path, &content).map(Some)
    }
}

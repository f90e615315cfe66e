//! Recoverable, per-file scan errors
//!
//! None of these abort a scan. The scanner logs them, records them on the
//! [`ScanReport`](crate::scanner::ScanReport) and moves on to the next file.

use crate::handlers::HandlerKind;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum ScanError {
    /// A path could not be read. Its contents were skipped.
    #[error("Failed to access {path}: {message}")]
    FileAccess { path: PathBuf, message: String },

    /// A recognized file was malformed. Its findings were dropped.
    #[error("Failed to parse {path} as {kind}: {message}")]
    Parse {
        path: PathBuf,
        kind: HandlerKind,
        message: String,
    },
}

impl ScanError {
    pub fn file_access(path: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        ScanError::FileAccess {
            path: path.into(),
            message: format!("{:#}", err),
        }
    }

    pub fn parse(path: impl Into<PathBuf>, kind: HandlerKind, message: impl Into<String>) -> Self {
        ScanError::Parse {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            ScanError::FileAccess { path, .. } | ScanError::Parse { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_access_display() {
        let err = ScanError::file_access("/repo/app.py", &anyhow::anyhow!("Permission denied"));
        assert_eq!(
            err.to_string(),
            "Failed to access /repo/app.py: Permission denied"
        );
    }

    #[test]
    fn test_parse_display_names_handler() {
        let err = ScanError::parse("/repo/package.json", HandlerKind::PackageManifest, "EOF");
        assert_eq!(
            err.to_string(),
            "Failed to parse /repo/package.json as package manifest: EOF"
        );
        assert_eq!(err.path(), &PathBuf::from("/repo/package.json"));
    }
}

//! Repository fetching
//!
//! A thin clone-if-absent wrapper around the `git` binary. An existing
//! directory is trusted as-is; it is never pulled or re-cloned.

use std::io;
use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to launch git: {0}")]
    Launch(#[source] io::Error),

    #[error("git clone of {url} exited with {}", describe_exit(.code))]
    GitFailed { url: String, code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "a signal".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Cloned,
    /// Target already existed, nothing was run
    Skipped,
}

/// Clones `url` into `dir` unless `dir` already exists.
pub fn clone_if_absent(url: &str, dir: &Path) -> Result<FetchOutcome, FetchError> {
    clone_with(Path::new("git"), url, dir)
}

fn clone_with(git: &Path, url: &str, dir: &Path) -> Result<FetchOutcome, FetchError> {
    if dir.exists() {
        debug!(dir = %dir.display(), "Clone target exists, skipping");
        return Ok(FetchOutcome::Skipped);
    }

    info!(url, dir = %dir.display(), "Cloning repository");
    let status = Command::new(git)
        .arg("clone")
        .arg("--quiet")
        .arg(url)
        .arg(dir)
        .status()
        .map_err(FetchError::Launch)?;

    if !status.success() {
        return Err(FetchError::GitFailed {
            url: url.to_string(),
            code: status.code(),
        });
    }

    info!(dir = %dir.display(), "Cloned repository");
    Ok(FetchOutcome::Cloned)
}

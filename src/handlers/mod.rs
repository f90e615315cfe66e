//! File handlers
//!
//! Each handler understands one kind of file. It declares which file names
//! it accepts through [`FileMatcher`]s and turns the file's text into a
//! partial [`DiscoveryMap`]. Handlers never see each other's findings; the
//! scanner merges them.

use crate::discovery::DiscoveryMap;
use crate::error::ScanError;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// How a handler recognizes the files it wants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMatcher {
    /// File name equals the string exactly
    Exact(&'static str),
    /// File name equals the string, ignoring ASCII case
    ExactIgnoreCase(&'static str),
    /// File name ends with the string
    Suffix(&'static str),
}

impl FileMatcher {
    pub fn matches(&self, file_name: &str) -> bool {
        match self {
            FileMatcher::Exact(name) => file_name == *name,
            FileMatcher::ExactIgnoreCase(name) => file_name.eq_ignore_ascii_case(name),
            FileMatcher::Suffix(suffix) => file_name.ends_with(suffix),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerKind {
    Dockerfile,
    Compose,
    LoadBalancerConfig,
    PackageManifest,
    DependencyList,
    PythonSource,
    JavaScriptSource,
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandlerKind::Dockerfile => "Dockerfile",
            HandlerKind::Compose => "compose file",
            HandlerKind::LoadBalancerConfig => "load-balancer config",
            HandlerKind::PackageManifest => "package manifest",
            HandlerKind::DependencyList => "dependency list",
            HandlerKind::PythonSource => "Python source",
            HandlerKind::JavaScriptSource => "JavaScript source",
        };
        f.write_str(name)
    }
}

/// Parser for one kind of file
pub trait FileHandler: Send + Sync {
    fn kind(&self) -> HandlerKind;

    /// File name patterns this handler accepts
    fn matchers(&self) -> &[FileMatcher];

    /// Extract findings from the file's text
    fn parse(&self, path: &Path, content: &str) -> Result<DiscoveryMap, ScanError>;

    fn accepts(&self, file_name: &str) -> bool {
        self.matchers().iter().any(|m| m.matches(file_name))
    }
}

pub mod compose;
pub mod dockerfile;
pub mod load_balancer;
pub mod package_manifest;
pub mod registry;
pub mod requirements;
pub mod source;

pub use compose::ComposeHandler;
pub use dockerfile::DockerfileHandler;
pub use load_balancer::LoadBalancerConfigHandler;
pub use package_manifest::PackageManifestHandler;
pub use registry::HandlerRegistry;
pub use requirements::DependencyListHandler;
pub use source::SourceHandler;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matcher_is_case_sensitive() {
        let matcher = FileMatcher::Exact("Dockerfile");
        assert!(matcher.matches("Dockerfile"));
        assert!(!matcher.matches("dockerfile"));
        assert!(!matcher.matches("Dockerfile.dev"));
    }

    #[test]
    fn test_exact_ignore_case_matcher() {
        let matcher = FileMatcher::ExactIgnoreCase("package.json");
        assert!(matcher.matches("package.json"));
        assert!(matcher.matches("Package.JSON"));
        assert!(!matcher.matches("package.json5"));
    }

    #[test]
    fn test_suffix_matcher() {
        let matcher = FileMatcher::Suffix(".py");
        assert!(matcher.matches("worker.py"));
        assert!(!matcher.matches("worker.pyc"));
    }

    #[test]
    fn test_handler_kind_display() {
        assert_eq!(HandlerKind::LoadBalancerConfig.to_string(), "load-balancer config");
        assert_eq!(HandlerKind::DependencyList.to_string(), "dependency list");
    }
}

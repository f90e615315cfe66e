//! File handler registry

use super::{FileHandler, FileMatcher, HandlerKind};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of file handlers, keyed by the matchers they declare
#[derive(Clone)]
pub struct HandlerRegistry {
    handlers: Vec<Arc<dyn FileHandler>>,
    exact_index: HashMap<String, usize>,
    case_insensitive_index: HashMap<String, usize>,
    suffixes: Vec<(&'static str, usize)>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            exact_index: HashMap::new(),
            case_insensitive_index: HashMap::new(),
            suffixes: Vec::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(super::DockerfileHandler));
        registry.register(Arc::new(super::PackageManifestHandler));
        registry.register(Arc::new(super::DependencyListHandler));
        registry.register(Arc::new(super::SourceHandler::python()));
        registry.register(Arc::new(super::LoadBalancerConfigHandler));
        registry.register(Arc::new(super::ComposeHandler));
        registry.register(Arc::new(super::SourceHandler::javascript()));
        registry
    }

    /// Adds a handler. A name claimed by an earlier handler stays with it.
    pub fn register(&mut self, handler: Arc<dyn FileHandler>) {
        let idx = self.handlers.len();

        for matcher in handler.matchers() {
            match *matcher {
                FileMatcher::Exact(name) => {
                    self.exact_index.entry(name.to_string()).or_insert(idx);
                }
                FileMatcher::ExactIgnoreCase(name) => {
                    self.case_insensitive_index
                        .entry(name.to_ascii_lowercase())
                        .or_insert(idx);
                }
                FileMatcher::Suffix(suffix) => self.suffixes.push((suffix, idx)),
            }
        }

        self.handlers.push(handler);
    }

    /// Handler responsible for `file_name`, if any.
    ///
    /// Exact names are checked before case-insensitive names, and those
    /// before suffixes; suffixes are tried in registration order.
    pub fn select(&self, file_name: &str) -> Option<&dyn FileHandler> {
        let idx = self
            .exact_index
            .get(file_name)
            .or_else(|| {
                self.case_insensitive_index
                    .get(&file_name.to_ascii_lowercase())
            })
            .copied()
            .or_else(|| {
                self.suffixes
                    .iter()
                    .find(|(suffix, _)| file_name.ends_with(suffix))
                    .map(|&(_, idx)| idx)
            })?;

        Some(self.handlers[idx].as_ref())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(registry: &HandlerRegistry, name: &str) -> Option<HandlerKind> {
        registry.select(name).map(|h| h.kind())
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = HandlerRegistry::with_defaults();
        assert_eq!(registry.len(), 7);
        assert!(!registry.is_empty());
        assert!(HandlerRegistry::new().is_empty());
    }

    #[test]
    fn test_select_exact_names() {
        let registry = HandlerRegistry::with_defaults();
        assert_eq!(selected(&registry, "Dockerfile"), Some(HandlerKind::Dockerfile));
        assert_eq!(
            selected(&registry, "load-balancer.conf"),
            Some(HandlerKind::LoadBalancerConfig)
        );
        assert_eq!(
            selected(&registry, "docker-compose.yml"),
            Some(HandlerKind::Compose)
        );
        assert_eq!(selected(&registry, "dockerfile"), None);
    }

    #[test]
    fn test_select_case_insensitive_names() {
        let registry = HandlerRegistry::with_defaults();
        assert_eq!(
            selected(&registry, "Package.json"),
            Some(HandlerKind::PackageManifest)
        );
        assert_eq!(
            selected(&registry, "REQUIREMENTS.TXT"),
            Some(HandlerKind::DependencyList)
        );
    }

    #[test]
    fn test_select_suffixes() {
        let registry = HandlerRegistry::with_defaults();
        assert_eq!(selected(&registry, "app.py"), Some(HandlerKind::PythonSource));
        assert_eq!(
            selected(&registry, "index.js"),
            Some(HandlerKind::JavaScriptSource)
        );
        assert_eq!(selected(&registry, "README.md"), None);
        assert_eq!(selected(&registry, "tsconfig.json"), None);
    }
}

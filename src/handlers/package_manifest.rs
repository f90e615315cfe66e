//! package.json handler

use super::{FileHandler, FileMatcher, HandlerKind};
use crate::discovery::{DiscoveryMap, ServiceCategory};
use crate::error::ScanError;
use crate::rules::{all_matches, PACKAGE_MANIFEST_APP_SERVER, PACKAGE_MANIFEST_RULES};
use serde_json::Value;
use std::path::Path;

/// Records node.js as the app server and spots databases and caches among
/// the `dependencies` keys. Every match is appended, so a key like
/// `mysql-redis` contributes to both categories and repeats are kept.
pub struct PackageManifestHandler;

impl FileHandler for PackageManifestHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::PackageManifest
    }

    fn matchers(&self) -> &[FileMatcher] {
        &[FileMatcher::ExactIgnoreCase("package.json")]
    }

    fn parse(&self, path: &Path, content: &str) -> Result<DiscoveryMap, ScanError> {
        let manifest: Value = serde_json::from_str(content)
            .map_err(|e| ScanError::parse(path, self.kind(), e.to_string()))?;
        let manifest = manifest.as_object().ok_or_else(|| {
            ScanError::parse(path, self.kind(), "expected a JSON object at the top level")
        })?;

        let mut map = DiscoveryMap::new();
        map.set_label(ServiceCategory::AppServer, PACKAGE_MANIFEST_APP_SERVER);

        match manifest.get("dependencies") {
            None => {}
            Some(Value::Object(dependencies)) => {
                for name in dependencies.keys() {
                    for rule in all_matches(PACKAGE_MANIFEST_RULES, name) {
                        map.push_keyword(rule.category, rule.value);
                    }
                }
            }
            Some(_) => {
                return Err(ScanError::parse(
                    path,
                    self.kind(),
                    "\"dependencies\" must be an object",
                ));
            }
        }

        Ok(map)
    }
}

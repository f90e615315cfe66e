//! requirements.txt handler

use super::{FileHandler, FileMatcher, HandlerKind};
use crate::discovery::DiscoveryMap;
use crate::error::ScanError;
use crate::rules::{all_matches, REQUIREMENTS_RULES};
use std::path::Path;

const VERSION_PIN: &str = "==";

/// Matches each line's package name against known database and cache clients
pub struct DependencyListHandler;

impl FileHandler for DependencyListHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::DependencyList
    }

    fn matchers(&self) -> &[FileMatcher] {
        &[FileMatcher::ExactIgnoreCase("requirements.txt")]
    }

    fn parse(&self, _path: &Path, content: &str) -> Result<DiscoveryMap, ScanError> {
        let mut map = DiscoveryMap::new();

        for line in content.lines() {
            let package = line.split(VERSION_PIN).next().unwrap_or_default();
            for rule in all_matches(REQUIREMENTS_RULES, package) {
                map.push_keyword(rule.category, rule.value);
            }
        }

        Ok(map)
    }
}

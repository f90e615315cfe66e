//! Dockerfile handler

use super::{FileHandler, FileMatcher, HandlerKind};
use crate::discovery::{DiscoveredValue, DiscoveryMap, DockerFindings, ServiceCategory};
use crate::error::ScanError;
use crate::rules::{first_match, DOCKERFILE_COMMAND_MARKER, DOCKERFILE_RULES};
use std::path::Path;

/// Reads `CMD` lines for app servers and message queues.
///
/// The first rule that matches a line decides that line; a later matching
/// line overwrites what an earlier one recorded for the same field.
pub struct DockerfileHandler;

impl FileHandler for DockerfileHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Dockerfile
    }

    fn matchers(&self) -> &[FileMatcher] {
        &[FileMatcher::Exact("Dockerfile")]
    }

    fn parse(&self, _path: &Path, content: &str) -> Result<DiscoveryMap, ScanError> {
        let mut findings = DockerFindings::default();

        for line in content.lines() {
            if !line.contains(DOCKERFILE_COMMAND_MARKER) {
                continue;
            }
            if let Some(rule) = first_match(DOCKERFILE_RULES, line) {
                let value = Some(rule.value.to_string());
                match rule.category {
                    ServiceCategory::AppServer => findings.app_server = value,
                    ServiceCategory::MessageQueue => findings.message_queue = value,
                    _ => {}
                }
            }
        }

        let mut map = DiscoveryMap::new();
        map.insert(ServiceCategory::Docker, DiscoveredValue::Docker(findings));
        Ok(map)
    }
}

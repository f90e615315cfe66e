//! Compose file handler

use super::{FileHandler, FileMatcher, HandlerKind};
use crate::discovery::{DiscoveredValue, DiscoveryMap, DockerFindings, ServiceCategory};
use crate::error::ScanError;
use std::path::Path;

/// Marks docker as present; the services inside are not inspected
pub struct ComposeHandler;

impl FileHandler for ComposeHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Compose
    }

    fn matchers(&self) -> &[FileMatcher] {
        &[
            FileMatcher::Exact("docker-compose.yml"),
            FileMatcher::Exact("docker-compose.yaml"),
            FileMatcher::Exact("compose.yml"),
            FileMatcher::Exact("compose.yaml"),
        ]
    }

    fn parse(&self, _path: &Path, _content: &str) -> Result<DiscoveryMap, ScanError> {
        let mut map = DiscoveryMap::new();
        map.insert(
            ServiceCategory::Docker,
            DiscoveredValue::Docker(DockerFindings::default()),
        );
        Ok(map)
    }
}

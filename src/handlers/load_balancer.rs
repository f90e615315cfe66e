//! Load-balancer (nginx-style) config handler

use super::{FileHandler, FileMatcher, HandlerKind};
use crate::discovery::{DiscoveredValue, DiscoveryMap, LoadBalancerFindings, ServiceCategory};
use crate::error::ScanError;
use std::path::Path;

const UPSTREAM_START: &str = "upstream backend {";
const UPSTREAM_END: &str = "}";
const SERVER_DIRECTIVE: &str = "server";

/// Counts the servers of the `upstream backend` block
pub struct LoadBalancerConfigHandler;

impl LoadBalancerConfigHandler {
    /// Text between `upstream backend {` and the next `}`, or "" if either is missing
    fn upstream_block(content: &str) -> &str {
        let Some(start) = content.find(UPSTREAM_START) else {
            return "";
        };
        let rest = &content[start + UPSTREAM_START.len()..];
        match rest.find(UPSTREAM_END) {
            Some(end) => &rest[..end],
            None => "",
        }
    }
}

impl FileHandler for LoadBalancerConfigHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::LoadBalancerConfig
    }

    fn matchers(&self) -> &[FileMatcher] {
        &[FileMatcher::Exact("load-balancer.conf")]
    }

    fn parse(&self, path: &Path, content: &str) -> Result<DiscoveryMap, ScanError> {
        let mut findings = LoadBalancerFindings::default();

        for line in Self::upstream_block(content).lines() {
            let line = line.trim();
            if !line.starts_with(SERVER_DIRECTIVE) {
                continue;
            }
            // Address is kept verbatim, trailing ';' included
            let address = line.split_whitespace().nth(1).ok_or_else(|| {
                ScanError::parse(
                    path,
                    self.kind(),
                    format!("server entry without an address: {:?}", line),
                )
            })?;
            findings.server_count += 1;
            findings.servers.push(address.to_string());
        }

        let mut map = DiscoveryMap::new();
        map.insert(
            ServiceCategory::LoadBalancer,
            DiscoveredValue::LoadBalancer(findings),
        );
        Ok(map)
    }
}

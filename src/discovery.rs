//! Discovery model
//!
//! A [`DiscoveryMap`] records which [`ServiceCategory`]s a repository scan
//! detected and what was learned about each. A key being present means the
//! category was detected; there is no explicit negative state.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Label recorded for categories that are simply switched on
pub const ENABLED: &str = "enabled";

/// Closed set of infrastructure concerns a scan can detect
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    #[serde(rename = "lb")]
    LoadBalancer,
    MessageQueue,
    Cache,
    Database,
    Docker,
    AppServer,
    AwsS3,
    AwsSqs,
    AwsSns,
    AwsRds,
    AwsLambda,
    AwsCloudtrail,
    StaticContent,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 13] = [
        ServiceCategory::LoadBalancer,
        ServiceCategory::MessageQueue,
        ServiceCategory::Cache,
        ServiceCategory::Database,
        ServiceCategory::Docker,
        ServiceCategory::AppServer,
        ServiceCategory::AwsS3,
        ServiceCategory::AwsSqs,
        ServiceCategory::AwsSns,
        ServiceCategory::AwsRds,
        ServiceCategory::AwsLambda,
        ServiceCategory::AwsCloudtrail,
        ServiceCategory::StaticContent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::LoadBalancer => "lb",
            ServiceCategory::MessageQueue => "message_queue",
            ServiceCategory::Cache => "cache",
            ServiceCategory::Database => "database",
            ServiceCategory::Docker => "docker",
            ServiceCategory::AppServer => "app_server",
            ServiceCategory::AwsS3 => "aws_s3",
            ServiceCategory::AwsSqs => "aws_sqs",
            ServiceCategory::AwsSns => "aws_sns",
            ServiceCategory::AwsRds => "aws_rds",
            ServiceCategory::AwsLambda => "aws_lambda",
            ServiceCategory::AwsCloudtrail => "aws_cloudtrail",
            ServiceCategory::StaticContent => "static_content",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a Dockerfile's `CMD` lines revealed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DockerFindings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_queue: Option<String>,
}

impl DockerFindings {
    /// Fields set in `later` win; unset fields keep their current value
    fn overlay(&mut self, later: DockerFindings) {
        if later.app_server.is_some() {
            self.app_server = later.app_server;
        }
        if later.message_queue.is_some() {
            self.message_queue = later.message_queue;
        }
    }
}

/// Upstream servers listed in a load-balancer config
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadBalancerFindings {
    pub server_count: usize,
    pub servers: Vec<String>,
}

/// Payload stored for a detected category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DiscoveredValue {
    Label(String),
    /// Matched keywords in match order; repeats are kept
    Keywords(Vec<String>),
    LoadBalancer(LoadBalancerFindings),
    Docker(DockerFindings),
}

/// Per-repository record of detected service categories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DiscoveryMap {
    entries: BTreeMap<ServiceCategory, DiscoveredValue>,
}

impl DiscoveryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_detected(&self, category: ServiceCategory) -> bool {
        self.entries.contains_key(&category)
    }

    /// Stores `value`, replacing whatever the category held before
    pub fn insert(&mut self, category: ServiceCategory, value: DiscoveredValue) {
        if let DiscoveredValue::Keywords(ref keywords) = value {
            if keywords.is_empty() {
                return;
            }
        }
        self.entries.insert(category, value);
    }

    pub fn set_label(&mut self, category: ServiceCategory, label: impl Into<String>) {
        self.insert(category, DiscoveredValue::Label(label.into()));
    }

    pub fn mark_enabled(&mut self, category: ServiceCategory) {
        self.set_label(category, ENABLED);
    }

    pub fn push_keyword(&mut self, category: ServiceCategory, keyword: impl Into<String>) {
        match self.entries.get_mut(&category) {
            Some(DiscoveredValue::Keywords(keywords)) => keywords.push(keyword.into()),
            _ => {
                self.entries
                    .insert(category, DiscoveredValue::Keywords(vec![keyword.into()]));
            }
        }
    }

    /// Folds `other` into this map.
    ///
    /// Keyword lists append, Docker findings overlay field by field and any
    /// other value replaces the existing one.
    pub fn merge(&mut self, other: DiscoveryMap) {
        for (category, value) in other.entries {
            match (self.entries.get_mut(&category), value) {
                (Some(DiscoveredValue::Keywords(existing)), DiscoveredValue::Keywords(more)) => {
                    existing.extend(more);
                }
                (Some(DiscoveredValue::Docker(existing)), DiscoveredValue::Docker(later)) => {
                    existing.overlay(later);
                }
                (_, value) => self.insert(category, value),
            }
        }
    }

    pub fn label(&self, category: ServiceCategory) -> Option<&str> {
        match self.entries.get(&category) {
            Some(DiscoveredValue::Label(label)) => Some(label),
            _ => None,
        }
    }

    pub fn keywords(&self, category: ServiceCategory) -> &[String] {
        match self.entries.get(&category) {
            Some(DiscoveredValue::Keywords(keywords)) => keywords,
            _ => &[],
        }
    }

    pub fn docker(&self) -> Option<&DockerFindings> {
        match self.entries.get(&ServiceCategory::Docker) {
            Some(DiscoveredValue::Docker(findings)) => Some(findings),
            _ => None,
        }
    }

    pub fn load_balancer(&self) -> Option<&LoadBalancerFindings> {
        match self.entries.get(&ServiceCategory::LoadBalancer) {
            Some(DiscoveredValue::LoadBalancer(findings)) => Some(findings),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

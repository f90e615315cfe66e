//! Architecture document builder
//!
//! Turns per-customer discovery maps into a diagram-as-code document: a
//! canvas holding one AWS cloud, one VPC per customer, and the leaf
//! resources the discoveries call for. Keys serialize in sorted order, which
//! is the layout the diagram tool's own YAML dumps use.

use crate::config::{ConfigError, DEFAULT_DEFINITION_URL};
use crate::discovery::{DiscoveryMap, ServiceCategory};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

pub const CANVAS: &str = "Canvas";
pub const AWS_CLOUD: &str = "AWSCloud";
pub const CLOUD_FRONT: &str = "AWSCloudFront";
pub const SQS: &str = "SQS";
pub const SNS: &str = "SNS";
pub const S3: &str = "S3";

const CANVAS_TYPE: &str = "AWS::Diagram::Canvas";
const CLOUD_TYPE: &str = "AWS::Diagram::Cloud";
const VPC_TYPE: &str = "AWS::VPC";
const CLOUD_FRONT_TYPE: &str = "AWS::CloudFront";
const EC2_TYPE: &str = "AWS::EC2::Instance";
const SQS_TYPE: &str = "AWS::SQS";
const SNS_TYPE: &str = "AWS::SNS";
const S3_TYPE: &str = "AWS::S3";

const CANVAS_DIRECTION: &str = "Vertical";
const CANVAS_PRESET: &str = "AWSCloudNoLogo";
const DEFINITION_FILE_TYPE: &str = "URL";

/// Fixed node names a customer may not take
const RESERVED_NAMES: [&str; 6] = [CANVAS, AWS_CLOUD, CLOUD_FRONT, SQS, SNS, S3];

/// Compute instance node for one customer
pub fn ec2_resource_name(customer: &str) -> String {
    format!("EC2_{}", customer)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchitectureDocument {
    #[serde(rename = "Diagram")]
    pub diagram: Diagram,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagram {
    #[serde(rename = "DefinitionFiles")]
    pub definition_files: Vec<DefinitionFile>,
    #[serde(rename = "Resources")]
    pub resources: BTreeMap<String, Resource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionFile {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Url")]
    pub url: String,
}

/// One diagram node. Field order matches the sorted key order of the format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    #[serde(rename = "Children", skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
    #[serde(rename = "Direction", skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(rename = "Preset", skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(rename = "Type")]
    pub kind: String,
}

impl Resource {
    /// Node without a Children list
    pub fn leaf(kind: &str) -> Self {
        Self {
            children: None,
            direction: None,
            preset: None,
            kind: kind.to_string(),
        }
    }

    /// Node that always carries a (possibly empty) Children list
    pub fn group(kind: &str) -> Self {
        Self {
            children: Some(Vec::new()),
            ..Self::leaf(kind)
        }
    }

    pub fn children(&self) -> &[String] {
        self.children.as_deref().unwrap_or_default()
    }
}

impl ArchitectureDocument {
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.diagram.resources.get(name)
    }

    /// Children of `name`, empty if it has none or does not exist
    pub fn children_of(&self, name: &str) -> &[String] {
        self.resource(name).map(Resource::children).unwrap_or_default()
    }

    pub fn resources_of_type<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.diagram
            .resources
            .iter()
            .filter(move |(_, r)| r.kind == kind)
            .map(|(name, _)| name.as_str())
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize architecture document to YAML")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .context("Failed to serialize architecture document to JSON")
    }
}

pub struct ArchitectureBuilder {
    definition_url: String,
}

impl Default for ArchitectureBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_DEFINITION_URL)
    }
}

impl ArchitectureBuilder {
    pub fn new(definition_url: impl Into<String>) -> Self {
        Self {
            definition_url: definition_url.into(),
        }
    }

    /// Builds one document covering every customer, in the given order.
    ///
    /// # Errors
    ///
    /// `ConfigError::NoCustomers` for an empty input,
    /// `ConfigError::DuplicateCustomer` when a name repeats and
    /// `ConfigError::ResourceNameCollision` when a customer's VPC or EC2 node
    /// would take the name of another resource.
    pub fn build<'a, I>(&self, customers: I) -> Result<ArchitectureDocument, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a DiscoveryMap)>,
    {
        let mut resources = BTreeMap::new();
        resources.insert(
            CANVAS.to_string(),
            Resource {
                children: Some(vec![AWS_CLOUD.to_string()]),
                direction: Some(CANVAS_DIRECTION.to_string()),
                preset: Some(CANVAS_PRESET.to_string()),
                kind: CANVAS_TYPE.to_string(),
            },
        );
        resources.insert(AWS_CLOUD.to_string(), Resource::group(CLOUD_TYPE));

        let mut graph = ResourceGraph { resources };
        let mut seen = HashSet::new();

        for (customer, discovery) in customers {
            if !seen.insert(customer) {
                return Err(ConfigError::DuplicateCustomer(customer.to_string()));
            }
            if RESERVED_NAMES.contains(&customer) {
                return Err(ConfigError::ResourceNameCollision(customer.to_string()));
            }
            debug!(customer, categories = discovery.len(), "Adding customer to diagram");

            graph.add_unique(customer, Resource::group(VPC_TYPE))?;
            graph.attach(AWS_CLOUD, customer);

            if discovery.is_detected(ServiceCategory::StaticContent) {
                graph.add_shared(CLOUD_FRONT, CLOUD_FRONT_TYPE);
                graph.attach(AWS_CLOUD, CLOUD_FRONT);
            }

            if discovery.is_detected(ServiceCategory::Docker) {
                let ec2 = ec2_resource_name(customer);
                graph.add_unique(&ec2, Resource::leaf(EC2_TYPE))?;
                graph.attach(customer, &ec2);
            }

            for (category, name, kind) in [
                (ServiceCategory::AwsSqs, SQS, SQS_TYPE),
                (ServiceCategory::AwsSns, SNS, SNS_TYPE),
                (ServiceCategory::AwsS3, S3, S3_TYPE),
            ] {
                if discovery.is_detected(category) {
                    graph.add_shared(name, kind);
                    graph.attach(AWS_CLOUD, name);
                }
            }
        }

        if seen.is_empty() {
            return Err(ConfigError::NoCustomers);
        }

        Ok(ArchitectureDocument {
            diagram: Diagram {
                definition_files: vec![DefinitionFile {
                    kind: DEFINITION_FILE_TYPE.to_string(),
                    url: self.definition_url.clone(),
                }],
                resources: graph.resources,
            },
        })
    }
}

struct ResourceGraph {
    resources: BTreeMap<String, Resource>,
}

impl ResourceGraph {
    fn add_unique(&mut self, name: &str, resource: Resource) -> Result<(), ConfigError> {
        if self.resources.contains_key(name) {
            return Err(ConfigError::ResourceNameCollision(name.to_string()));
        }
        self.resources.insert(name.to_string(), resource);
        Ok(())
    }

    /// Shared nodes are created by the first customer that needs them
    fn add_shared(&mut self, name: &str, kind: &str) {
        self.resources
            .entry(name.to_string())
            .or_insert_with(|| Resource::leaf(kind));
    }

    fn attach(&mut self, parent: &str, child: &str) {
        if let Some(children) = self
            .resources
            .get_mut(parent)
            .and_then(|r| r.children.as_mut())
        {
            if !children.iter().any(|c| c == child) {
                children.push(child.to_string());
            }
        }
    }
}

//! Declarative detection rules
//!
//! Every handler that works by keyword spotting keeps an ordered table of
//! [`KeywordRule`]s and lets [`first_match`] or [`all_matches`] interpret it.
//! Extending detection means adding a row here, not a branch in a parser.

use crate::discovery::{ServiceCategory, ENABLED};

/// Substring `pattern` maps to `value` under `category`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    pub pattern: &'static str,
    pub category: ServiceCategory,
    pub value: &'static str,
}

impl KeywordRule {
    pub const fn new(pattern: &'static str, category: ServiceCategory, value: &'static str) -> Self {
        Self {
            pattern,
            category,
            value,
        }
    }

    pub fn matches(&self, haystack: &str) -> bool {
        haystack.contains(self.pattern)
    }
}

/// First rule (in table order) whose pattern occurs in `haystack`
pub fn first_match<'a>(rules: &'a [KeywordRule], haystack: &str) -> Option<&'a KeywordRule> {
    rules.iter().find(|rule| rule.matches(haystack))
}

/// Every rule whose pattern occurs in `haystack`, in table order
pub fn all_matches<'a>(
    rules: &'a [KeywordRule],
    haystack: &'a str,
) -> impl Iterator<Item = &'a KeywordRule> + 'a {
    rules.iter().filter(move |rule| rule.matches(haystack))
}

/// Marker a Dockerfile line must contain before its rules are consulted
pub const DOCKERFILE_COMMAND_MARKER: &str = "CMD";

/// Checked per `CMD` line; the first hit on a line wins
pub const DOCKERFILE_RULES: &[KeywordRule] = &[
    KeywordRule::new("npm", ServiceCategory::AppServer, "Nodejs"),
    KeywordRule::new("flask", ServiceCategory::AppServer, "Flask"),
    KeywordRule::new("django", ServiceCategory::AppServer, "Django"),
    KeywordRule::new("start-kafka", ServiceCategory::MessageQueue, "kafka"),
    KeywordRule::new("rabbitmq", ServiceCategory::MessageQueue, "rabbitmq"),
];

/// Label recorded for any package.json, whatever it declares
pub const PACKAGE_MANIFEST_APP_SERVER: &str = "node.js";

/// Checked against every `dependencies` key of a package.json
pub const PACKAGE_MANIFEST_RULES: &[KeywordRule] = &[
    KeywordRule::new("mysql", ServiceCategory::Database, "mysql"),
    KeywordRule::new("mongodb", ServiceCategory::Database, "mongodb"),
    KeywordRule::new("postgres", ServiceCategory::Database, "postgres"),
    KeywordRule::new("redis", ServiceCategory::Cache, "redis"),
];

/// Checked against the package name (text before `==`) of each requirements line
pub const REQUIREMENTS_RULES: &[KeywordRule] = &[
    KeywordRule::new("mysqlclient", ServiceCategory::Database, "mysql"),
    KeywordRule::new("pymongo", ServiceCategory::Database, "mongodb"),
    KeywordRule::new("postgres", ServiceCategory::Database, "postgres"),
    KeywordRule::new("redis", ServiceCategory::Cache, "redis"),
];

/// boto3 client constructors, both quote styles
pub const PYTHON_SOURCE_RULES: &[KeywordRule] = &[
    KeywordRule::new("boto3.client('s3')", ServiceCategory::AwsS3, ENABLED),
    KeywordRule::new("boto3.client(\"s3\")", ServiceCategory::AwsS3, ENABLED),
    KeywordRule::new("boto3.client('sqs')", ServiceCategory::AwsSqs, ENABLED),
    KeywordRule::new("boto3.client(\"sqs\")", ServiceCategory::AwsSqs, ENABLED),
    KeywordRule::new("boto3.client('sns')", ServiceCategory::AwsSns, ENABLED),
    KeywordRule::new("boto3.client(\"sns\")", ServiceCategory::AwsSns, ENABLED),
    KeywordRule::new("boto3.client('rds')", ServiceCategory::AwsRds, ENABLED),
    KeywordRule::new("boto3.client(\"rds\")", ServiceCategory::AwsRds, ENABLED),
    KeywordRule::new("boto3.client('lambda')", ServiceCategory::AwsLambda, ENABLED),
    KeywordRule::new("boto3.client(\"lambda\")", ServiceCategory::AwsLambda, ENABLED),
    KeywordRule::new("boto3.client('cloudtrail')", ServiceCategory::AwsCloudtrail, ENABLED),
    KeywordRule::new("boto3.client(\"cloudtrail\")", ServiceCategory::AwsCloudtrail, ENABLED),
];

/// AWS SDK v3 client packages and v2 service constructors
pub const JAVASCRIPT_SOURCE_RULES: &[KeywordRule] = &[
    KeywordRule::new("@aws-sdk/client-s3", ServiceCategory::AwsS3, ENABLED),
    KeywordRule::new("new AWS.S3(", ServiceCategory::AwsS3, ENABLED),
    KeywordRule::new("@aws-sdk/client-sqs", ServiceCategory::AwsSqs, ENABLED),
    KeywordRule::new("new AWS.SQS(", ServiceCategory::AwsSqs, ENABLED),
    KeywordRule::new("@aws-sdk/client-sns", ServiceCategory::AwsSns, ENABLED),
    KeywordRule::new("new AWS.SNS(", ServiceCategory::AwsSns, ENABLED),
    KeywordRule::new("@aws-sdk/client-rds", ServiceCategory::AwsRds, ENABLED),
    KeywordRule::new("new AWS.RDS(", ServiceCategory::AwsRds, ENABLED),
    KeywordRule::new("@aws-sdk/client-lambda", ServiceCategory::AwsLambda, ENABLED),
    KeywordRule::new("new AWS.Lambda(", ServiceCategory::AwsLambda, ENABLED),
    KeywordRule::new("@aws-sdk/client-cloudtrail", ServiceCategory::AwsCloudtrail, ENABLED),
    KeywordRule::new("new AWS.CloudTrail(", ServiceCategory::AwsCloudtrail, ENABLED),
];

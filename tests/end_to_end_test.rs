//! Scan, build and serialize, through the public library API

use infradiag::architecture::{AWS_CLOUD, CANVAS, CLOUD_FRONT, S3, SNS, SQS};
use infradiag::{ArchitectureBuilder, ArchitectureDocument, RepositoryScanner};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn npm_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Dockerfile"), "CMD [\"npm\",\"start\"]\n").unwrap();
    dir
}

fn build(customers: &[(&str, &Path)]) -> ArchitectureDocument {
    let scanner = RepositoryScanner::local();
    let reports: Vec<_> = customers
        .iter()
        .map(|(_, root)| scanner.scan(root).unwrap())
        .collect();

    ArchitectureBuilder::default()
        .build(
            customers
                .iter()
                .zip(&reports)
                .map(|((name, _), report)| (*name, &report.discovery)),
        )
        .unwrap()
}

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_two_npm_repositories() {
    let a = npm_repo();
    let b = npm_repo();
    let doc = build(&[("CustomerA", a.path()), ("CustomerB", b.path())]);

    let vpcs: Vec<_> = doc.resources_of_type("AWS::VPC").collect();
    assert_eq!(vpcs, vec!["CustomerA", "CustomerB"]);

    assert_eq!(doc.resources_of_type("AWS::CloudFront").count(), 1);
    assert_eq!(
        doc.children_of(AWS_CLOUD),
        ["CustomerA", "AWSCloudFront", "CustomerB"]
    );

    assert_eq!(doc.children_of("CustomerA"), ["EC2_CustomerA"]);
    assert_eq!(doc.children_of("CustomerB"), ["EC2_CustomerB"]);
    assert_eq!(doc.resources_of_type("AWS::EC2::Instance").count(), 2);
}

#[test]
fn test_fixture_customers_share_aws_services() {
    let doc = build(&[
        ("Storefront", fixture_path("customer-node").as_path()),
        ("Billing", fixture_path("customer-python").as_path()),
    ]);

    assert_eq!(doc.children_of(CANVAS), [AWS_CLOUD]);
    assert_eq!(
        doc.children_of(AWS_CLOUD),
        ["Storefront", CLOUD_FRONT, S3, "Billing", SQS, SNS]
    );
    assert_eq!(doc.resource(S3).unwrap().kind, "AWS::S3");
    assert_eq!(doc.resource(SQS).unwrap().kind, "AWS::SQS");
    assert_eq!(doc.children_of("Billing"), ["EC2_Billing"]);
}

#[test]
fn test_compose_file_alone_gets_ec2_instance() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("docker-compose.yml"),
        "services:\n  web:\n    build: .\n",
    )
    .unwrap();
    let doc = build(&[("Harbor", dir.path())]);

    assert_eq!(doc.children_of("Harbor"), ["EC2_Harbor"]);
    assert_eq!(
        doc.resource("EC2_Harbor").unwrap().kind,
        "AWS::EC2::Instance"
    );
}

#[test]
fn test_compose_fixture_places_ec2_in_vpc() {
    let doc = build(&[("Warehouse", fixture_path("customer-compose").as_path())]);

    assert_eq!(doc.resource("Warehouse").unwrap().kind, "AWS::VPC");
    assert_eq!(doc.children_of("Warehouse"), ["EC2_Warehouse"]);
}

#[test]
fn test_empty_repository_gets_bare_vpc() {
    let empty = TempDir::new().unwrap();
    let doc = build(&[("Empty", empty.path())]);

    let vpc = doc.resource("Empty").unwrap();
    assert_eq!(vpc.kind, "AWS::VPC");
    assert!(vpc.children().is_empty());
    assert!(doc.resource(CLOUD_FRONT).is_none());
    assert_eq!(doc.children_of(AWS_CLOUD), ["Empty"]);
}

#[test]
fn test_yaml_document_parses_back() {
    let a = npm_repo();
    let yaml = build(&[("CustomerA", a.path())]).to_yaml().unwrap();

    let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    let resources = &value["Diagram"]["Resources"];
    assert_eq!(resources["Canvas"]["Preset"].as_str(), Some("AWSCloudNoLogo"));
    assert_eq!(resources["Canvas"]["Direction"].as_str(), Some("Vertical"));
    assert_eq!(
        resources["EC2_CustomerA"]["Type"].as_str(),
        Some("AWS::EC2::Instance")
    );
    assert_eq!(
        value["Diagram"]["DefinitionFiles"][0]["Type"].as_str(),
        Some("URL")
    );
}

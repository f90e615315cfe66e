//! Output formatting for the CLI
//!
//! Architecture documents and scan reports render as YAML (the diagram
//! tool's native input) or pretty-printed JSON.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::architecture::ArchitectureDocument;
use crate::scanner::ScanReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format, as consumed by diagram-as-code
    Yaml,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_document(&self, document: &ArchitectureDocument) -> Result<String> {
        match self.format {
            OutputFormat::Json => document.to_json(),
            OutputFormat::Yaml => document.to_yaml(),
        }
    }

    /// Formats the outcome of a single-repository scan
    pub fn format_report(&self, report: &ScanReport) -> Result<String> {
        self.serialize(report)
            .context("Failed to serialize scan report")
    }

    fn serialize<T: Serialize>(&self, value: &T) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(value).map_err(Into::into),
            OutputFormat::Yaml => serde_yaml::to_string(value).map_err(Into::into),
        }
    }
}

//! Subcommand handlers. Each returns the process exit code.

use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use super::commands::{CloneArgs, DiscoverArgs, ScanArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::architecture::ArchitectureBuilder;
use crate::config::{pair_customers, InfradiagConfig};
use crate::fetch::{clone_if_absent, FetchOutcome};
use crate::scanner::{RepositoryScanner, ScanReport};

pub const EXIT_SUCCESS: i32 = 0;
/// Configuration or fatal error, nothing was emitted
pub const EXIT_FAILURE: i32 = 1;
/// Output was emitted but some files could not be read or parsed
pub const EXIT_PARTIAL: i32 = 2;

pub fn handle_scan(args: &ScanArgs, config: &InfradiagConfig, quiet: bool) -> i32 {
    let targets = match pair_customers(&args.directories, &args.customers) {
        Ok(targets) => targets,
        Err(e) => {
            error!("Configuration error: {}", e);
            return EXIT_FAILURE;
        }
    };

    let scanner = RepositoryScanner::local().with_config(config.scan_config());

    // Every root is checked before any scanning starts
    for target in &targets {
        if let Err(e) = scanner.check_root(&target.root) {
            error!(customer = %target.name, "Configuration error: {}", e);
            return EXIT_FAILURE;
        }
    }

    let mut reports: Vec<ScanReport> = Vec::with_capacity(targets.len());
    for target in &targets {
        info!(customer = %target.name, root = %target.root.display(), "Scanning customer repository");
        match scanner.scan(&target.root) {
            Ok(report) => reports.push(report),
            Err(e) => {
                error!(customer = %target.name, "Scan failed: {}", e);
                return EXIT_FAILURE;
            }
        }
    }

    let builder = ArchitectureBuilder::new(config.definition_url.as_str());
    let document = match builder.build(
        targets
            .iter()
            .zip(&reports)
            .map(|(target, report)| (target.name.as_str(), &report.discovery)),
    ) {
        Ok(document) => document,
        Err(e) => {
            error!("Failed to build architecture: {}", e);
            return EXIT_FAILURE;
        }
    };
    debug!(resources = document.diagram.resources.len(), "Architecture built");

    let formatter = OutputFormatter::new(args.format.into());
    let output = match formatter.format_document(&document) {
        Ok(out) => out,
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            return EXIT_FAILURE;
        }
    };

    if let Err(e) = emit(&output, args.output.as_deref(), quiet) {
        error!("{:#}", e);
        return EXIT_FAILURE;
    }

    let failed_files: usize = reports.iter().map(|r| r.errors.len()).sum();
    if failed_files > 0 {
        warn!(failed_files, "Some files could not be read or parsed");
        return EXIT_PARTIAL;
    }

    EXIT_SUCCESS
}

pub fn handle_discover(args: &DiscoverArgs, config: &InfradiagConfig, quiet: bool) -> i32 {
    let root = match &args.directory {
        Some(dir) => dir.clone(),
        None => match env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                error!("Failed to get current directory: {}", e);
                return EXIT_FAILURE;
            }
        },
    };

    let scanner = RepositoryScanner::local().with_config(config.scan_config());
    let report = match scanner.scan(&root) {
        Ok(report) => report,
        Err(e) => {
            error!("Configuration error: {}", e);
            return EXIT_FAILURE;
        }
    };

    let format: OutputFormat = args.format.into();
    let output = match OutputFormatter::new(format).format_report(&report) {
        Ok(out) => out,
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            return EXIT_FAILURE;
        }
    };

    if let Err(e) = emit(&output, args.output.as_deref(), quiet) {
        error!("{:#}", e);
        return EXIT_FAILURE;
    }

    if report.has_errors() {
        EXIT_PARTIAL
    } else {
        EXIT_SUCCESS
    }
}

pub fn handle_clone(args: &CloneArgs, quiet: bool) -> i32 {
    match clone_if_absent(&args.url, &args.directory) {
        Ok(FetchOutcome::Cloned) => {
            if !quiet {
                println!("Cloned repository to {}", args.directory.display());
            }
            EXIT_SUCCESS
        }
        Ok(FetchOutcome::Skipped) => {
            if !quiet {
                println!("{} already exists, not cloning", args.directory.display());
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            EXIT_FAILURE
        }
    }
}

/// Writes to `path` when given, stdout otherwise
fn emit(output: &str, path: Option<&Path>, quiet: bool) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, output)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!("Output written to: {}", path.display());
            if !quiet {
                eprintln!("Output written to: {}", path.display());
            }
        }
        None => print!("{}", output),
    }
    Ok(())
}

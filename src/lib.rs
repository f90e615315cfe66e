//! infradiag - infrastructure discovery for AWS architecture diagrams
//!
//! Scans source repositories for markers of the services they rely on
//! (databases, caches, message queues, load balancers, AWS SDK clients) and
//! turns what it finds into a diagram-as-code document.
//!
//! # Core Concepts
//!
//! - **Handlers**: one per recognized file kind (Dockerfile, package.json,
//!   requirements.txt, load-balancer config, compose files, Python and
//!   JavaScript sources). Each returns the findings of a single file.
//! - **Discovery map**: the merged findings of one repository, keyed by
//!   [`ServiceCategory`].
//! - **Architecture document**: a canvas holding one AWS cloud with a VPC per
//!   customer, built by [`ArchitectureBuilder`].
//!
//! # Example Usage
//!
//! ```no_run
//! use infradiag::{ArchitectureBuilder, RepositoryScanner};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let scanner = RepositoryScanner::local();
//! let acme = scanner.scan(Path::new("repos/acme"))?;
//! let globex = scanner.scan(Path::new("repos/globex"))?;
//!
//! let document = ArchitectureBuilder::default().build([
//!     ("Acme", &acme.discovery),
//!     ("Globex", &globex.discovery),
//! ])?;
//! println!("{}", document.to_yaml()?);
//! # Ok(())
//! # }
//! ```

pub mod architecture;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod fetch;
pub mod fs;
pub mod handlers;
pub mod rules;
pub mod scanner;
pub mod util;

pub use architecture::{ArchitectureBuilder, ArchitectureDocument, Resource};
pub use config::{pair_customers, ConfigError, CustomerTarget, InfradiagConfig};
pub use discovery::{DiscoveredValue, DiscoveryMap, DockerFindings, LoadBalancerFindings, ServiceCategory};
pub use error::ScanError;
pub use fetch::{clone_if_absent, FetchError, FetchOutcome};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem, WalkError, WalkOptions};
pub use handlers::{FileHandler, HandlerKind, HandlerRegistry};
pub use scanner::{RepositoryScanner, ScanConfig, ScanReport};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_infradiag() {
        assert_eq!(NAME, "infradiag");
    }
}

//! Configuration management for infradiag
//!
//! Settings come from environment variables with sensible defaults. Command
//! line flags override them in `main`.
//!
//! # Environment Variables
//!
//! - `INFRADIAG_LOG_LEVEL`: Logging level - default: "info"
//! - `INFRADIAG_MAX_DEPTH`: Maximum walk depth - default: unlimited
//! - `INFRADIAG_MAX_FILE_SIZE`: Files larger than this (bytes) are not parsed - default: 10 MiB
//! - `INFRADIAG_RESPECT_GITIGNORE`: Honor .gitignore while walking (true|false) - default: "false"
//! - `INFRADIAG_DEFINITION_URL`: Icon definition file referenced by the diagram
//!
//! # Example
//!
//! ```no_run
//! use infradiag::InfradiagConfig;
//!
//! let config = InfradiagConfig::from_env().expect("invalid environment");
//! config.validate().expect("invalid configuration");
//! let scan_config = config.scan_config();
//! ```

use crate::fs::WalkOptions;
use crate::scanner::ScanConfig;
use regex::Regex;
use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// diagram-as-code AWS icon set (light theme)
pub const DEFAULT_DEFINITION_URL: &str =
    "https://raw.githubusercontent.com/awslabs/diagram-as-code/main/definitions/definition-for-aws-icons-light.yaml";

/// Configuration errors. All of them are fatal and reported before scanning.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("At least one repository directory is required")]
    NoCustomers,

    #[error("Invalid customer name {0:?}: use letters, digits, '_' or '-', starting with a letter")]
    InvalidCustomerName(String),

    #[error("Customer name {0:?} is used more than once")]
    DuplicateCustomer(String),

    #[error("Got {customers} customer name(s) for {directories} director(ies); give one per directory or none")]
    CustomerCountMismatch { customers: usize, directories: usize },

    #[error("Resource name {0:?} is already taken in the diagram")]
    ResourceNameCollision(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Main configuration structure for infradiag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfradiagConfig {
    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Maximum directory depth to walk
    pub max_depth: Option<usize>,

    /// Files above this size (bytes) are counted but not parsed
    pub max_file_size: u64,

    /// Honor .gitignore while walking
    pub respect_gitignore: bool,

    /// URL of the icon definition file the diagram references
    pub definition_url: String,
}

impl Default for InfradiagConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            max_depth: None,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            respect_gitignore: false,
            definition_url: DEFAULT_DEFINITION_URL.to_string(),
        }
    }
}

impl InfradiagConfig {
    /// Loads INFRADIAG_* variables on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` when a variable is set but cannot be
    /// parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let log_level = env::var("INFRADIAG_LOG_LEVEL")
            .unwrap_or(defaults.log_level)
            .to_lowercase();

        let max_depth = match env::var("INFRADIAG_MAX_DEPTH") {
            Ok(v) => Some(parse_var("INFRADIAG_MAX_DEPTH", &v)?),
            Err(_) => defaults.max_depth,
        };

        let max_file_size = match env::var("INFRADIAG_MAX_FILE_SIZE") {
            Ok(v) => parse_var("INFRADIAG_MAX_FILE_SIZE", &v)?,
            Err(_) => defaults.max_file_size,
        };

        let respect_gitignore = match env::var("INFRADIAG_RESPECT_GITIGNORE") {
            Ok(v) => parse_var("INFRADIAG_RESPECT_GITIGNORE", &v.to_lowercase())?,
            Err(_) => defaults.respect_gitignore,
        };

        let definition_url =
            env::var("INFRADIAG_DEFINITION_URL").unwrap_or(defaults.definition_url);

        Ok(Self {
            log_level,
            max_depth,
            max_file_size,
            respect_gitignore,
            definition_url,
        })
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` if any check fails
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        if self.max_file_size == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max file size must be at least 1 byte".to_string(),
            ));
        }

        if !(self.definition_url.starts_with("https://") || self.definition_url.starts_with("http://"))
        {
            return Err(ConfigError::ValidationFailed(format!(
                "Definition URL must be http(s): {}",
                self.definition_url
            )));
        }

        Ok(())
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            walk: WalkOptions {
                max_depth: self.max_depth,
                respect_gitignore: self.respect_gitignore,
                ..WalkOptions::default()
            },
            max_file_size: self.max_file_size,
        }
    }
}

fn parse_var<T>(field: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| ConfigError::ParseError {
        field: field.to_string(),
        error: e.to_string(),
    })
}

/// One repository to scan and the label its findings are drawn under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerTarget {
    pub name: String,
    pub root: PathBuf,
}

/// Default label for the customer at `index`: CustomerA ... CustomerZ,
/// then CustomerAA, CustomerAB and on, like spreadsheet columns
pub fn default_customer_name(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    format!("Customer{}", letters.iter().rev().collect::<String>())
}

pub fn validate_customer_name(name: &str) -> Result<(), ConfigError> {
    let pattern = Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("valid regex");
    if pattern.is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidCustomerName(name.to_string()))
    }
}

/// Pairs directories with customer names by position.
///
/// With no names every directory gets a default label. Otherwise there must
/// be exactly one valid, unique name per directory.
pub fn pair_customers(
    directories: &[PathBuf],
    names: &[String],
) -> Result<Vec<CustomerTarget>, ConfigError> {
    if directories.is_empty() {
        return Err(ConfigError::NoCustomers);
    }
    if !names.is_empty() && names.len() != directories.len() {
        return Err(ConfigError::CustomerCountMismatch {
            customers: names.len(),
            directories: directories.len(),
        });
    }

    let mut seen = HashSet::new();
    directories
        .iter()
        .enumerate()
        .map(|(i, root)| {
            let name = names
                .get(i)
                .cloned()
                .unwrap_or_else(|| default_customer_name(i));
            validate_customer_name(&name)?;
            if !seen.insert(name.clone()) {
                return Err(ConfigError::DuplicateCustomer(name));
            }
            Ok(CustomerTarget {
                name,
                root: root.clone(),
            })
        })
        .collect()
}

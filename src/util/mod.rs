//! Utility modules for infradiag

pub mod logging;

pub use logging::{init_logging, LoggingConfig};

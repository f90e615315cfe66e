pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, CloneArgs, Commands, DiscoverArgs, ScanArgs};
pub use handlers::{handle_clone, handle_discover, handle_scan};
pub use output::{OutputFormat, OutputFormatter};

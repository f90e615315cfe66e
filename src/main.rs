use infradiag::cli::commands::{CliArgs, Commands};
use infradiag::cli::handlers::{handle_clone, handle_discover, handle_scan, EXIT_FAILURE};
use infradiag::util::logging::{init_logging, parse_level, LoggingConfig};
use infradiag::{InfradiagConfig, VERSION};

use clap::Parser;
use tracing::{debug, error, Level};

fn main() {
    let args = CliArgs::parse();

    init_logging_from_args(&args);

    debug!("infradiag v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let config = match InfradiagConfig::from_env().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("\nPlease check your INFRADIAG_* environment variables.");
            std::process::exit(EXIT_FAILURE);
        }
    };

    let exit_code = match &args.command {
        Commands::Scan(scan_args) => handle_scan(scan_args, &config, args.quiet),
        Commands::Discover(discover_args) => handle_discover(discover_args, &config, args.quiet),
        Commands::Clone(clone_args) => handle_clone(clone_args, args.quiet),
    };

    std::process::exit(exit_code);
}

/// `--log-level` wins over `-v`/`-q`, which win over INFRADIAG_LOG_LEVEL.
/// A set RUST_LOG replaces all of them.
fn init_logging_from_args(args: &CliArgs) {
    let from_env = LoggingConfig::from_env();
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        from_env.level
    };

    init_logging(LoggingConfig { level, ..from_env });
}

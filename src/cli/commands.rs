use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Infrastructure discovery and AWS architecture diagrams from source repositories
#[derive(Parser, Debug)]
#[command(
    name = "infradiag",
    about = "Detect infrastructure services in repositories and emit an AWS architecture diagram",
    version,
    long_about = "infradiag walks one repository per customer, spots the databases, caches, \
                  message queues, load balancers and AWS services the code uses, and writes a \
                  diagram-as-code document that places every customer in the same AWS cloud."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Scan customer repositories and emit the architecture document",
        long_about = "Scans each directory, one per customer, and prints a diagram-as-code \
                      document with one VPC per customer.\n\n\
                      Examples:\n  \
                      infradiag scan ./customerA ./customerB\n  \
                      infradiag scan ./acme -c Acme --format json\n  \
                      infradiag scan ./a ./b -o architecture.yaml"
    )]
    Scan(ScanArgs),

    #[command(
        about = "Show what was detected in a single repository",
        long_about = "Scans one directory and prints its discovery map together with scan \
                      statistics and any per-file errors.\n\n\
                      Examples:\n  \
                      infradiag discover ./customerA\n  \
                      infradiag discover ./customerA --format json"
    )]
    Discover(DiscoverArgs),

    #[command(
        about = "Clone a repository unless the target directory already exists",
        long_about = "Runs `git clone URL DIR` when DIR is absent and does nothing otherwise.\n\n\
                      Examples:\n  \
                      infradiag clone https://github.com/acme/shop.git ./repos/acme"
    )]
    Clone(CloneArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ScanArgs {
    #[arg(
        value_name = "DIR",
        required = true,
        num_args = 1..,
        help = "Repository directories, one per customer"
    )]
    pub directories: Vec<PathBuf>,

    #[arg(
        short = 'c',
        long = "customer",
        value_name = "NAME",
        help = "Customer name for the directory at the same position (repeatable)"
    )]
    pub customers: Vec<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "yaml",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct DiscoverArgs {
    #[arg(
        value_name = "DIR",
        help = "Repository directory (defaults to current directory)"
    )]
    pub directory: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "yaml",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CloneArgs {
    #[arg(value_name = "URL", help = "Repository URL")]
    pub url: String,

    #[arg(value_name = "DIR", help = "Target directory")]
    pub directory: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
        }
    }
}

use crate::logging::LogLevel;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "modmap")]
#[command(about = "Find circular imports, layer violations and coupling hot spots in JS/TS projects")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log verbosity (MODMAP_LOG overrides)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: LogLevel,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the full dependency analysis
    Analyze(AnalyzeArgs),

    /// List circular dependencies only
    Cycles(CyclesArgs),

    /// Show one module with its dependencies and dependents
    Module(ModuleArgs),

    /// Print the dependency graph as a Mermaid diagram
    Graph(GraphArgs),

    /// Generate a starter .modmap.toml configuration file
    Init(InitArgs),
}

/// Scan options shared by every analyzing command.
#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Path substrings to skip (replaces the configured list)
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Directory levels below the root to scan
    #[arg(long)]
    pub max_depth: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to analyze (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub scan: ScanArgs,

    /// Skip cycle detection
    #[arg(long)]
    pub no_cycles: bool,

    /// Include a Mermaid graph in the report
    #[arg(long)]
    pub graph: bool,

    /// Exit with status 1 when cycles or layer violations are found
    #[arg(long)]
    pub fail_on_issues: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            format: OutputFormat::Markdown,
            output: None,
            scan: ScanArgs::default(),
            no_cycles: false,
            graph: false,
            fail_on_issues: false,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CyclesArgs {
    /// Path to analyze (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub scan: ScanArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct ModuleArgs {
    /// Module path, relative to the project root
    pub module: String,

    /// Project path (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub scan: ScanArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {
    /// Path to analyze (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Write the diagram to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub scan: ScanArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Path where to create .modmap.toml (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

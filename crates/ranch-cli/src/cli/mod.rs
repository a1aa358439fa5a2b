use std::path::PathBuf;

use clap::Parser;

pub mod global;

pub use global::{BackendArg, GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `ranchcam` binary.
#[derive(Debug, Parser)]
#[command(
    name = "ranchcam",
    version,
    about = "Camera event report for a single ranch"
)]
pub struct Cli {
    /// Ranch name, matched case-insensitively
    #[arg(value_name = "RANCH_NAME", required_unless_present = "print_schema")]
    pub ranch: Option<String>,

    /// Output format: json, raw
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,

    /// Warehouse backend (overrides config)
    #[arg(short, long)]
    pub backend: Option<BackendArg>,

    /// BigQuery project id (overrides config)
    #[arg(long)]
    pub project_id: Option<String>,

    /// Extra TOML config file, merged above the project config
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the JSON Schema of the report document and exit
    #[arg(long, conflicts_with = "ranch")]
    pub print_schema: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            backend: self.backend.map(Into::into),
            project_id: self.project_id.clone(),
            config: self.config.clone(),
        }
    }
}

use std::path::PathBuf;

use clap::ValueEnum;
use ranch_config::Backend;

/// How the report document is written to stdout.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Indented JSON.
    Json,
    /// Single-line JSON.
    Raw,
}

/// Warehouse backend as spelled on the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum BackendArg {
    Bigquery,
    Duckdb,
}

impl From<BackendArg> for Backend {
    fn from(value: BackendArg) -> Self {
        match value {
            BackendArg::Bigquery => Self::Bigquery,
            BackendArg::Duckdb => Self::Duckdb,
        }
    }
}

/// Flags shared by every code path after parsing.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub backend: Option<Backend>,
    pub project_id: Option<String>,
    pub config: Option<PathBuf>,
}

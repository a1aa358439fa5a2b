//! BigQuery configuration for the `bq` command line backend.

use serde::{Deserialize, Serialize};

fn default_command() -> String {
    String::from("bq")
}

fn default_project_id() -> String {
    String::from("frontiersmarketplace")
}

fn default_dataset() -> String {
    String::from("public")
}

/// `bq query` prints at most 100 rows unless told otherwise.
const fn default_max_rows() -> u32 {
    10_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BigQueryConfig {
    /// Executable used to run queries. Resolved through `PATH` when relative.
    #[serde(default = "default_command")]
    pub command: String,

    /// Google Cloud project that owns the dataset and is billed for queries.
    #[serde(default = "default_project_id")]
    pub project_id: String,

    /// Dataset holding the ranch, camera and video event tables.
    #[serde(default = "default_dataset")]
    pub dataset: String,

    /// Row cap passed to `bq query --max_rows`.
    #[serde(default = "default_max_rows")]
    pub max_rows: u32,
}

impl Default for BigQueryConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            project_id: default_project_id(),
            dataset: default_dataset(),
            max_rows: default_max_rows(),
        }
    }
}

impl BigQueryConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.command.is_empty()
            && !self.project_id.is_empty()
            && !self.dataset.is_empty()
            && self.max_rows > 0
    }
}

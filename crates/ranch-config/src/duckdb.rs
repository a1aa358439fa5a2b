//! Embedded `DuckDB` configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DuckDbConfig {
    /// Database file. Empty opens an in-memory database.
    #[serde(default)]
    pub path: String,

    /// Schema qualifying the report tables. Empty uses the default schema.
    #[serde(default)]
    pub schema: String,
}

impl DuckDbConfig {
    #[must_use]
    pub const fn is_in_memory(&self) -> bool {
        self.path.is_empty()
    }
}

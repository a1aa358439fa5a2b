//! Warehouse backend selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which warehouse client answers the report queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// The `bq` command line tool against a BigQuery project.
    #[default]
    Bigquery,
    /// An embedded `DuckDB` database, local or on `MotherDuck`.
    Duckdb,
}

impl Backend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bigquery => "bigquery",
            Self::Duckdb => "duckdb",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WarehouseConfig {
    #[serde(default)]
    pub backend: Backend,
}

#[cfg(test)]
mod tests {
    use figment::Figment;
    use figment::providers::Serialized;

    use super::*;

    #[test]
    fn default_backend_is_bigquery() {
        assert_eq!(WarehouseConfig::default().backend, Backend::Bigquery);
    }

    #[test]
    fn backend_names_roundtrip_through_serde() {
        for backend in [Backend::Bigquery, Backend::Duckdb] {
            let config: WarehouseConfig =
                Figment::from(Serialized::default("backend", backend.as_str()))
                    .extract()
                    .expect("known backend");
            assert_eq!(config.backend, backend);
            assert_eq!(backend.to_string(), backend.as_str());
        }
    }
}

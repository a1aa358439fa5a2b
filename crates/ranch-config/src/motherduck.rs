//! `MotherDuck` target for the `DuckDB` backend.
//!
//! A configured token takes precedence over `[duckdb] path`.

use serde::{Deserialize, Serialize};

fn default_db_name() -> String {
    String::from("frontiersmarketplace")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MotherDuckConfig {
    /// Service token. Empty means the local `DuckDB` database is used.
    #[serde(default)]
    pub access_token: String,

    /// Hosted database holding the ranch tables.
    #[serde(default = "default_db_name")]
    pub db_name: String,
}

impl Default for MotherDuckConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            db_name: default_db_name(),
        }
    }
}

impl MotherDuckConfig {
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// Connection string handed to `duckdb::Connection::open`.
    ///
    /// Carries the token; log [`Self::target`] instead.
    #[must_use]
    pub fn connection_string(&self) -> String {
        format!("{}?motherduck_token={}", self.target(), self.access_token)
    }

    /// `md:{db_name}`, safe to print.
    #[must_use]
    pub fn target(&self) -> String {
        format!("md:{}", self.db_name)
    }
}

//! # ranch-config
//!
//! Layered configuration loading for ranchcam using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Command line overrides (`--backend`, `--project-id`)
//! 2. Environment variables (`RANCHCAM_*` prefix, `__` as separator)
//! 3. An explicit file passed with `--config`
//! 4. Project-level `.ranchcam/config.toml`
//! 5. User-level `~/.config/ranchcam/config.toml`
//! 6. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `RANCHCAM_BIGQUERY__PROJECT_ID` -> `bigquery.project_id`,
//! `RANCHCAM_WAREHOUSE__BACKEND` -> `warehouse.backend`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use ranch_config::{Overrides, RanchConfig};
//!
//! let config = RanchConfig::load_with_dotenv(None, &Overrides::default()).expect("config");
//! println!("backend: {}", config.warehouse.backend);
//! ```

mod bigquery;
mod duckdb;
mod error;
mod motherduck;
mod tables;
mod warehouse;

pub use bigquery::BigQueryConfig;
pub use duckdb::DuckDbConfig;
pub use error::ConfigError;
pub use motherduck::MotherDuckConfig;
pub use tables::TablesConfig;
pub use warehouse::{Backend, WarehouseConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "RANCHCAM_";
const PROJECT_CONFIG_PATH: &str = ".ranchcam/config.toml";

/// Values given on the command line. They beat every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub backend: Option<Backend>,
    pub project_id: Option<String>,
}

impl Overrides {
    fn apply(&self, mut figment: Figment) -> Figment {
        if let Some(backend) = self.backend {
            figment = figment.merge(Serialized::default("warehouse.backend", backend));
        }
        if let Some(project_id) = &self.project_id {
            figment = figment.merge(Serialized::default("bigquery.project_id", project_id));
        }
        figment
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RanchConfig {
    #[serde(default)]
    pub warehouse: WarehouseConfig,
    #[serde(default)]
    pub bigquery: BigQueryConfig,
    #[serde(default)]
    pub duckdb: DuckDbConfig,
    #[serde(default)]
    pub motherduck: MotherDuckConfig,
    #[serde(default)]
    pub tables: TablesConfig,
}

impl RanchConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env`
    /// file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed and
    /// [`ConfigError::InvalidValue`] if an identifier fails validation or the
    /// explicit file is missing.
    pub fn load(extra_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_overrides(extra_file, &Overrides::default())
    }

    /// Load configuration with command line overrides layered on top of
    /// every other source.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_overrides(
        extra_file: Option<&Path>,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        // Toml::file silently skips missing files; an explicit path must exist.
        if let Some(path) = extra_file
            && !path.is_file()
        {
            return Err(ConfigError::InvalidValue {
                field: "config".to_string(),
                reason: format!("file '{}' does not exist", path.display()),
            });
        }

        let config: Self = overrides.apply(Self::figment(extra_file)).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `.env` from the current directory (if present) before building
    /// the figment. This is the entry point used by the CLI.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv(
        extra_file: Option<&Path>,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load_with_overrides(extra_file, overrides)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment(extra_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit file
        if let Some(path) = extra_file {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check every identifier that ends up inside SQL text.
    ///
    /// Values bound as query parameters never pass through here; these are
    /// the project, dataset, schema and table names that cannot be bound.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field,
    /// or [`ConfigError::NotConfigured`] when the selected backend lacks
    /// required fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.warehouse.backend {
            Backend::Bigquery => {
                if !self.bigquery.is_configured() {
                    return Err(ConfigError::NotConfigured {
                        section: "bigquery".to_string(),
                    });
                }
                validate_identifier("bigquery.project_id", &self.bigquery.project_id, "-.:")?;
                validate_identifier("bigquery.dataset", &self.bigquery.dataset, "")?;
            }
            Backend::Duckdb => {
                if !self.duckdb.schema.is_empty() {
                    validate_identifier("duckdb.schema", &self.duckdb.schema, "")?;
                }
            }
        }

        validate_identifier("tables.ranch", &self.tables.ranch, "")?;
        validate_identifier("tables.cameras", &self.tables.cameras, "")?;
        validate_identifier("tables.video_events", &self.tables.video_events, "")?;
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ranchcam").join("config.toml"))
    }
}

/// Accept ASCII letters, digits, `_`, and any character in `extra`.
fn validate_identifier(field: &str, value: &str, extra: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    if let Some(bad) = value
        .chars()
        .find(|ch| !(ch.is_ascii_alphanumeric() || *ch == '_' || extra.contains(*ch)))
    {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("character {bad:?} is not allowed in '{value}'"),
        });
    }

    Ok(())
}

//! # ranch-warehouse
//!
//! Warehouse access for the ranch camera events report.
//!
//! ## Backends
//!
//! - [`BigQueryCli`]: shells out to `bq query` once per query, the way the
//!   reporting scripts always have. Credentials stay with the `bq` tool.
//! - [`DuckDbWarehouse`]: an embedded `DuckDB` connection, either a local
//!   extract or a `MotherDuck` database.
//!
//! Both implement [`Warehouse`] and run the same parameterized catalog in
//! [`query`], rendered for their [`Dialect`]. [`RanchRepository`] decodes the
//! rows into `ranch-core` entities.

pub mod bigquery;
pub mod embedded;
pub mod error;
pub mod query;
pub mod repo;
pub mod row;

pub use bigquery::BigQueryCli;
pub use embedded::DuckDbWarehouse;
pub use error::WarehouseError;
pub use query::{Dialect, Query, QueryParam, TableRefs};
pub use repo::RanchRepository;
pub use row::Row;

use ranch_config::{Backend, RanchConfig};

/// A backend able to run one catalog query and return its rows.
pub trait Warehouse {
    /// SQL rendering rules this backend expects.
    fn dialect(&self) -> Dialect;

    /// Run `query` to completion.
    ///
    /// # Errors
    ///
    /// Any failure is fatal to the report; backends do not retry.
    fn query(&self, query: &Query) -> Result<Vec<Row>, WarehouseError>;
}

/// Open the backend selected by `config.warehouse.backend`.
///
/// # Errors
///
/// Returns [`WarehouseError::Config`] if the config fails validation and
/// [`WarehouseError::DuckDb`] if a `DuckDB` database cannot be opened.
pub fn open(config: &RanchConfig) -> Result<Box<dyn Warehouse>, WarehouseError> {
    config.validate()?;
    tracing::debug!(backend = %config.warehouse.backend, "opening warehouse");

    Ok(match config.warehouse.backend {
        Backend::Bigquery => Box::new(BigQueryCli::new(&config.bigquery)),
        Backend::Duckdb => Box::new(DuckDbWarehouse::open(&config.duckdb, &config.motherduck)?),
    })
}

/// Table references for `config`, quoted for `warehouse`'s dialect.
#[must_use]
pub fn table_refs(config: &RanchConfig, warehouse: &dyn Warehouse) -> TableRefs {
    TableRefs::from_config(config, warehouse.dialect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_configured_backend() {
        let mut config = RanchConfig::default();
        assert_eq!(open(&config).expect("bigquery").dialect(), Dialect::BigQuery);

        config.warehouse.backend = Backend::Duckdb;
        assert_eq!(open(&config).expect("duckdb").dialect(), Dialect::DuckDb);
    }

    #[test]
    fn invalid_config_is_rejected_before_opening() {
        let mut config = RanchConfig::default();
        config.tables.ranch = "ranch; --".to_string();
        assert!(matches!(open(&config), Err(WarehouseError::Config(_))));
    }
}

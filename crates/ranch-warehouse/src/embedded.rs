//! `DuckDB` backend, local file or `MotherDuck`.
//!
//! Runs the same catalog queries as the BigQuery backend through prepared
//! statements with positional binding, then converts each row into the JSON
//! shape [`crate::row::decode_rows`] expects.

use duckdb::types::Value as DuckValue;
use duckdb::{Connection, params_from_iter};
use ranch_config::{DuckDbConfig, MotherDuckConfig};
use serde_json::{Number, Value};

use crate::query::{Dialect, Query};
use crate::row::Row;
use crate::{Warehouse, WarehouseError};

/// A single `DuckDB` connection held for the whole run.
pub struct DuckDbWarehouse {
    conn: Connection,
}

impl DuckDbWarehouse {
    /// Open `MotherDuck` when a token is configured, else the local database.
    ///
    /// # Errors
    ///
    /// Returns [`WarehouseError::DuckDb`] if the database cannot be opened.
    pub fn open(
        duckdb: &DuckDbConfig,
        motherduck: &MotherDuckConfig,
    ) -> Result<Self, WarehouseError> {
        let conn = if motherduck.is_configured() {
            tracing::debug!(database = %motherduck.target(), "opening MotherDuck database");
            Connection::open(motherduck.connection_string())?
        } else if duckdb.is_in_memory() {
            tracing::debug!("opening in-memory DuckDB database");
            Connection::open_in_memory()?
        } else {
            tracing::debug!(path = %duckdb.path, "opening DuckDB database");
            Connection::open(&duckdb.path)?
        };
        Ok(Self { conn })
    }

    /// Open an empty in-memory database (for fixtures and tests).
    ///
    /// # Errors
    ///
    /// Returns [`WarehouseError::DuckDb`] if `DuckDB` fails to initialize.
    pub fn open_in_memory() -> Result<Self, WarehouseError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Access the underlying `DuckDB` connection.
    ///
    /// Exposed for seeding fixture data; report reads go through
    /// [`Warehouse::query`].
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl Warehouse for DuckDbWarehouse {
    fn dialect(&self) -> Dialect {
        Dialect::DuckDb
    }

    fn query(&self, query: &Query) -> Result<Vec<Row>, WarehouseError> {
        tracing::debug!(label = query.label, "running DuckDB query");

        let mut stmt = self.conn.prepare(&query.sql)?;
        let values = query.params.iter().map(|param| param.value.as_str());
        let rows = stmt
            .query_map(params_from_iter(values), |row| {
                let mut out = Row::new();
                for (index, column) in query.columns.iter().enumerate() {
                    let value: DuckValue = row.get(index)?;
                    out.insert((*column).to_string(), to_json(value));
                }
                Ok(out)
            })?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(label = query.label, rows = rows.len(), "DuckDB query finished");
        Ok(rows)
    }
}

fn to_json(value: DuckValue) -> Value {
    match value {
        DuckValue::Null => Value::Null,
        DuckValue::Boolean(v) => Value::Bool(v),
        DuckValue::TinyInt(v) => Value::from(v),
        DuckValue::SmallInt(v) => Value::from(v),
        DuckValue::Int(v) => Value::from(v),
        DuckValue::BigInt(v) => Value::from(v),
        DuckValue::UTinyInt(v) => Value::from(v),
        DuckValue::USmallInt(v) => Value::from(v),
        DuckValue::UInt(v) => Value::from(v),
        DuckValue::UBigInt(v) => Value::from(v),
        DuckValue::HugeInt(v) => Value::String(v.to_string()),
        DuckValue::Float(v) => Number::from_f64(f64::from(v)).map_or(Value::Null, Value::Number),
        DuckValue::Double(v) => Number::from_f64(v).map_or(Value::Null, Value::Number),
        DuckValue::Text(v) | DuckValue::Enum(v) => Value::String(v),
        other => Value::String(format!("{other:?}")),
    }
}

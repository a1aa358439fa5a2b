//! BigQuery backend driven through the `bq` command line tool.
//!
//! Each query is one blocking `bq query` process. Parameters are passed as
//! `--parameter=name:STRING:value` so that the SQL text never contains user
//! input. No retries and no timeout: a hung `bq` hangs the report.

use std::process::Command;

use ranch_config::BigQueryConfig;
use serde_json::Value;

use crate::query::{Dialect, Query};
use crate::row::Row;
use crate::{Warehouse, WarehouseError};

/// Runs queries with the `bq` executable.
#[derive(Debug, Clone)]
pub struct BigQueryCli {
    command: String,
    project_id: String,
    max_rows: u32,
}

impl BigQueryCli {
    #[must_use]
    pub fn new(config: &BigQueryConfig) -> Self {
        Self {
            command: config.command.clone(),
            project_id: config.project_id.clone(),
            max_rows: config.max_rows,
        }
    }

    /// Arguments for one `bq query` invocation, SQL text last.
    #[must_use]
    pub fn args(&self, query: &Query) -> Vec<String> {
        let mut args = vec![
            "query".to_string(),
            format!("--project_id={}", self.project_id),
            "--use_legacy_sql=false".to_string(),
            "--format=json".to_string(),
            format!("--max_rows={}", self.max_rows),
        ];
        args.extend(
            query
                .params
                .iter()
                .map(|param| format!("--parameter={}:STRING:{}", param.name, param.value)),
        );
        args.push(query.sql.clone());
        args
    }
}

impl Warehouse for BigQueryCli {
    fn dialect(&self) -> Dialect {
        Dialect::BigQuery
    }

    fn query(&self, query: &Query) -> Result<Vec<Row>, WarehouseError> {
        tracing::debug!(label = query.label, command = %self.command, "running bq query");

        let output = Command::new(&self.command)
            .args(self.args(query))
            .output()
            .map_err(|source| WarehouseError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(WarehouseError::CommandFailed {
                label: query.label.to_string(),
                status: output
                    .status
                    .code()
                    .map_or_else(|| "signal".to_string(), |code| code.to_string()),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let rows = parse_output(query.label, &String::from_utf8_lossy(&output.stdout))?;
        tracing::debug!(label = query.label, rows = rows.len(), "bq query finished");
        Ok(rows)
    }
}

/// Parse `bq --format=json` stdout into rows.
///
/// `bq` prints nothing at all for some empty results, so blank output is an
/// empty row set.
///
/// # Errors
///
/// Returns [`WarehouseError::MalformedOutput`] when stdout is not JSON and
/// [`WarehouseError::Decode`] when it is JSON but not an array of objects.
pub fn parse_output(label: &str, stdout: &str) -> Result<Vec<Row>, WarehouseError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let value: Value =
        serde_json::from_str(trimmed).map_err(|source| WarehouseError::MalformedOutput {
            label: label.to_string(),
            source,
        })?;

    let Value::Array(items) = value else {
        return Err(WarehouseError::Decode {
            label: label.to_string(),
            reason: "expected a JSON array of rows".to_string(),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(row) => Ok(row),
            other => Err(WarehouseError::Decode {
                label: label.to_string(),
                reason: format!("row {index} is not an object: {other}"),
            }),
        })
        .collect()
}

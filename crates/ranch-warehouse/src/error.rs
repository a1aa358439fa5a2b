//! Warehouse error types.

/// Errors raised while querying the warehouse or decoding its rows.
#[derive(Debug, thiserror::Error)]
pub enum WarehouseError {
    /// No ranch matched the requested name.
    #[error("Ranch '{name}' not found.")]
    RanchNotFound {
        /// The name as the user typed it.
        name: String,
    },

    /// The query command could not be started.
    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The query command exited unsuccessfully.
    #[error("query '{label}' failed (exit status {status}): {stderr}")]
    CommandFailed {
        label: String,
        status: String,
        stderr: String,
    },

    /// The query command printed something that is not a JSON array of rows.
    #[error("query '{label}' returned malformed JSON: {source}")]
    MalformedOutput {
        label: String,
        #[source]
        source: serde_json::Error,
    },

    /// A row did not have the expected columns or types.
    #[error("query '{label}' returned an unexpected row: {reason}")]
    Decode { label: String, reason: String },

    /// `DuckDB` operation failed.
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    /// Backend configuration was rejected.
    #[error(transparent)]
    Config(#[from] ranch_config::ConfigError),
}

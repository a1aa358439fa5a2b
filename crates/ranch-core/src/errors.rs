//! Cross-cutting error types for ranchcam.
//!
//! Backend and configuration errors live in their own crates
//! (`WarehouseError`, `ConfigError`); they converge as `anyhow::Error` in the
//! binary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed validation before any query was issued.
    #[error("Validation error: {0}")]
    Validation(String),
}

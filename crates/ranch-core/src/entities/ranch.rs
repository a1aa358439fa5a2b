use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A ranch as resolved from the warehouse.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Ranch {
    pub id: String,
    pub name: String,
    pub city: String,
    pub state: String,
}

impl Ranch {
    /// Location line shown in the report, e.g. `Bozeman, MT`.
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}

/// A ranch name as typed by the user.
///
/// Matching against the warehouse is case-insensitive and exact, so the
/// original casing is kept untouched; only a blank name is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RanchName(String);

impl RanchName {
    /// Validate a user-supplied ranch name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the name is empty or whitespace.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.trim().is_empty() {
            return Err(CoreError::Validation(
                "ranch name must not be empty".to_string(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RanchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

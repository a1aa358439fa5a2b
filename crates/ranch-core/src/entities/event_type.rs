use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of non-deleted events of one type across a ranch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EventTypeCount {
    pub event_type: String,
    pub event_count: u64,
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Event activity of a single non-deleted camera.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CameraActivity {
    pub camera_name: String,
    /// Distinct videos with at least one non-deleted event.
    pub videos_with_events: u64,
    /// Non-deleted event rows.
    pub total_events: u64,
}

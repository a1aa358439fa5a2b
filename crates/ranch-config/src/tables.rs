//! Warehouse table names.

use serde::{Deserialize, Serialize};

fn default_ranch() -> String {
    String::from("ranch")
}

fn default_cameras() -> String {
    String::from("cameras")
}

fn default_video_events() -> String {
    String::from("video_events")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TablesConfig {
    #[serde(default = "default_ranch")]
    pub ranch: String,

    #[serde(default = "default_cameras")]
    pub cameras: String,

    #[serde(default = "default_video_events")]
    pub video_events: String,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            ranch: default_ranch(),
            cameras: default_cameras(),
            video_events: default_video_events(),
        }
    }
}

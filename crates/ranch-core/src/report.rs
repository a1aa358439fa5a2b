//! Report document model and assembler.
//!
//! The document is the only thing ranchcam emits. A downstream renderer turns
//! it into PDF or HTML, so the JSON shape here is a contract:
//!
//! ```text
//! { "title", "subtitle",
//!   "sections": [ {"type":"text", "title", "content"}
//!               | {"type":"table", "title", "columns", "rows", "total_row"?} ] }
//! ```

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::aggregate::{CameraSummary, EventTypeBreakdown};
use crate::entities::Ranch;

const TITLE_PREFIX: &str = "Ranch Camera Events Report";
const SUBTITLE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

const RANCH_SECTION_TITLE: &str = "Ranch Information";
const CAMERA_SECTION_TITLE: &str = "Cameras with Detected Events";
const CAMERA_COLUMNS: [&str; 3] = ["Camera Name", "Videos with Events", "Total Events"];
const DISTRIBUTION_SECTION_TITLE: &str = "Event Type Distribution";
const DISTRIBUTION_NOTE: &str = "A pie chart for event type distribution would typically be \
displayed here. Below is a table summarizing event types and their percentages of total \
events across the ranch.";
const EVENT_TYPE_SECTION_TITLE: &str = "Event Type Breakdown";
const EVENT_TYPE_COLUMNS: [&str; 3] = ["Event Type", "Count", "Percentage"];

/// A complete report, ready to serialize.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReportDocument {
    pub title: String,
    pub subtitle: String,
    pub sections: Vec<Section>,
}

/// One block of the report, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Section {
    Text(TextSection),
    Table(TableSection),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TextSection {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TableSection {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_row: Option<Vec<String>>,
}

impl ReportDocument {
    /// Assemble the camera events report for a resolved ranch.
    #[must_use]
    pub fn assemble(
        ranch: &Ranch,
        cameras: &CameraSummary,
        breakdown: &EventTypeBreakdown,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: format!("{TITLE_PREFIX} - {}", ranch.name),
            subtitle: format!("Generated on {}", generated_at.format(SUBTITLE_TIME_FORMAT)),
            sections: vec![
                ranch_section(ranch),
                camera_section(cameras),
                Section::Text(TextSection {
                    title: DISTRIBUTION_SECTION_TITLE.to_string(),
                    content: DISTRIBUTION_NOTE.to_string(),
                }),
                event_type_section(breakdown),
            ],
        }
    }

    /// JSON Schema describing the document shape.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(ReportDocument)
    }
}

fn ranch_section(ranch: &Ranch) -> Section {
    Section::Text(TextSection {
        title: RANCH_SECTION_TITLE.to_string(),
        content: format!("Ranch: {}\nLocation: {}", ranch.name, ranch.location()),
    })
}

fn camera_section(summary: &CameraSummary) -> Section {
    let rows = summary
        .cameras
        .iter()
        .map(|camera| {
            vec![
                camera.camera_name.clone(),
                camera.videos_with_events.to_string(),
                camera.total_events.to_string(),
            ]
        })
        .collect();

    Section::Table(TableSection {
        title: CAMERA_SECTION_TITLE.to_string(),
        columns: to_strings(&CAMERA_COLUMNS),
        rows,
        total_row: Some(vec![
            format!("Total Cameras with Events: {}", summary.camera_count),
            String::new(),
            format!("Total Events: {}", summary.total_events),
        ]),
    })
}

fn event_type_section(breakdown: &EventTypeBreakdown) -> Section {
    let rows = breakdown
        .shares
        .iter()
        .map(|share| {
            vec![
                share.event_type.clone(),
                share.count.to_string(),
                share.percentage.clone(),
            ]
        })
        .collect();

    Section::Table(TableSection {
        title: EVENT_TYPE_SECTION_TITLE.to_string(),
        columns: to_strings(&EVENT_TYPE_COLUMNS),
        rows,
        total_row: None,
    })
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

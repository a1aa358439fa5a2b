//! Row decoding shared by every backend.
//!
//! Backends hand back rows as JSON objects keyed by column name. The `bq`
//! tool renders `INT64` values as JSON strings while `DuckDB` yields numbers,
//! so count columns accept both.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

use ranch_core::{CameraActivity, EventTypeCount, Ranch};

use crate::WarehouseError;

/// One result row keyed by column name.
pub type Row = Map<String, Value>;

/// Decode every row of a query result into `T`.
///
/// # Errors
///
/// Returns [`WarehouseError::Decode`] naming the query and row index of the
/// first row that does not fit.
pub fn decode_rows<T: DeserializeOwned>(
    label: &str,
    rows: Vec<Row>,
) -> Result<Vec<T>, WarehouseError> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            serde_json::from_value(Value::Object(row)).map_err(|error| WarehouseError::Decode {
                label: label.to_string(),
                reason: format!("row {index}: {error}"),
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub(crate) struct RanchRow {
    #[serde(deserialize_with = "string_or_number")]
    uuid: String,
    ranch_name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    city: String,
    #[serde(default, deserialize_with = "nullable_string")]
    state: String,
}

impl From<RanchRow> for Ranch {
    fn from(row: RanchRow) -> Self {
        Self {
            id: row.uuid,
            name: row.ranch_name,
            city: row.city,
            state: row.state,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CameraRow {
    #[serde(default, deserialize_with = "nullable_string")]
    camera_name: String,
    #[serde(deserialize_with = "count")]
    videos_with_events: u64,
    #[serde(deserialize_with = "count")]
    total_events: u64,
}

impl From<CameraRow> for CameraActivity {
    fn from(row: CameraRow) -> Self {
        Self {
            camera_name: row.camera_name,
            videos_with_events: row.videos_with_events,
            total_events: row.total_events,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventTypeRow {
    #[serde(default, deserialize_with = "nullable_string")]
    event_type: String,
    #[serde(deserialize_with = "count")]
    event_count: u64,
}

impl From<EventTypeRow> for EventTypeCount {
    fn from(row: EventTypeRow) -> Self {
        Self {
            event_type: row.event_type,
            event_count: row.event_count,
        }
    }
}

fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_u64().ok_or_else(|| {
            de::Error::custom(format!("count {number} is not a non-negative integer"))
        }),
        Value::String(text) => text.trim().parse::<u64>().map_err(|_| {
            de::Error::custom(format!("count '{text}' is not a non-negative integer"))
        }),
        other => Err(de::Error::custom(format!("expected a count, got {other}"))),
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(de::Error::custom(format!("expected an identifier, got {other}"))),
    }
}

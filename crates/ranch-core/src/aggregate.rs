//! In-memory aggregation over warehouse rows.
//!
//! The warehouse does the grouping; this module derives the totals and the
//! percentage strings the report shows.

use crate::entities::{CameraActivity, EventTypeCount};

/// Camera rows plus their derived totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraSummary {
    pub cameras: Vec<CameraActivity>,
    pub camera_count: usize,
    pub total_events: u64,
}

impl CameraSummary {
    /// Summarize camera rows, keeping their order.
    #[must_use]
    pub fn from_rows(cameras: Vec<CameraActivity>) -> Self {
        let total_events = cameras.iter().map(|camera| camera.total_events).sum();
        Self {
            camera_count: cameras.len(),
            total_events,
            cameras,
        }
    }
}

/// One event type with its share of the ranch total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTypeShare {
    pub event_type: String,
    pub count: u64,
    pub percentage: String,
}

/// Event type rows with percentages and the grand total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTypeBreakdown {
    pub shares: Vec<EventTypeShare>,
    pub total: u64,
}

impl EventTypeBreakdown {
    /// Compute percentages for every row against the sum of all rows.
    ///
    /// Row order is preserved as returned by the warehouse (count descending).
    #[must_use]
    pub fn from_counts(counts: Vec<EventTypeCount>) -> Self {
        let total = counts.iter().map(|row| row.event_count).sum();
        let shares = counts
            .into_iter()
            .map(|row| EventTypeShare {
                percentage: format_percentage(row.event_count, total),
                count: row.event_count,
                event_type: row.event_type,
            })
            .collect();
        Self { shares, total }
    }
}

/// Format `count` as a percentage of `total` with two decimals, e.g. `42.50%`.
///
/// A zero total yields `0.00%` without dividing.
#[must_use]
pub fn format_percentage(count: u64, total: u64) -> String {
    if total == 0 {
        return String::from("0.00%");
    }
    #[allow(clippy::cast_precision_loss)] // Event counts stay far below 2^52
    let percentage = (count as f64 / total as f64) * 100.0;
    format!("{percentage:.2}%")
}

/// Compare the two independently aggregated totals.
///
/// Returns `Some((camera_total, event_type_total))` when they disagree. The
/// caller reports the mismatch; neither total is adjusted.
#[must_use]
pub const fn total_divergence(
    cameras: &CameraSummary,
    breakdown: &EventTypeBreakdown,
) -> Option<(u64, u64)> {
    if cameras.total_events == breakdown.total {
        None
    } else {
        Some((cameras.total_events, breakdown.total))
    }
}

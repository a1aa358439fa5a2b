use anyhow::Context;
use chrono::{DateTime, Utc};
use ranch_config::RanchConfig;
use ranch_core::{CameraSummary, EventTypeBreakdown, RanchName, ReportDocument};
use ranch_warehouse::{RanchRepository, table_refs};

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `ranchcam <RANCH_NAME>`.
pub fn handle(ranch_name: &str, config: &RanchConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let name = RanchName::parse(ranch_name)?;

    let warehouse = ranch_warehouse::open(config).context("failed to open warehouse")?;
    let repo = RanchRepository::new(warehouse.as_ref(), table_refs(config, warehouse.as_ref()));

    let report = generate(&repo, &name, Utc::now())?;
    output(&report, flags.format)
}

/// Resolve the ranch, run both aggregations and assemble the document.
///
/// Queries run strictly in order: ranch lookup, cameras, event types.
pub fn generate(
    repo: &RanchRepository<'_>,
    name: &RanchName,
    generated_at: DateTime<Utc>,
) -> anyhow::Result<ReportDocument> {
    // Not-found surfaces as-is so its message names the ranch.
    let ranch = repo.find_ranch(name)?;
    tracing::debug!(ranch_id = %ranch.id, ranch = %ranch.name, "ranch resolved");

    let cameras = CameraSummary::from_rows(
        repo.camera_activity(&ranch)
            .context("failed to aggregate camera activity")?,
    );
    let breakdown = EventTypeBreakdown::from_counts(
        repo.event_type_counts(&ranch)
            .context("failed to aggregate event types")?,
    );

    if let Some((camera_total, event_type_total)) =
        ranch_core::aggregate::total_divergence(&cameras, &breakdown)
    {
        tracing::warn!(
            ranch = %ranch.name,
            camera_total,
            event_type_total,
            "event type total differs from camera event total"
        );
    }

    Ok(ReportDocument::assemble(
        &ranch,
        &cameras,
        &breakdown,
        generated_at,
    ))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use ranch_config::Backend;
    use ranch_core::Section;
    use ranch_warehouse::{DuckDbWarehouse, WarehouseError};

    use super::*;

    const FIXTURE: &str = include_str!("../../../ranch-warehouse/tests/fixtures/ranches.sql");

    fn seeded() -> (DuckDbWarehouse, RanchConfig) {
        let warehouse = DuckDbWarehouse::open_in_memory().expect("open duckdb");
        warehouse.conn().execute_batch(FIXTURE).expect("seed fixture");
        let mut config = RanchConfig::default();
        config.warehouse.backend = Backend::Duckdb;
        (warehouse, config)
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn generates_blue_sky_report() {
        let (warehouse, config) = seeded();
        let repo = RanchRepository::new(&warehouse, table_refs(&config, &warehouse));

        let report = generate(&repo, &RanchName::parse("blue sky").expect("name"), at())
            .expect("report");

        assert_eq!(report.title, "Ranch Camera Events Report - Blue Sky");
        assert_eq!(report.subtitle, "Generated on 2024-05-01 08:30:00 UTC");
        let Section::Table(cameras) = &report.sections[1] else {
            panic!("second section should be the camera table");
        };
        assert_eq!(cameras.rows, vec![vec!["A", "2", "3"]]);
        let Section::Table(types) = &report.sections[3] else {
            panic!("fourth section should be the event type table");
        };
        assert_eq!(types.rows, vec![vec!["motion", "3", "100.00%"]]);
    }

    #[test]
    fn divergent_totals_do_not_change_the_report() {
        let (warehouse, config) = seeded();
        let repo = RanchRepository::new(&warehouse, table_refs(&config, &warehouse));

        let report = generate(&repo, &RanchName::parse("Sunset Ranch").expect("name"), at())
            .expect("report");

        let Section::Table(cameras) = &report.sections[1] else {
            panic!("second section should be the camera table");
        };
        assert_eq!(
            cameras.total_row,
            Some(vec![
                "Total Cameras with Events: 2".to_string(),
                String::new(),
                "Total Events: 3".to_string(),
            ])
        );
        let Section::Table(types) = &report.sections[3] else {
            panic!("fourth section should be the event type table");
        };
        assert_eq!(
            types.rows,
            vec![
                vec!["animal", "2", "50.00%"],
                vec!["person", "1", "25.00%"],
                vec!["vehicle", "1", "25.00%"],
            ]
        );
    }

    #[test]
    fn unknown_ranch_keeps_not_found_error() {
        let (warehouse, config) = seeded();
        let repo = RanchRepository::new(&warehouse, table_refs(&config, &warehouse));

        let error = generate(&repo, &RanchName::parse("Nowhere").expect("name"), at())
            .expect_err("not found");
        assert!(matches!(
            error.downcast_ref::<WarehouseError>(),
            Some(WarehouseError::RanchNotFound { .. })
        ));
        assert_eq!(error.to_string(), "Ranch 'Nowhere' not found.");
    }
}

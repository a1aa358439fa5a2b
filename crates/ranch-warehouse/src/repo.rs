//! Typed read API over a [`Warehouse`].
//!
//! Three queries, issued one after another by the caller. Every method blocks
//! until the backend answers; nothing is cached between calls.

use ranch_core::{CameraActivity, EventTypeCount, Ranch, RanchName};

use crate::query::{self, TableRefs};
use crate::row::{CameraRow, EventTypeRow, RanchRow, decode_rows};
use crate::{Warehouse, WarehouseError};

pub struct RanchRepository<'a> {
    warehouse: &'a dyn Warehouse,
    tables: TableRefs,
}

impl<'a> RanchRepository<'a> {
    #[must_use]
    pub const fn new(warehouse: &'a dyn Warehouse, tables: TableRefs) -> Self {
        Self { warehouse, tables }
    }

    /// Resolve a ranch by case-insensitive exact name.
    ///
    /// Duplicate names are not disambiguated: the first row the backend
    /// returns wins.
    ///
    /// # Errors
    ///
    /// Returns [`WarehouseError::RanchNotFound`] when nothing matches, or any
    /// backend/decoding error.
    pub fn find_ranch(&self, name: &RanchName) -> Result<Ranch, WarehouseError> {
        let query = query::find_ranch(self.warehouse.dialect(), &self.tables, name.as_str());
        let rows = self.warehouse.query(&query)?;
        decode_rows::<RanchRow>(query.label, rows)?
            .into_iter()
            .next()
            .map(Ranch::from)
            .ok_or_else(|| WarehouseError::RanchNotFound {
                name: name.to_string(),
            })
    }

    /// Per-camera activity for the ranch, ordered by camera name.
    ///
    /// # Errors
    ///
    /// Returns any backend or decoding error.
    pub fn camera_activity(&self, ranch: &Ranch) -> Result<Vec<CameraActivity>, WarehouseError> {
        let query = query::camera_activity(self.warehouse.dialect(), &self.tables, &ranch.id);
        let rows = self.warehouse.query(&query)?;
        Ok(decode_rows::<CameraRow>(query.label, rows)?
            .into_iter()
            .map(CameraActivity::from)
            .collect())
    }

    /// Event counts per type for the ranch, largest first.
    ///
    /// # Errors
    ///
    /// Returns any backend or decoding error.
    pub fn event_type_counts(&self, ranch: &Ranch) -> Result<Vec<EventTypeCount>, WarehouseError> {
        let query = query::event_type_counts(self.warehouse.dialect(), &self.tables, &ranch.id);
        let rows = self.warehouse.query(&query)?;
        Ok(decode_rows::<EventTypeRow>(query.label, rows)?
            .into_iter()
            .map(EventTypeCount::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;
    use ranch_config::RanchConfig;
    use serde_json::{Value, json};

    use super::*;
    use crate::query::{Dialect, Query};
    use crate::row::Row;

    /// Replays canned `bq`-shaped rows and records the queries it saw.
    struct CannedWarehouse {
        responses: RefCell<Vec<Value>>,
        seen: RefCell<Vec<Query>>,
    }

    impl CannedWarehouse {
        fn new(responses: Vec<Value>) -> Self {
            Self {
                responses: RefCell::new(responses),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Warehouse for CannedWarehouse {
        fn dialect(&self) -> Dialect {
            Dialect::BigQuery
        }

        fn query(&self, query: &Query) -> Result<Vec<Row>, WarehouseError> {
            self.seen.borrow_mut().push(query.clone());
            let next = self.responses.borrow_mut().remove(0);
            let Value::Array(items) = next else {
                panic!("canned response must be an array");
            };
            Ok(items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(row) => Some(row),
                    _ => None,
                })
                .collect())
        }
    }

    fn tables() -> TableRefs {
        TableRefs::from_config(&RanchConfig::default(), Dialect::BigQuery)
    }

    #[test]
    fn not_found_names_the_ranch() {
        let warehouse = CannedWarehouse::new(vec![json!([])]);
        let repo = RanchRepository::new(&warehouse, tables());
        let name = RanchName::parse("Nowhere Ranch").expect("name");

        let error = repo.find_ranch(&name).expect_err("no rows");
        assert_eq!(error.to_string(), "Ranch 'Nowhere Ranch' not found.");
    }

    #[test]
    fn first_match_wins() {
        let warehouse = CannedWarehouse::new(vec![json!([
            {"uuid": "r-1", "ranch_name": "Blue Sky", "city": "Bozeman", "state": "MT"},
            {"uuid": "r-2", "ranch_name": "BLUE SKY", "city": "Cody", "state": "WY"}
        ])]);
        let repo = RanchRepository::new(&warehouse, tables());

        let ranch = repo
            .find_ranch(&RanchName::parse("blue sky").expect("name"))
            .expect("found");
        assert_eq!(ranch.id, "r-1");
    }

    #[test]
    fn aggregators_bind_the_resolved_ranch_id() {
        let warehouse = CannedWarehouse::new(vec![
            json!([{"camera_name": "A", "videos_with_events": "2", "total_events": "3"}]),
            json!([{"event_type": "motion", "event_count": "3"}]),
        ]);
        let repo = RanchRepository::new(&warehouse, tables());
        let ranch = Ranch {
            id: "r-42".into(),
            name: "Blue Sky".into(),
            city: "Bozeman".into(),
            state: "MT".into(),
        };

        let cameras = repo.camera_activity(&ranch).expect("cameras");
        let types = repo.event_type_counts(&ranch).expect("types");

        assert_eq!(cameras[0].total_events, 3);
        assert_eq!(types[0].event_type, "motion");
        let seen = warehouse.seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|query| query.params[0].value == "r-42"));
    }
}

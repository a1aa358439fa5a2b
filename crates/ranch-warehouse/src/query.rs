//! Parameterized query catalog.
//!
//! User-supplied values (the ranch name, the resolved ranch id) are always
//! bound as parameters. Only table identifiers are spliced into SQL text, and
//! those come from validated configuration.

use ranch_config::RanchConfig;

/// SQL rendering rules of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// GoogleSQL: backtick-qualified tables, `@name` parameters.
    BigQuery,
    /// `DuckDB`: double-quoted identifiers, positional `?` parameters.
    DuckDb,
}

impl Dialect {
    /// Placeholder for a bound parameter.
    ///
    /// `DuckDB` binds positionally, so every catalog query references each
    /// parameter exactly once and in declaration order.
    #[must_use]
    pub fn placeholder(self, name: &str) -> String {
        match self {
            Self::BigQuery => format!("@{name}"),
            Self::DuckDb => String::from("?"),
        }
    }
}

/// Fully qualified, dialect-quoted table references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRefs {
    pub ranch: String,
    pub cameras: String,
    pub video_events: String,
}

impl TableRefs {
    /// Qualify the configured table names for `dialect`.
    ///
    /// Expects a config that passed [`RanchConfig::validate`].
    #[must_use]
    pub fn from_config(config: &RanchConfig, dialect: Dialect) -> Self {
        let qualify = |table: &str| match dialect {
            Dialect::BigQuery => format!(
                "`{}.{}.{}`",
                config.bigquery.project_id, config.bigquery.dataset, table
            ),
            Dialect::DuckDb if config.duckdb.schema.is_empty() => format!("\"{table}\""),
            Dialect::DuckDb => format!("\"{}\".\"{table}\"", config.duckdb.schema),
        };

        Self {
            ranch: qualify(&config.tables.ranch),
            cameras: qualify(&config.tables.cameras),
            video_events: qualify(&config.tables.video_events),
        }
    }
}

/// A value bound to a named query parameter. Always a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    pub name: &'static str,
    pub value: String,
}

/// A rendered query ready for a [`crate::Warehouse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Short name used in logs and errors.
    pub label: &'static str,
    pub sql: String,
    pub params: Vec<QueryParam>,
    /// Result column names in select order.
    pub columns: &'static [&'static str],
}

pub const RANCH_COLUMNS: &[&str] = &["uuid", "ranch_name", "city", "state"];
pub const CAMERA_COLUMNS: &[&str] = &["camera_name", "videos_with_events", "total_events"];
pub const EVENT_TYPE_COLUMNS: &[&str] = &["event_type", "event_count"];

/// Case-insensitive exact match on the ranch name, first row only.
#[must_use]
pub fn find_ranch(dialect: Dialect, tables: &TableRefs, ranch_name: &str) -> Query {
    let sql = format!(
        "SELECT uuid, ranch_name, city, state
FROM {ranch}
WHERE LOWER(ranch_name) = LOWER({name})
LIMIT 1",
        ranch = tables.ranch,
        name = dialect.placeholder("ranch_name"),
    );

    Query {
        label: "find_ranch",
        sql,
        params: vec![QueryParam {
            name: "ranch_name",
            value: ranch_name.to_string(),
        }],
        columns: RANCH_COLUMNS,
    }
}

/// Per-camera distinct videos and event rows for non-deleted cameras and
/// events. Cameras without events drop out of the join and the `HAVING`.
///
/// Rows are keyed by display name: cameras sharing a name merge into one row.
#[must_use]
pub fn camera_activity(dialect: Dialect, tables: &TableRefs, ranch_id: &str) -> Query {
    let sql = format!(
        "SELECT
    c.display_name AS camera_name,
    COUNT(DISTINCT ve.video_uuid) AS videos_with_events,
    COUNT(ve.uuid) AS total_events
FROM {cameras} AS c
JOIN {video_events} AS ve
    ON c.uuid = ve.camera_id
WHERE c.ranch_uuid = {ranch_id}
    AND c.is_deleted = FALSE
    AND ve.is_deleted = FALSE
GROUP BY c.display_name
HAVING COUNT(ve.uuid) > 0
ORDER BY c.display_name",
        cameras = tables.cameras,
        video_events = tables.video_events,
        ranch_id = dialect.placeholder("ranch_id"),
    );

    Query {
        label: "camera_activity",
        sql,
        params: vec![QueryParam {
            name: "ranch_id",
            value: ranch_id.to_string(),
        }],
        columns: CAMERA_COLUMNS,
    }
}

/// Non-deleted event counts per type for the ranch, largest first.
#[must_use]
pub fn event_type_counts(dialect: Dialect, tables: &TableRefs, ranch_id: &str) -> Query {
    let sql = format!(
        "SELECT
    event_type,
    COUNT(uuid) AS event_count
FROM {video_events}
WHERE ranch_id = {ranch_id}
    AND is_deleted = FALSE
GROUP BY event_type
ORDER BY event_count DESC, event_type",
        video_events = tables.video_events,
        ranch_id = dialect.placeholder("ranch_id"),
    );

    Query {
        label: "event_type_counts",
        sql,
        params: vec![QueryParam {
            name: "ranch_id",
            value: ranch_id.to_string(),
        }],
        columns: EVENT_TYPE_COLUMNS,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn bigquery_tables() -> TableRefs {
        TableRefs::from_config(&RanchConfig::default(), Dialect::BigQuery)
    }

    #[test]
    fn bigquery_tables_are_backtick_qualified() {
        assert_eq!(
            bigquery_tables().cameras,
            "`frontiersmarketplace.public.cameras`"
        );
    }

    #[test]
    fn duckdb_tables_respect_optional_schema() {
        let mut config = RanchConfig::default();
        let plain = TableRefs::from_config(&config, Dialect::DuckDb);
        assert_eq!(plain.ranch, "\"ranch\"");

        config.duckdb.schema = "public".to_string();
        let qualified = TableRefs::from_config(&config, Dialect::DuckDb);
        assert_eq!(qualified.video_events, "\"public\".\"video_events\"");
    }

    #[test]
    fn ranch_name_is_bound_not_interpolated() {
        let hostile = "x') OR 1=1 --";
        let query = find_ranch(Dialect::BigQuery, &bigquery_tables(), hostile);

        assert!(!query.sql.contains(hostile));
        assert!(query.sql.contains("LOWER(@ranch_name)"));
        assert_eq!(
            query.params,
            vec![QueryParam {
                name: "ranch_name",
                value: hostile.to_string(),
            }]
        );
    }

    #[test]
    fn duckdb_uses_positional_placeholders() {
        let tables = TableRefs::from_config(&RanchConfig::default(), Dialect::DuckDb);
        let query = camera_activity(Dialect::DuckDb, &tables, "r-1");
        assert!(query.sql.contains("c.ranch_uuid = ?"));
        assert!(!query.sql.contains('@'));
        assert_eq!(query.sql.matches('?').count(), query.params.len());
    }

    #[test]
    fn cameras_group_by_display_name() {
        let query = camera_activity(Dialect::BigQuery, &bigquery_tables(), "r-1");
        assert!(query.sql.contains("GROUP BY c.display_name\n"));
        assert!(query.sql.ends_with("ORDER BY c.display_name"));
    }

    #[test]
    fn catalog_queries_filter_soft_deletes() {
        let tables = bigquery_tables();
        let cameras = camera_activity(Dialect::BigQuery, &tables, "r-1");
        assert!(cameras.sql.contains("c.is_deleted = FALSE"));
        assert!(cameras.sql.contains("ve.is_deleted = FALSE"));

        let types = event_type_counts(Dialect::BigQuery, &tables, "r-1");
        assert!(types.sql.contains("is_deleted = FALSE"));
        assert!(types.sql.contains("ORDER BY event_count DESC"));
    }

    #[test]
    fn columns_match_select_aliases() {
        let tables = bigquery_tables();
        for query in [
            find_ranch(Dialect::BigQuery, &tables, "Blue Sky"),
            camera_activity(Dialect::BigQuery, &tables, "r-1"),
            event_type_counts(Dialect::BigQuery, &tables, "r-1"),
        ] {
            for column in query.columns {
                assert!(
                    query.sql.contains(column),
                    "{} should select {column}",
                    query.label
                );
            }
        }
    }
}

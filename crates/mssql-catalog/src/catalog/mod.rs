//! Typed readers for SQL Server catalog views, and a registry of them.
//!
//! Each view is declared once with `catalog_view!`, which generates its
//! record, SQL, ordinals and reader. [`ViewCatalog`] lists the views so
//! tooling can look them up by name.

mod macros;

pub mod columns;
pub mod databases;
pub mod dm_db;
pub mod dm_exec;
pub mod dm_os;
pub mod objects;
pub mod query_store;
pub mod structure;

pub use columns::{
    Column, ColumnOrdinal, ColumnsReader, ComputedColumn, ComputedColumnOrdinal,
    ComputedColumnsReader, IdentityColumn, IdentityColumnOrdinal, IdentityColumnsReader,
    MaskedColumn, MaskedColumnOrdinal, MaskedColumnsReader,
};
pub use databases::{Database, DatabaseOrdinal, DatabasesReader};
pub use dm_db::{DmDbXtpCheckpointStats, DmDbXtpCheckpointStatsOrdinal, DmDbXtpCheckpointStatsReader};
pub use dm_exec::{
    DmExecQueryStats, DmExecQueryStatsOrdinal, DmExecQueryStatsReader, DmExecRequest,
    DmExecRequestOrdinal, DmExecRequestsReader,
};
pub use dm_os::{
    DmOsMemoryBroker, DmOsMemoryBrokerOrdinal, DmOsMemoryBrokersReader,
    DmResourceGovernorResourcePool, DmResourceGovernorResourcePoolOrdinal,
    DmResourceGovernorResourcePoolsReader,
};
pub use objects::{
    AllObject, AllObjectOrdinal, AllObjectsReader, ObjectType, Schema, SchemaObject,
    SchemaObjectOrdinal, SchemaObjectsReader, SchemaOrdinal, SchemasReader, SystemObject,
    SystemObjectOrdinal, SystemObjectsReader, Table, TableOrdinal, TablesReader, View,
    ViewOrdinal, ViewsReader,
};
pub use query_store::{
    QueryStoreRuntimeStats, QueryStoreRuntimeStatsOrdinal, QueryStoreRuntimeStatsReader,
};
pub use structure::{
    CheckConstraint, CheckConstraintOrdinal, CheckConstraintsReader, DefaultConstraint,
    DefaultConstraintOrdinal, DefaultConstraintsReader, ForeignKey, ForeignKeyColumn,
    ForeignKeyColumnOrdinal, ForeignKeyColumnsReader, ForeignKeyOrdinal, ForeignKeysReader,
    Index, IndexColumn, IndexColumnOrdinal, IndexColumnsReader, IndexOrdinal, IndexesReader,
    Partition, PartitionOrdinal, PartitionsReader,
};

use glob::Pattern;
use serde::Serialize;
use tracing::debug;

use crate::config::CatalogConfig;
use crate::core::ViewDescriptor;
use crate::cursor::{MemoryCursor, ResultSetSnapshot};
use crate::error::{CatalogError, Result};
use crate::reader::{CatalogRecord, ViewReader};

type MapFn = fn(MemoryCursor, bool) -> Result<serde_json::Value>;

/// A registered catalog view.
#[derive(Clone, Serialize)]
pub struct CatalogEntry {
    /// Group the view belongs to (`objects`, `columns`, `dm_exec`, ...).
    pub family: &'static str,
    #[serde(flatten)]
    pub view: &'static ViewDescriptor,
    #[serde(skip)]
    map: MapFn,
}

impl CatalogEntry {
    fn new<R: CatalogRecord + Serialize>(family: &'static str) -> Self {
        Self {
            family,
            view: R::view(),
            map: map_records::<R>,
        }
    }

    /// Read a snapshot through this view's reader and return the records
    /// as a JSON array.
    pub fn map_snapshot(&self, snapshot: ResultSetSnapshot, checked: bool) -> Result<serde_json::Value> {
        let cursor = snapshot.into_cursor(self.view)?;
        (self.map)(cursor, checked)
    }
}

impl std::fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("family", &self.family)
            .field("view", &self.view.qualified_name())
            .finish()
    }
}

fn map_records<R: CatalogRecord + Serialize>(
    cursor: MemoryCursor,
    checked: bool,
) -> Result<serde_json::Value> {
    let mut reader = if checked {
        ViewReader::<R, _>::checked(cursor, true)?
    } else {
        ViewReader::<R, _>::new(cursor, true)
    };
    let records = reader.to_list()?;
    Ok(serde_json::to_value(records)?)
}

macro_rules! entries {
    ($($family:literal => [$($record:ty),* $(,)?]),* $(,)?) => {
        vec![$($(CatalogEntry::new::<$record>($family),)*)*]
    };
}

/// Registry of catalog views, in registration order.
#[derive(Debug, Clone)]
pub struct ViewCatalog {
    entries: Vec<CatalogEntry>,
}

impl ViewCatalog {
    /// Every view this crate has a reader for.
    pub fn builtin() -> Self {
        let entries = entries![
            "objects" => [SchemaObject, AllObject, SystemObject, Schema, Table, View],
            "columns" => [Column, IdentityColumn, ComputedColumn, MaskedColumn],
            "structure" => [
                Index,
                IndexColumn,
                Partition,
                ForeignKey,
                ForeignKeyColumn,
                CheckConstraint,
                DefaultConstraint,
            ],
            "databases" => [Database],
            "dm_exec" => [DmExecRequest, DmExecQueryStats],
            "dm_os" => [DmOsMemoryBroker, DmResourceGovernorResourcePool],
            "dm_db" => [DmDbXtpCheckpointStats],
            "query_store" => [QueryStoreRuntimeStats],
        ];
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Look up a view by `sys.name`, `[sys].[name]` or bare name, ignoring case.
    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.view.matches_name(name))
    }

    /// Like [`find`](Self::find), but an unknown name is an error.
    pub fn get(&self, name: &str) -> Result<&CatalogEntry> {
        self.find(name)
            .ok_or_else(|| CatalogError::UnknownView(name.to_string()))
    }

    /// Keep the views matching the include patterns (all views when there are
    /// none) and not matching any exclude pattern.
    ///
    /// Patterns are globs matched against both `sys.name` and the bare name.
    pub fn filtered(&self, config: &CatalogConfig) -> Result<Self> {
        let include = compile_patterns(&config.include_views)?;
        let exclude = compile_patterns(&config.exclude_views)?;

        let entries: Vec<CatalogEntry> = self
            .entries
            .iter()
            .filter(|e| include.is_empty() || matches_any(&include, e.view))
            .filter(|e| !matches_any(&exclude, e.view))
            .cloned()
            .collect();

        debug!(
            "Catalog filter kept {} of {} views",
            entries.len(),
            self.entries.len()
        );
        Ok(Self { entries })
    }
}

impl Default for ViewCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

pub(crate) fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(&p.to_ascii_lowercase())
                .map_err(|e| CatalogError::Config(format!("Invalid view pattern '{}': {}", p, e)))
        })
        .collect()
}

fn matches_any(patterns: &[Pattern], view: &ViewDescriptor) -> bool {
    let qualified = view.qualified_name().to_ascii_lowercase();
    let bare = view.name.to_ascii_lowercase();
    patterns
        .iter()
        .any(|p| p.matches(&qualified) || p.matches(&bare))
}

/// One record of `R` read from a snapshot row: non-nullable columns get a
/// zero value of their type, nullable ones NULL, unless named in `values`.
#[cfg(test)]
pub(crate) fn sample_record<R: CatalogRecord>(values: &[(&str, serde_json::Value)]) -> R {
    use crate::core::SqlType;
    use serde_json::{json, Value};

    let view = R::view();
    let row = view
        .columns
        .iter()
        .map(|c| {
            if let Some((_, v)) = values.iter().find(|(name, _)| *name == c.name) {
                return v.clone();
            }
            if c.nullable {
                return Value::Null;
            }
            match c.sql_type {
                SqlType::Bool => json!(false),
                SqlType::U8 | SqlType::I16 | SqlType::I32 | SqlType::I64 => json!(0),
                SqlType::F32 | SqlType::F64 => json!(0.0),
                SqlType::Decimal => json!("0"),
                SqlType::Text => json!(""),
                SqlType::Bytes => json!("0x"),
                SqlType::Uuid => json!("00000000-0000-0000-0000-000000000000"),
                SqlType::DateTime => json!("2024-01-01T00:00:00"),
                SqlType::DateTimeOffset => json!("2024-01-01T00:00:00+00:00"),
                SqlType::Date => json!("2024-01-01"),
                SqlType::Time => json!("00:00:00"),
            }
        })
        .collect();
    let snapshot = ResultSetSnapshot {
        columns: view.columns.iter().map(|c| c.name.to_string()).collect(),
        rows: vec![row],
        ..Default::default()
    };

    let cursor = snapshot.into_cursor(view).unwrap();
    ViewReader::<R, _>::checked(cursor, true)
        .unwrap()
        .first()
        .unwrap()
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_catalog() {
        let catalog = ViewCatalog::builtin();
        assert_eq!(catalog.len(), 24);

        let names: HashSet<String> = catalog.iter().map(|e| e.view.qualified_name()).collect();
        assert_eq!(names.len(), 24);
        assert_eq!(
            catalog.iter().next().map(|e| e.view.qualified_name()),
            Some("sys.objects".to_string())
        );
    }

    #[test]
    fn test_every_view_is_consistent() {
        for entry in ViewCatalog::builtin().iter() {
            let view = entry.view;
            assert!(view.sql.starts_with(&format!("SELECT {}.[", view.alias)));
            assert!(view.sql.ends_with(&format!("FROM {} {}", view.bracketed_name(), view.alias)));
            assert_eq!(
                view.sql.matches(&format!("\n      ,{}.[", view.alias)).count() + 1,
                view.column_count(),
                "{}",
                view.qualified_name()
            );
            for (ordinal, column) in view.columns.iter().enumerate() {
                assert_eq!(view.ordinal_of(column.name).unwrap(), ordinal);
            }
        }
    }

    #[test]
    fn test_find() {
        let catalog = ViewCatalog::builtin();
        assert_eq!(catalog.find("[sys].[partitions]").map(|e| e.family), Some("structure"));
        assert_eq!(catalog.find("SYS.DM_OS_MEMORY_BROKERS").map(|e| e.view.alias), Some("domb"));
        assert!(catalog.find("all_objects").is_some());
        assert!(catalog.find("sys.nope").is_none());
        assert!(matches!(catalog.get("nope"), Err(CatalogError::UnknownView(_))));
    }

    #[test]
    fn test_object_families_are_distinct() {
        let catalog = ViewCatalog::builtin();
        let objects = catalog.get("sys.objects").unwrap();
        let all = catalog.get("sys.all_objects").unwrap();
        assert_ne!(objects.view.sql, all.view.sql);
        assert_eq!(objects.view.columns, all.view.columns);
    }

    #[test]
    fn test_filtered() {
        let catalog = ViewCatalog::builtin();
        let config = CatalogConfig {
            include_views: vec!["sys.dm_*".into()],
            exclude_views: vec!["dm_exec_query_stats".into()],
        };
        let filtered = catalog.filtered(&config).unwrap();
        let names: Vec<&str> = filtered.iter().map(|e| e.view.name).collect();
        assert_eq!(
            names,
            vec![
                "dm_exec_requests",
                "dm_os_memory_brokers",
                "dm_resource_governor_resource_pools",
                "dm_db_xtp_checkpoint_stats",
            ]
        );

        let everything = catalog.filtered(&CatalogConfig::default()).unwrap();
        assert_eq!(everything.len(), catalog.len());
    }

    #[test]
    fn test_invalid_pattern() {
        let config = CatalogConfig {
            include_views: vec!["sys.[".into()],
            exclude_views: vec![],
        };
        assert!(matches!(
            ViewCatalog::builtin().filtered(&config),
            Err(CatalogError::Config(_))
        ));
    }

    #[test]
    fn test_map_snapshot() {
        let snapshot = ResultSetSnapshot::from_json(
            r#"{"columns": ["name", "schema_id", "principal_id"],
                "rows": [["dbo", 1, 1], ["guest", 2, null]]}"#,
        )
        .unwrap();
        let entry = ViewCatalog::builtin().get("sys.schemas").unwrap().clone();
        let json = entry.map_snapshot(snapshot, true).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"name": "dbo", "schema_id": 1, "principal_id": 1},
                {"name": "guest", "schema_id": 2, "principal_id": null}
            ])
        );
    }

    #[test]
    fn test_entry_serializes_descriptor() {
        let catalog = ViewCatalog::builtin();
        let entry = catalog.get("sys.schemas").unwrap();
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json["family"], "objects");
        assert_eq!(json["alias"], "s");
        assert_eq!(json["columns"][2]["sql_type"], "int");
        assert_eq!(json["columns"][2]["nullable"], true);
    }

    #[test]
    fn test_reader_aliases_are_reexported() {
        let cursor = MemoryCursor::new(
            Partition::COLUMNS.iter().map(|c| c.name.to_string()).collect(),
        );
        let mut reader = PartitionsReader::checked(cursor, true).unwrap();
        assert!(reader.to_list().unwrap().is_empty());
        assert_eq!(PartitionOrdinal::rows.ordinal(), 5);
        assert_eq!(SchemasReader::<MemoryCursor>::sql(), Schema::SQL);
        assert_eq!(DmOsMemoryBrokerOrdinal::ALL.len(), DmOsMemoryBroker::COLUMNS.len());
    }

    #[test]
    fn test_sample_record() {
        let schema: Schema = sample_record(&[("name", serde_json::json!("dbo"))]);
        assert_eq!(schema.name, "dbo");
        assert_eq!(schema.schema_id, 0);
        assert_eq!(schema.principal_id, None);
    }
}

//! Schema-scoped objects: `sys.objects` and the views that extend it.
//!
//! `sys.objects`, `sys.all_objects` and `sys.system_objects` share a layout
//! but return different row sets (user objects, user plus system objects,
//! system objects only), so each has its own record type.

use std::fmt;

use chrono::NaiveDateTime;

use super::macros::{catalog_view, object_type_accessor};

/// Object type code from the `type` column (`char(2)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    AggregateFunction,
    CheckConstraint,
    DefaultConstraint,
    ForeignKeyConstraint,
    SqlScalarFunction,
    ClrScalarFunction,
    ClrTableValuedFunction,
    SqlInlineTableValuedFunction,
    InternalTable,
    SqlStoredProcedure,
    ClrStoredProcedure,
    PlanGuide,
    PrimaryKeyConstraint,
    Rule,
    ReplicationFilterProcedure,
    SystemTable,
    Synonym,
    SequenceObject,
    UserTable,
    View,
    EdgeConstraint,
    ServiceQueue,
    ClrTrigger,
    SqlTableValuedFunction,
    SqlTrigger,
    TableType,
    UniqueConstraint,
    ExtendedStoredProcedure,
    StatsTree,
    ExternalTable,
}

impl ObjectType {
    const CODES: [(ObjectType, &'static str, &'static str); 30] = [
        (ObjectType::AggregateFunction, "AF", "AGGREGATE_FUNCTION"),
        (ObjectType::CheckConstraint, "C", "CHECK_CONSTRAINT"),
        (ObjectType::DefaultConstraint, "D", "DEFAULT_CONSTRAINT"),
        (ObjectType::ForeignKeyConstraint, "F", "FOREIGN_KEY_CONSTRAINT"),
        (ObjectType::SqlScalarFunction, "FN", "SQL_SCALAR_FUNCTION"),
        (ObjectType::ClrScalarFunction, "FS", "CLR_SCALAR_FUNCTION"),
        (ObjectType::ClrTableValuedFunction, "FT", "CLR_TABLE_VALUED_FUNCTION"),
        (ObjectType::SqlInlineTableValuedFunction, "IF", "SQL_INLINE_TABLE_VALUED_FUNCTION"),
        (ObjectType::InternalTable, "IT", "INTERNAL_TABLE"),
        (ObjectType::SqlStoredProcedure, "P", "SQL_STORED_PROCEDURE"),
        (ObjectType::ClrStoredProcedure, "PC", "CLR_STORED_PROCEDURE"),
        (ObjectType::PlanGuide, "PG", "PLAN_GUIDE"),
        (ObjectType::PrimaryKeyConstraint, "PK", "PRIMARY_KEY_CONSTRAINT"),
        (ObjectType::Rule, "R", "RULE"),
        (ObjectType::ReplicationFilterProcedure, "RF", "REPLICATION_FILTER_PROCEDURE"),
        (ObjectType::SystemTable, "S", "SYSTEM_TABLE"),
        (ObjectType::Synonym, "SN", "SYNONYM"),
        (ObjectType::SequenceObject, "SO", "SEQUENCE_OBJECT"),
        (ObjectType::UserTable, "U", "USER_TABLE"),
        (ObjectType::View, "V", "VIEW"),
        (ObjectType::EdgeConstraint, "EC", "EDGE_CONSTRAINT"),
        (ObjectType::ServiceQueue, "SQ", "SERVICE_QUEUE"),
        (ObjectType::ClrTrigger, "TA", "CLR_TRIGGER"),
        (ObjectType::SqlTableValuedFunction, "TF", "SQL_TABLE_VALUED_FUNCTION"),
        (ObjectType::SqlTrigger, "TR", "SQL_TRIGGER"),
        (ObjectType::TableType, "TT", "TYPE_TABLE"),
        (ObjectType::UniqueConstraint, "UQ", "UNIQUE_CONSTRAINT"),
        (ObjectType::ExtendedStoredProcedure, "X", "EXTENDED_STORED_PROCEDURE"),
        (ObjectType::StatsTree, "ST", "STATS_TREE"),
        (ObjectType::ExternalTable, "ET", "EXTERNAL_TABLE"),
    ];

    /// Parse a type code. The column is `char(2)`, so single-letter codes
    /// arrive padded (`"U "`).
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::CODES
            .iter()
            .find(|(_, c, _)| c.eq_ignore_ascii_case(code))
            .map(|(t, _, _)| *t)
    }

    pub fn code(self) -> &'static str {
        self.entry().1
    }

    /// The matching `type_desc` value, e.g. `USER_TABLE`.
    pub fn description(self) -> &'static str {
        self.entry().2
    }

    fn entry(self) -> &'static (ObjectType, &'static str, &'static str) {
        &Self::CODES[self as usize]
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

catalog_view! {
    /// Row of `sys.objects`: one per user-defined, schema-scoped object.
    record SchemaObject;
    reader SchemaObjectsReader;
    ordinals SchemaObjectOrdinal;
    view "sys"."objects" as "o";
    columns {
        name: String,
        object_id: i32,
        principal_id: Option<i32>,
        schema_id: i32,
        parent_object_id: i32,
        type_code: String = "type",
        type_desc: Option<String>,
        create_date: NaiveDateTime,
        modify_date: NaiveDateTime,
        is_ms_shipped: bool,
        is_published: bool,
        is_schema_published: bool,
    }
}

catalog_view! {
    /// Row of `sys.all_objects`: user-defined and system objects.
    record AllObject;
    reader AllObjectsReader;
    ordinals AllObjectOrdinal;
    view "sys"."all_objects" as "ao";
    columns {
        name: String,
        object_id: i32,
        principal_id: Option<i32>,
        schema_id: i32,
        parent_object_id: i32,
        type_code: String = "type",
        type_desc: Option<String>,
        create_date: NaiveDateTime,
        modify_date: NaiveDateTime,
        is_ms_shipped: bool,
        is_published: bool,
        is_schema_published: bool,
    }
}

catalog_view! {
    /// Row of `sys.system_objects`: system objects only.
    record SystemObject;
    reader SystemObjectsReader;
    ordinals SystemObjectOrdinal;
    view "sys"."system_objects" as "so";
    columns {
        name: String,
        object_id: i32,
        principal_id: Option<i32>,
        schema_id: i32,
        parent_object_id: i32,
        type_code: String = "type",
        type_desc: Option<String>,
        create_date: NaiveDateTime,
        modify_date: NaiveDateTime,
        is_ms_shipped: bool,
        is_published: bool,
        is_schema_published: bool,
    }
}

catalog_view! {
    record Schema;
    reader SchemasReader;
    ordinals SchemaOrdinal;
    view "sys"."schemas" as "s";
    columns {
        name: String,
        schema_id: i32,
        principal_id: Option<i32>,
    }
}

catalog_view! {
    /// Row of `sys.tables`.
    record Table;
    reader TablesReader;
    ordinals TableOrdinal;
    view "sys"."tables" as "t";
    columns {
        name: String,
        object_id: i32,
        principal_id: Option<i32>,
        schema_id: i32,
        parent_object_id: i32,
        type_code: String = "type",
        type_desc: Option<String>,
        create_date: NaiveDateTime,
        modify_date: NaiveDateTime,
        is_ms_shipped: bool,
        is_published: bool,
        is_schema_published: bool,
        lob_data_space_id: i32,
        filestream_data_space_id: Option<i32>,
        max_column_id_used: i32,
        lock_on_bulk_load: bool,
        uses_ansi_nulls: Option<bool>,
        is_replicated: Option<bool>,
        has_replication_filter: Option<bool>,
        is_merge_published: Option<bool>,
        is_sync_tran_subscribed: Option<bool>,
        has_unchecked_assembly_data: bool,
        text_in_row_limit: Option<i32>,
        large_value_types_out_of_row: Option<bool>,
        is_tracked_by_cdc: Option<bool>,
        lock_escalation: Option<u8>,
        lock_escalation_desc: Option<String>,
        is_filetable: Option<bool>,
        is_memory_optimized: Option<bool>,
        durability: Option<u8>,
        durability_desc: Option<String>,
        temporal_type: Option<u8>,
        temporal_type_desc: Option<String>,
        history_table_id: Option<i32>,
        is_remote_data_archive_enabled: Option<bool>,
        is_external: bool,
        history_retention_period: Option<i32>,
        history_retention_period_unit: Option<i32>,
        history_retention_period_unit_desc: Option<String>,
        is_node: Option<bool>,
        is_edge: Option<bool>,
    }
}

catalog_view! {
    /// Row of `sys.views`.
    record View;
    reader ViewsReader;
    ordinals ViewOrdinal;
    view "sys"."views" as "v";
    columns {
        name: String,
        object_id: i32,
        principal_id: Option<i32>,
        schema_id: i32,
        parent_object_id: i32,
        type_code: String = "type",
        type_desc: Option<String>,
        create_date: NaiveDateTime,
        modify_date: NaiveDateTime,
        is_ms_shipped: bool,
        is_published: bool,
        is_schema_published: bool,
        is_replicated: Option<bool>,
        has_replication_filter: Option<bool>,
        has_opaque_metadata: bool,
        has_unchecked_assembly_data: bool,
        with_check_option: bool,
        is_date_correlation_view: bool,
        is_tracked_by_cdc: Option<bool>,
    }
}

object_type_accessor!(SchemaObject, AllObject, SystemObject, Table, View);

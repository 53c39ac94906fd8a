//! Indexes, partitions and constraints.

use chrono::NaiveDateTime;

use super::macros::{catalog_view, object_type_accessor};

catalog_view! {
    /// Row of `sys.indexes`. Heaps appear with `index_id = 0` and no name.
    record Index;
    reader IndexesReader;
    ordinals IndexOrdinal;
    view "sys"."indexes" as "i";
    columns {
        object_id: i32,
        name: Option<String>,
        index_id: i32,
        index_type: u8 = "type",
        type_desc: Option<String>,
        is_unique: Option<bool>,
        data_space_id: Option<i32>,
        ignore_dup_key: Option<bool>,
        is_primary_key: Option<bool>,
        is_unique_constraint: Option<bool>,
        fill_factor: u8,
        is_padded: Option<bool>,
        is_disabled: Option<bool>,
        is_hypothetical: Option<bool>,
        is_ignored_in_optimization: Option<bool>,
        allow_row_locks: Option<bool>,
        allow_page_locks: Option<bool>,
        has_filter: Option<bool>,
        filter_definition: Option<String>,
        compression_delay: Option<i32>,
        suppress_dup_key_messages: Option<bool>,
        auto_created: Option<bool>,
        optimize_for_sequential_key: Option<bool>,
    }
}

catalog_view! {
    /// Row of `sys.index_columns`.
    record IndexColumn;
    reader IndexColumnsReader;
    ordinals IndexColumnOrdinal;
    view "sys"."index_columns" as "ixc";
    columns {
        object_id: i32,
        index_id: i32,
        index_column_id: i32,
        column_id: i32,
        key_ordinal: u8,
        partition_ordinal: u8,
        is_descending_key: Option<bool>,
        is_included_column: Option<bool>,
        column_store_order_ordinal: u8,
    }
}

catalog_view! {
    /// Row of `sys.partitions`: one per partition of every table and index.
    record Partition;
    reader PartitionsReader;
    ordinals PartitionOrdinal;
    view "sys"."partitions" as "p";
    columns {
        partition_id: i64,
        object_id: i32,
        index_id: i32,
        partition_number: i32,
        hobt_id: i64,
        rows: Option<i64>,
        filestream_filegroup_id: i16,
        data_compression: u8,
        data_compression_desc: Option<String>,
        xml_compression: Option<bool>,
        xml_compression_desc: Option<String>,
    }
}

catalog_view! {
    /// Row of `sys.foreign_keys`.
    record ForeignKey;
    reader ForeignKeysReader;
    ordinals ForeignKeyOrdinal;
    view "sys"."foreign_keys" as "fk";
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
        referenced_object_id: Option<i32>,
        key_index_id: Option<i32>,
        is_disabled: bool,
        is_not_for_replication: bool,
        is_not_trusted: bool,
        delete_referential_action: Option<u8>,
        delete_referential_action_desc: Option<String>,
        update_referential_action: Option<u8>,
        update_referential_action_desc: Option<String>,
        is_system_named: bool,
    }
}

catalog_view! {
    /// Row of `sys.foreign_key_columns`: one per column pair of a foreign key.
    record ForeignKeyColumn;
    reader ForeignKeyColumnsReader;
    ordinals ForeignKeyColumnOrdinal;
    view "sys"."foreign_key_columns" as "fkc";
    columns {
        constraint_object_id: i32,
        constraint_column_id: i32,
        parent_object_id: i32,
        parent_column_id: i32,
        referenced_object_id: i32,
        referenced_column_id: i32,
    }
}

catalog_view! {
    /// Row of `sys.check_constraints`.
    record CheckConstraint;
    reader CheckConstraintsReader;
    ordinals CheckConstraintOrdinal;
    view "sys"."check_constraints" as "ckc";
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
        is_disabled: bool,
        is_not_for_replication: bool,
        is_not_trusted: bool,
        parent_column_id: i32,
        definition: Option<String>,
        uses_database_collation: Option<bool>,
        is_system_named: bool,
    }
}

catalog_view! {
    /// Row of `sys.default_constraints`.
    record DefaultConstraint;
    reader DefaultConstraintsReader;
    ordinals DefaultConstraintOrdinal;
    view "sys"."default_constraints" as "dc";
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
        parent_column_id: i32,
        definition: Option<String>,
        is_system_named: bool,
    }
}

object_type_accessor!(ForeignKey, CheckConstraint, DefaultConstraint);

impl Index {
    /// `index_id` 0 is the heap, 1 the clustered index.
    pub fn is_heap(&self) -> bool {
        self.index_id == 0
    }
}

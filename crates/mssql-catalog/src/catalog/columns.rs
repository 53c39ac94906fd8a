//! Column metadata: `sys.columns` and the views derived from it.
//!
//! `sys.identity_columns` also returns `seed_value`, `increment_value` and
//! `last_value`. Those are `sql_variant` and are not selected.

use super::macros::catalog_view;

catalog_view! {
    /// Row of `sys.columns`: one per column of every object that has columns.
    record Column;
    reader ColumnsReader;
    ordinals ColumnOrdinal;
    view "sys"."columns" as "c";
    columns {
        object_id: i32,
        name: Option<String>,
        column_id: i32,
        system_type_id: u8,
        user_type_id: i32,
        max_length: i16,
        precision: u8,
        scale: u8,
        collation_name: Option<String>,
        is_nullable: Option<bool>,
        is_ansi_padded: bool,
        is_rowguidcol: bool,
        is_identity: bool,
        is_computed: bool,
        is_filestream: bool,
        is_replicated: Option<bool>,
        is_non_sql_subscribed: Option<bool>,
        is_merge_published: Option<bool>,
        is_dts_replicated: Option<bool>,
        is_xml_document: bool,
        xml_collection_id: i32,
        default_object_id: i32,
        rule_object_id: i32,
        is_sparse: Option<bool>,
        is_column_set: Option<bool>,
        generated_always_type: Option<u8>,
        generated_always_type_desc: Option<String>,
        encryption_type: Option<i32>,
        encryption_type_desc: Option<String>,
        encryption_algorithm_name: Option<String>,
        column_encryption_key_id: Option<i32>,
        column_encryption_key_database_name: Option<String>,
        is_hidden: Option<bool>,
        is_masked: bool,
        graph_type: Option<i32>,
        graph_type_desc: Option<String>,
    }
}

catalog_view! {
    /// Row of `sys.identity_columns`.
    record IdentityColumn;
    reader IdentityColumnsReader;
    ordinals IdentityColumnOrdinal;
    view "sys"."identity_columns" as "ic";
    columns {
        object_id: i32,
        name: Option<String>,
        column_id: i32,
        system_type_id: u8,
        user_type_id: i32,
        max_length: i16,
        precision: u8,
        scale: u8,
        collation_name: Option<String>,
        is_nullable: Option<bool>,
        is_ansi_padded: bool,
        is_rowguidcol: bool,
        is_identity: bool,
        is_computed: bool,
        is_filestream: bool,
        is_replicated: Option<bool>,
        is_non_sql_subscribed: Option<bool>,
        is_merge_published: Option<bool>,
        is_dts_replicated: Option<bool>,
        is_xml_document: bool,
        xml_collection_id: i32,
        default_object_id: i32,
        rule_object_id: i32,
        is_sparse: Option<bool>,
        is_column_set: Option<bool>,
        generated_always_type: Option<u8>,
        generated_always_type_desc: Option<String>,
        encryption_type: Option<i32>,
        encryption_type_desc: Option<String>,
        encryption_algorithm_name: Option<String>,
        column_encryption_key_id: Option<i32>,
        column_encryption_key_database_name: Option<String>,
        is_hidden: Option<bool>,
        is_masked: bool,
        graph_type: Option<i32>,
        graph_type_desc: Option<String>,
        is_not_for_replication: Option<bool>,
    }
}

catalog_view! {
    /// Row of `sys.computed_columns`.
    record ComputedColumn;
    reader ComputedColumnsReader;
    ordinals ComputedColumnOrdinal;
    view "sys"."computed_columns" as "cc";
    columns {
        object_id: i32,
        name: Option<String>,
        column_id: i32,
        system_type_id: u8,
        user_type_id: i32,
        max_length: i16,
        precision: u8,
        scale: u8,
        collation_name: Option<String>,
        is_nullable: Option<bool>,
        is_ansi_padded: bool,
        is_rowguidcol: bool,
        is_identity: bool,
        is_computed: bool,
        is_filestream: bool,
        is_replicated: Option<bool>,
        is_non_sql_subscribed: Option<bool>,
        is_merge_published: Option<bool>,
        is_dts_replicated: Option<bool>,
        is_xml_document: bool,
        xml_collection_id: i32,
        default_object_id: i32,
        rule_object_id: i32,
        is_sparse: Option<bool>,
        is_column_set: Option<bool>,
        generated_always_type: Option<u8>,
        generated_always_type_desc: Option<String>,
        encryption_type: Option<i32>,
        encryption_type_desc: Option<String>,
        encryption_algorithm_name: Option<String>,
        column_encryption_key_id: Option<i32>,
        column_encryption_key_database_name: Option<String>,
        is_hidden: Option<bool>,
        is_masked: bool,
        graph_type: Option<i32>,
        graph_type_desc: Option<String>,
        definition: Option<String>,
        uses_database_collation: bool,
        is_persisted: bool,
    }
}

catalog_view! {
    /// Row of `sys.masked_columns`: columns with a dynamic data mask.
    record MaskedColumn;
    reader MaskedColumnsReader;
    ordinals MaskedColumnOrdinal;
    view "sys"."masked_columns" as "mc";
    columns {
        object_id: i32,
        name: String,
        column_id: i32,
        system_type_id: u8,
        user_type_id: i32,
        max_length: i16,
        precision: u8,
        scale: u8,
        collation_name: Option<String>,
        is_nullable: bool,
        is_ansi_padded: bool,
        is_rowguidcol: bool,
        is_identity: bool,
        is_filestream: bool,
        is_replicated: bool,
        is_non_sql_subscribed: bool,
        is_merge_published: bool,
        is_dts_replicated: bool,
        is_xml_document: bool,
        xml_collection_id: Option<i32>,
        default_object_id: Option<i32>,
        rule_object_id: Option<i32>,
        definition: Option<String>,
        uses_database_collation: bool,
        is_persisted: bool,
        is_computed: bool,
        is_sparse: bool,
        is_column_set: bool,
        generated_always_type: u8,
        generated_always_type_desc: Option<String>,
        encryption_type: Option<i32>,
        encryption_type_desc: Option<String>,
        encryption_algorithm_name: Option<String>,
        column_encryption_key_id: Option<i32>,
        column_encryption_key_database_name: Option<String>,
        is_hidden: bool,
        is_masked: bool,
        masking_function: Option<String>,
        graph_type: Option<i32>,
        graph_type_desc: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SqlType, SqlValue};
    use crate::cursor::MemoryCursor;
    use crate::error::CatalogError;

    fn masked_row(mask: Option<&str>) -> Vec<SqlValue<'static>> {
        MaskedColumn::COLUMNS
            .iter()
            .map(|def| match def.name {
                "object_id" => SqlValue::I32(245575913),
                "name" => SqlValue::text_owned("Email".into()),
                "column_id" => SqlValue::I32(3),
                "masking_function" => mask.map_or(SqlValue::Null(SqlType::Text), |m| {
                    SqlValue::text_owned(m.to_string())
                }),
                "is_masked" => SqlValue::Bool(mask.is_some()),
                _ if def.nullable => SqlValue::Null(def.sql_type),
                _ => match def.sql_type {
                    SqlType::Bool => SqlValue::Bool(false),
                    SqlType::U8 => SqlValue::U8(0),
                    SqlType::I16 => SqlValue::I16(0),
                    SqlType::I32 => SqlValue::I32(0),
                    other => panic!("no sample value for {}", other),
                },
            })
            .collect()
    }

    #[test]
    fn test_masked_columns_layout() {
        assert_eq!(MaskedColumn::COLUMNS.len(), 40);
        assert_eq!(MaskedColumnOrdinal::masking_function.ordinal(), 37);
        assert_eq!(MaskedColumnOrdinal::graph_type_desc.ordinal(), 39);
        assert!(MaskedColumn::SQL.starts_with("SELECT mc.[object_id]\n      ,mc.[name]"));
        assert!(MaskedColumn::SQL.ends_with(",mc.[graph_type_desc]\nFROM [sys].[masked_columns] mc"));
    }

    #[test]
    fn test_read_masked_columns() {
        let columns = MaskedColumn::COLUMNS.iter().map(|c| c.name.to_string()).collect();
        let cursor = MemoryCursor::from_rows(
            columns,
            vec![masked_row(Some("email()")), masked_row(None)],
        )
        .unwrap();

        let mut reader = MaskedColumnsReader::new(cursor, true);
        assert!(reader.read().unwrap());
        assert_eq!(reader.masking_function().unwrap().as_deref(), Some("email()"));
        assert!(reader.is_masked().unwrap());

        let rest = reader.to_list().unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].masking_function, None);
        assert_eq!(rest[0].collation_name, None);
    }

    #[test]
    fn test_identity_columns_filter() {
        let sql = IdentityColumn::VIEW
            .filtered_sql(&["object_id", "column_id"])
            .unwrap();
        assert!(sql.ends_with(
            "FROM [sys].[identity_columns] ic\nWHERE ic.[object_id] = @P1\n  AND ic.[column_id] = @P2"
        ));
        assert!(matches!(
            IdentityColumn::VIEW.filtered_sql(&["seed_value"]),
            Err(CatalogError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_column_views_share_prefix() {
        for (ordinal, def) in Column::COLUMNS.iter().enumerate() {
            assert_eq!(ComputedColumn::COLUMNS[ordinal], *def);
            assert_eq!(IdentityColumn::COLUMNS[ordinal], *def);
        }
    }
}

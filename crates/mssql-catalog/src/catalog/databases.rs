//! Server-scoped database metadata.

use chrono::NaiveDateTime;
use uuid::Uuid;

use super::macros::catalog_view;

catalog_view! {
    /// Row of `sys.databases`: one per database on the instance.
    record Database;
    reader DatabasesReader;
    ordinals DatabaseOrdinal;
    view "sys"."databases" as "sd";
    columns {
        name: String,
        database_id: i32,
        source_database_id: Option<i32>,
        owner_sid: Vec<u8>,
        create_date: NaiveDateTime,
        compatibility_level: u8,
        collation_name: Option<String>,
        user_access: u8,
        user_access_desc: String,
        is_read_only: bool,
        is_auto_close_on: bool,
        is_auto_shrink_on: bool,
        state: u8,
        state_desc: String,
        is_in_standby: bool,
        is_cleanly_shutdown: bool,
        is_supplemental_logging_enabled: bool,
        snapshot_isolation_state: u8,
        snapshot_isolation_state_desc: String,
        is_read_committed_snapshot_on: bool,
        recovery_model: u8,
        recovery_model_desc: String,
        page_verify_option: u8,
        page_verify_option_desc: String,
        is_auto_create_stats_on: bool,
        is_auto_create_stats_incremental_on: bool,
        is_auto_update_stats_on: bool,
        is_auto_update_stats_async_on: bool,
        is_ansi_null_default_on: bool,
        is_ansi_nulls_on: bool,
        is_ansi_padding_on: bool,
        is_ansi_warnings_on: bool,
        is_arithabort_on: bool,
        is_concat_null_yields_null_on: bool,
        is_numeric_roundabort_on: bool,
        is_quoted_identifier_on: bool,
        is_recursive_triggers_on: bool,
        is_cursor_close_on_commit_on: bool,
        is_local_cursor_default: bool,
        is_fulltext_enabled: bool,
        is_trustworthy_on: bool,
        is_db_chaining_on: bool,
        is_parameterization_forced: bool,
        is_master_key_encrypted_by_server: bool,
        is_query_store_on: bool,
        is_published: bool,
        is_subscribed: bool,
        is_merge_published: bool,
        is_distributor: bool,
        is_sync_with_backup: bool,
        service_broker_guid: Uuid,
        is_broker_enabled: bool,
        log_reuse_wait: i16,
        log_reuse_wait_desc: String,
        is_date_correlation_on: bool,
        is_cdc_enabled: bool,
        is_encrypted: bool,
        is_honor_broker_priority_on: bool,
        replica_id: Option<Uuid>,
        group_database_id: Option<Uuid>,
        resource_pool_id: i32,
        default_language_lcid: i16,
        default_language_name: Option<String>,
        default_fulltext_language_lcid: Option<i32>,
        default_fulltext_language_name: Option<String>,
        is_nested_triggers_on: bool,
        is_transform_noise_words_on: bool,
        two_digit_year_cutoff: i16,
        containment: u8,
        containment_desc: String,
        target_recovery_time_in_seconds: Option<i32>,
        delayed_durability: u8,
        delayed_durability_desc: String,
        is_memory_optimized_elevate_to_snapshot_on: bool,
        is_federation_member: bool,
        is_remote_data_archive_enabled: bool,
        is_mixed_page_allocation_on: bool,
        is_temporal_history_retention_enabled: bool,
        catalog_collation_type: i32,
        catalog_collation_type_desc: String,
        physical_database_name: String,
        is_result_set_caching_on: bool,
        is_accelerated_database_recovery_on: bool,
        is_tempdb_spill_to_remote_store: bool,
        is_stale_page_detection_on: bool,
        is_memory_optimized_enabled: bool,
    }
}

impl Database {
    /// `state` 0 is ONLINE.
    pub fn is_online(&self) -> bool {
        self.state == 0
    }

    /// The four system databases have ids 1 through 4.
    pub fn is_system(&self) -> bool {
        (1..=4).contains(&self.database_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SqlType;

    #[test]
    fn test_databases_layout() {
        assert_eq!(Database::COLUMNS.len(), 86);
        assert_eq!(DatabaseOrdinal::name.ordinal(), 0);
        assert_eq!(DatabaseOrdinal::is_memory_optimized_enabled.ordinal(), 85);
        assert_eq!(Database::VIEW.column(3).map(|c| c.sql_type), Some(SqlType::Bytes));
        assert!(Database::SQL.starts_with("SELECT sd.[name]\n      ,sd.[database_id]"));
        assert!(Database::SQL.ends_with("FROM [sys].[databases] sd"));
    }

    #[test]
    fn test_databases_nullability() {
        let nullable: Vec<&str> = Database::COLUMNS
            .iter()
            .filter(|c| c.nullable)
            .map(|c| c.name)
            .collect();
        assert!(nullable.contains(&"source_database_id"));
        assert!(nullable.contains(&"replica_id"));
        assert!(!nullable.contains(&"service_broker_guid"));
    }

    #[test]
    fn test_database_state_helpers() {
        let master: Database = crate::catalog::sample_record(&[
            ("name", serde_json::json!("master")),
            ("database_id", serde_json::json!(1)),
            ("state", serde_json::json!(0)),
        ]);
        assert!(master.is_online());
        assert!(master.is_system());

        let offline: Database = crate::catalog::sample_record(&[
            ("database_id", serde_json::json!(5)),
            ("state", serde_json::json!(6)),
        ]);
        assert!(!offline.is_online());
        assert!(!offline.is_system());
    }
}

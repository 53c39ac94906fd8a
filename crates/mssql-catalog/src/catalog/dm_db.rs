//! In-memory OLTP checkpoint DMV.

use rust_decimal::Decimal;
use uuid::Uuid;

use super::macros::catalog_view;

catalog_view! {
    /// Row of `sys.dm_db_xtp_checkpoint_stats`. Every column is nullable.
    record DmDbXtpCheckpointStats;
    reader DmDbXtpCheckpointStatsReader;
    ordinals DmDbXtpCheckpointStatsOrdinal;
    view "sys"."dm_db_xtp_checkpoint_stats" as "ddxcs";
    columns {
        last_lsn_processed: Option<Decimal>,
        end_of_log_lsn: Option<Decimal>,
        bytes_to_end_of_log: Option<i64>,
        log_consumption_rate: Option<i64>,
        active_scan_time_in_ms: Option<i64>,
        total_wait_time_in_ms: Option<i64>,
        waits_for_io_count: Option<i64>,
        io_wait_time_in_ms: Option<i64>,
        waits_for_new_log_count: Option<i64>,
        new_log_wait_time_in_ms: Option<i64>,
        idle_attempts_count: Option<i64>,
        tx_segments_dispatched_count: Option<i64>,
        segment_bytes_dispatched: Option<i64>,
        bytes_serialized: Option<i64>,
        serializer_user_time_in_ms: Option<i64>,
        serializer_kernel_time_in_ms: Option<i64>,
        xtp_log_bytes_consumed: Option<i64>,
        checkpoints_closed: Option<i64>,
        last_closed_checkpoint_ts: Option<i64>,
        hardened_recovery_lsn: Option<Decimal>,
        hardened_root_file_guid: Option<Uuid>,
        hardened_root_file_watermark: Option<i64>,
        hardened_truncation_lsn: Option<Decimal>,
        log_bytes_since_last_close: Option<i64>,
        time_since_last_close_in_ms: Option<i64>,
        current_checkpoint_id: Option<i64>,
        current_checkpoint_segment_count: Option<i64>,
        recovery_lsn_candidate: Option<Decimal>,
        outstanding_checkpoint_count: Option<i64>,
        closing_checkpoint_id: Option<i64>,
        recovery_checkpoint_id: Option<i64>,
        recovery_checkpoint_ts: Option<i64>,
        bootstrap_recovery_lsn: Option<Decimal>,
        bootstrap_root_file_guid: Option<Uuid>,
        internal_error_code: Option<i64>,
        tail_cache_page_count: Option<i64>,
        tail_cache_max_page_count: Option<i64>,
        tail_cache_min_needed_lsn: Option<Decimal>,
        merge_outstanding_merges: Option<i64>,
        merge_stats_number_of_merges: Option<i64>,
        merge_stats_log_blocks_merged: Option<i64>,
        merge_stats_bytes_merged: Option<i64>,
        merge_stats_user_time: Option<i64>,
        merge_stats_kernel_time: Option<i64>,
        bytes_of_large_data_serialized: Option<i64>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SqlType, SqlValue};
    use crate::cursor::MemoryCursor;

    #[test]
    fn test_all_columns_nullable() {
        assert_eq!(DmDbXtpCheckpointStats::COLUMNS.len(), 45);
        assert!(DmDbXtpCheckpointStats::COLUMNS.iter().all(|c| c.nullable));
    }

    #[test]
    fn test_all_null_row() {
        let columns = DmDbXtpCheckpointStats::COLUMNS
            .iter()
            .map(|c| c.name.to_string())
            .collect();
        let mut row: Vec<SqlValue<'static>> = DmDbXtpCheckpointStats::COLUMNS
            .iter()
            .map(|c| SqlValue::Null(c.sql_type))
            .collect();
        row[0] = SqlValue::Decimal(Decimal::new(38000000512, 0));
        let cursor = MemoryCursor::from_rows(columns, vec![row]).unwrap();

        let mut reader = DmDbXtpCheckpointStatsReader::new(cursor, true);
        let stats = reader.first().unwrap().unwrap();
        assert_eq!(stats.last_lsn_processed, Some(Decimal::new(38000000512, 0)));
        assert_eq!(stats.hardened_root_file_guid, None);
        assert_eq!(
            DmDbXtpCheckpointStats::VIEW.column(0).map(|c| c.sql_type),
            Some(SqlType::Decimal)
        );
    }
}

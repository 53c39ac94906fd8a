//! Execution DMVs: running requests and cached query statistics.

use chrono::NaiveDateTime;
use uuid::Uuid;

use super::macros::catalog_view;

catalog_view! {
    /// Row of `sys.dm_exec_requests`: one per request executing on the server.
    record DmExecRequest;
    reader DmExecRequestsReader;
    ordinals DmExecRequestOrdinal;
    view "sys"."dm_exec_requests" as "der";
    columns {
        session_id: i16,
        request_id: i32,
        start_time: NaiveDateTime,
        status: String,
        command: String,
        sql_handle: Option<Vec<u8>>,
        statement_start_offset: Option<i32>,
        statement_end_offset: Option<i32>,
        plan_handle: Option<Vec<u8>>,
        database_id: i16,
        user_id: i32,
        connection_id: Option<Uuid>,
        blocking_session_id: Option<i16>,
        wait_type: Option<String>,
        wait_time: i32,
        last_wait_type: String,
        wait_resource: String,
        open_transaction_count: i32,
        open_resultset_count: i32,
        transaction_id: i64,
        context_info: Option<Vec<u8>>,
        percent_complete: f32,
        estimated_completion_time: i64,
        cpu_time: i32,
        total_elapsed_time: i32,
        scheduler_id: Option<i32>,
        task_address: Option<Vec<u8>>,
        reads: i64,
        writes: i64,
        logical_reads: i64,
        text_size: i32,
        language: Option<String>,
        date_format: Option<String>,
        date_first: i16,
        quoted_identifier: bool,
        arithabort: bool,
        ansi_null_dflt_on: bool,
        ansi_defaults: bool,
        ansi_warnings: bool,
        ansi_padding: bool,
        ansi_nulls: bool,
        concat_null_yields_null: bool,
        transaction_isolation_level: i16,
        lock_timeout: i32,
        deadlock_priority: i32,
        row_count: i64,
        prev_error: i32,
        nest_level: i32,
        granted_query_memory: i32,
        executing_managed_code: bool,
        group_id: i32,
        query_hash: Option<Vec<u8>>,
        query_plan_hash: Option<Vec<u8>>,
        statement_sql_handle: Option<Vec<u8>>,
        statement_context_id: Option<i64>,
        dop: i32,
        parallel_worker_count: Option<i32>,
        external_script_request_id: Option<Uuid>,
        is_resumable: bool,
        page_resource: Option<Vec<u8>>,
        page_server_reads: i64,
    }
}

catalog_view! {
    /// Row of `sys.dm_exec_query_stats`: aggregate statistics per cached statement.
    record DmExecQueryStats;
    reader DmExecQueryStatsReader;
    ordinals DmExecQueryStatsOrdinal;
    view "sys"."dm_exec_query_stats" as "deqs";
    columns {
        sql_handle: Vec<u8>,
        statement_start_offset: i32,
        statement_end_offset: i32,
        plan_generation_num: Option<i64>,
        plan_handle: Vec<u8>,
        creation_time: Option<NaiveDateTime>,
        last_execution_time: Option<NaiveDateTime>,
        execution_count: i64,
        total_worker_time: i64,
        last_worker_time: i64,
        min_worker_time: i64,
        max_worker_time: i64,
        total_physical_reads: i64,
        last_physical_reads: i64,
        min_physical_reads: i64,
        max_physical_reads: i64,
        total_logical_writes: i64,
        last_logical_writes: i64,
        min_logical_writes: i64,
        max_logical_writes: i64,
        total_logical_reads: i64,
        last_logical_reads: i64,
        min_logical_reads: i64,
        max_logical_reads: i64,
        total_clr_time: i64,
        last_clr_time: i64,
        min_clr_time: i64,
        max_clr_time: i64,
        total_elapsed_time: i64,
        last_elapsed_time: i64,
        min_elapsed_time: i64,
        max_elapsed_time: i64,
        query_hash: Option<Vec<u8>>,
        query_plan_hash: Option<Vec<u8>>,
        total_rows: Option<i64>,
        last_rows: Option<i64>,
        min_rows: Option<i64>,
        max_rows: Option<i64>,
        statement_sql_handle: Option<Vec<u8>>,
        statement_context_id: Option<i64>,
        total_dop: Option<i64>,
        last_dop: Option<i64>,
        min_dop: Option<i64>,
        max_dop: Option<i64>,
        total_grant_kb: Option<i64>,
        last_grant_kb: Option<i64>,
        min_grant_kb: Option<i64>,
        max_grant_kb: Option<i64>,
        total_used_grant_kb: Option<i64>,
        last_used_grant_kb: Option<i64>,
        min_used_grant_kb: Option<i64>,
        max_used_grant_kb: Option<i64>,
        total_ideal_grant_kb: Option<i64>,
        last_ideal_grant_kb: Option<i64>,
        min_ideal_grant_kb: Option<i64>,
        max_ideal_grant_kb: Option<i64>,
        total_reserved_threads: Option<i64>,
        last_reserved_threads: Option<i64>,
        min_reserved_threads: Option<i64>,
        max_reserved_threads: Option<i64>,
        total_used_threads: Option<i64>,
        last_used_threads: Option<i64>,
        min_used_threads: Option<i64>,
        max_used_threads: Option<i64>,
        total_columnstore_segment_reads: Option<i64>,
        last_columnstore_segment_reads: Option<i64>,
        min_columnstore_segment_reads: Option<i64>,
        max_columnstore_segment_reads: Option<i64>,
        total_columnstore_segment_skips: Option<i64>,
        last_columnstore_segment_skips: Option<i64>,
        min_columnstore_segment_skips: Option<i64>,
        max_columnstore_segment_skips: Option<i64>,
        total_spills: Option<i64>,
        last_spills: Option<i64>,
        min_spills: Option<i64>,
        max_spills: Option<i64>,
        total_num_physical_reads: i64,
        last_num_physical_reads: i64,
        min_num_physical_reads: i64,
        max_num_physical_reads: i64,
        total_page_server_reads: i64,
        last_page_server_reads: i64,
        min_page_server_reads: i64,
        max_page_server_reads: i64,
        total_num_page_server_reads: i64,
        last_num_page_server_reads: i64,
        min_num_page_server_reads: i64,
        max_num_page_server_reads: i64,
    }
}

impl DmExecQueryStats {
    /// Mean worker (CPU) time per execution in microseconds.
    pub fn avg_worker_time(&self) -> Option<f64> {
        (self.execution_count > 0).then(|| self.total_worker_time as f64 / self.execution_count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SqlType, SqlValue};
    use crate::cursor::MemoryCursor;
    use crate::error::CatalogError;

    #[test]
    fn test_requests_layout() {
        assert_eq!(DmExecRequest::COLUMNS.len(), 61);
        assert_eq!(DmExecRequestOrdinal::status.column_name(), "status");
        assert_eq!(DmExecRequestOrdinal::page_server_reads.ordinal(), 60);
        assert_eq!(
            DmExecRequest::VIEW.column(21).map(|c| c.sql_type),
            Some(SqlType::F32)
        );
    }

    #[test]
    fn test_query_stats_layout() {
        assert_eq!(DmExecQueryStats::COLUMNS.len(), 88);
        assert!(DmExecQueryStats::SQL.starts_with("SELECT deqs.[sql_handle]"));
        assert!(DmExecQueryStats::SQL.ends_with(",deqs.[max_num_page_server_reads]\nFROM [sys].[dm_exec_query_stats] deqs"));
    }

    #[test]
    fn test_null_in_non_nullable_column_fails() {
        let columns = DmExecRequest::COLUMNS.iter().map(|c| c.name.to_string()).collect();
        let row = DmExecRequest::COLUMNS
            .iter()
            .map(|c| SqlValue::Null(c.sql_type))
            .collect();
        let cursor = MemoryCursor::from_rows(columns, vec![row]).unwrap();

        let mut reader = DmExecRequestsReader::new(cursor, true);
        assert!(reader.read().unwrap());
        assert_eq!(reader.sql_handle().unwrap(), None);
        assert!(matches!(
            reader.to_data_object(),
            Err(CatalogError::UnexpectedNull { ordinal: 0, .. })
        ));
    }

    #[test]
    fn test_avg_worker_time() {
        let stats: DmExecQueryStats = crate::catalog::sample_record(&[
            ("execution_count", serde_json::json!(4)),
            ("total_worker_time", serde_json::json!(1000)),
        ]);
        assert_eq!(stats.avg_worker_time(), Some(250.0));

        let never_run: DmExecQueryStats = crate::catalog::sample_record(&[]);
        assert_eq!(never_run.execution_count, 0);
        assert_eq!(never_run.avg_worker_time(), None);
    }
}

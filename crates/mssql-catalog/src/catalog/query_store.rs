//! Query Store runtime statistics.

use chrono::{DateTime, FixedOffset};

use super::macros::catalog_view;

catalog_view! {
    /// Row of `sys.query_store_runtime_stats`: per-plan statistics for one interval.
    record QueryStoreRuntimeStats;
    reader QueryStoreRuntimeStatsReader;
    ordinals QueryStoreRuntimeStatsOrdinal;
    view "sys"."query_store_runtime_stats" as "qsrs";
    columns {
        runtime_stats_id: i64,
        plan_id: i64,
        runtime_stats_interval_id: i64,
        execution_type: u8,
        execution_type_desc: Option<String>,
        first_execution_time: DateTime<FixedOffset>,
        last_execution_time: DateTime<FixedOffset>,
        count_executions: i64,
        avg_duration: Option<f64>,
        last_duration: i64,
        min_duration: i64,
        max_duration: i64,
        stdev_duration: Option<f64>,
        avg_cpu_time: Option<f64>,
        last_cpu_time: i64,
        min_cpu_time: i64,
        max_cpu_time: i64,
        stdev_cpu_time: Option<f64>,
        avg_logical_io_reads: Option<f64>,
        last_logical_io_reads: i64,
        min_logical_io_reads: i64,
        max_logical_io_reads: i64,
        stdev_logical_io_reads: Option<f64>,
        avg_logical_io_writes: Option<f64>,
        last_logical_io_writes: i64,
        min_logical_io_writes: i64,
        max_logical_io_writes: i64,
        stdev_logical_io_writes: Option<f64>,
        avg_physical_io_reads: Option<f64>,
        last_physical_io_reads: i64,
        min_physical_io_reads: i64,
        max_physical_io_reads: i64,
        stdev_physical_io_reads: Option<f64>,
        avg_clr_time: Option<f64>,
        last_clr_time: i64,
        min_clr_time: i64,
        max_clr_time: i64,
        stdev_clr_time: Option<f64>,
        avg_dop: Option<f64>,
        last_dop: i64,
        min_dop: i64,
        max_dop: i64,
        stdev_dop: Option<f64>,
        avg_query_max_used_memory: Option<f64>,
        last_query_max_used_memory: i64,
        min_query_max_used_memory: i64,
        max_query_max_used_memory: i64,
        stdev_query_max_used_memory: Option<f64>,
        avg_rowcount: Option<f64>,
        last_rowcount: i64,
        min_rowcount: i64,
        max_rowcount: i64,
        stdev_rowcount: Option<f64>,
        avg_num_physical_io_reads: Option<f64>,
        last_num_physical_io_reads: Option<i64>,
        min_num_physical_io_reads: Option<i64>,
        max_num_physical_io_reads: Option<i64>,
        stdev_num_physical_io_reads: Option<f64>,
        avg_log_bytes_used: Option<f64>,
        last_log_bytes_used: Option<i64>,
        min_log_bytes_used: Option<i64>,
        max_log_bytes_used: Option<i64>,
        stdev_log_bytes_used: Option<f64>,
        avg_tempdb_space_used: Option<f64>,
        last_tempdb_space_used: Option<i64>,
        min_tempdb_space_used: Option<i64>,
        max_tempdb_space_used: Option<i64>,
        stdev_tempdb_space_used: Option<f64>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SqlType;
    use crate::cursor::ResultSetSnapshot;

    #[test]
    fn test_layout() {
        assert_eq!(QueryStoreRuntimeStats::COLUMNS.len(), 68);
        assert_eq!(
            QueryStoreRuntimeStats::VIEW
                .column(QueryStoreRuntimeStatsOrdinal::first_execution_time.ordinal())
                .map(|c| c.sql_type),
            Some(SqlType::DateTimeOffset)
        );
    }

    #[test]
    fn test_map_snapshot() {
        let columns: Vec<String> = QueryStoreRuntimeStats::COLUMNS
            .iter()
            .map(|c| c.name.to_string())
            .collect();
        let row: Vec<serde_json::Value> = QueryStoreRuntimeStats::COLUMNS
            .iter()
            .map(|c| match c.name {
                "execution_type_desc" => serde_json::json!("Regular"),
                "first_execution_time" => serde_json::json!("2024-03-01T10:15:00+01:00"),
                "last_execution_time" => serde_json::json!("2024-03-01T10:45:30.25+01:00"),
                _ if c.nullable => serde_json::Value::Null,
                _ => serde_json::json!(3),
            })
            .collect();
        let snapshot = ResultSetSnapshot {
            columns,
            rows: vec![row],
            ..Default::default()
        };

        let cursor = snapshot.into_cursor(&QueryStoreRuntimeStats::VIEW).unwrap();
        let stats = QueryStoreRuntimeStatsReader::checked(cursor, true)
            .unwrap()
            .to_list()
            .unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].count_executions, 3);
        assert_eq!(stats[0].execution_type, 3);
        assert_eq!(stats[0].avg_duration, None);
        assert_eq!(stats[0].first_execution_time.offset().local_minus_utc(), 3600);
    }
}

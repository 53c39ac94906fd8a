//! Memory and resource governor DMVs.

use chrono::NaiveDateTime;

use super::macros::catalog_view;

catalog_view! {
    /// Row of `sys.dm_os_memory_brokers`: allocations per broker and resource pool.
    record DmOsMemoryBroker;
    reader DmOsMemoryBrokersReader;
    ordinals DmOsMemoryBrokerOrdinal;
    view "sys"."dm_os_memory_brokers" as "domb";
    columns {
        pool_id: i32,
        memory_broker_type: String,
        allocations_kb: i64,
        allocations_kb_per_sec: i64,
        predicted_allocations_kb: i64,
        target_allocations_kb: i64,
        future_allocations_kb: i64,
        overall_limit_kb: i64,
        last_notification: String,
    }
}

catalog_view! {
    /// Row of `sys.dm_resource_governor_resource_pools`.
    record DmResourceGovernorResourcePool;
    reader DmResourceGovernorResourcePoolsReader;
    ordinals DmResourceGovernorResourcePoolOrdinal;
    view "sys"."dm_resource_governor_resource_pools" as "drgrp";
    columns {
        pool_id: i32,
        name: String,
        statistics_start_time: NaiveDateTime,
        total_cpu_usage_ms: i64,
        cache_memory_kb: i64,
        compile_memory_kb: i64,
        used_memgrant_kb: i64,
        total_memgrant_count: i64,
        total_memgrant_timeout_count: i64,
        active_memgrant_count: i32,
        active_memgrant_kb: i64,
        memgrant_waiter_count: i32,
        max_memory_kb: i64,
        used_memory_kb: i64,
        target_memory_kb: i64,
        out_of_memory_count: i64,
        min_cpu_percent: i32,
        max_cpu_percent: i32,
        min_memory_percent: i32,
        max_memory_percent: i32,
        cap_cpu_percent: i32,
        min_iops_per_volume: Option<i32>,
        max_iops_per_volume: Option<i32>,
        read_io_queued_total: Option<i32>,
        read_io_issued_total: Option<i32>,
        read_io_completed_total: i32,
        read_io_throttled_total: Option<i32>,
        read_bytes_total: i64,
        read_io_stall_total_ms: i64,
        read_io_stall_queued_ms: Option<i64>,
        write_io_queued_total: Option<i32>,
        write_io_issued_total: Option<i32>,
        write_io_completed_total: i32,
        write_io_throttled_total: Option<i32>,
        write_bytes_total: i64,
        write_io_stall_total_ms: i64,
        write_io_stall_queued_ms: Option<i64>,
        io_issue_violations_total: Option<i32>,
        io_issue_delay_total_ms: Option<i64>,
        io_issue_ahead_total_ms: Option<i64>,
        reserved_io_limited_by_volume_total: Option<i32>,
        io_issue_delay_non_throttled_total_ms: Option<i64>,
        total_cpu_delayed_ms: i64,
        total_cpu_active_ms: i64,
        total_cpu_violation_delay_ms: i64,
        total_cpu_violation_sec: i64,
        total_cpu_usage_preemptive_ms: i64,
    }
}

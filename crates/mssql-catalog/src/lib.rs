//! # mssql-catalog
//!
//! Strongly typed readers over SQL Server system catalog views.
//!
//! For each supported view (`sys.objects`, `sys.partitions`,
//! `sys.dm_os_memory_brokers`, ...) this library provides:
//!
//! - **The query**: the literal `SELECT` for the view, as `Record::SQL`
//! - **Ordinals**: an enum of column positions that matches the query
//! - **Typed accessors**: one method per column on the view's reader
//! - **Records**: `to_data_object()` / `to_list()` materialize rows
//!
//! The library never connects to a server. The caller executes the SQL and
//! hands the result set over as a [`cursor::RowCursor`]: rows fetched with
//! tiberius (see [`cursor::tds`]), a JSON snapshot, or an in-memory cursor.
//!
//! ## Example
//!
//! ```rust
//! use mssql_catalog::catalog::{Partition, PartitionsReader};
//! use mssql_catalog::core::{SqlType, SqlValue};
//! use mssql_catalog::cursor::MemoryCursor;
//!
//! # fn main() -> mssql_catalog::Result<()> {
//! let columns = Partition::COLUMNS.iter().map(|c| c.name.to_string()).collect();
//! let cursor = MemoryCursor::new(columns).with_row(vec![
//!     SqlValue::I64(72057594043236352),
//!     SqlValue::I32(581577110),
//!     SqlValue::I32(1),
//!     SqlValue::I32(1),
//!     SqlValue::I64(72057594043236352),
//!     SqlValue::Null(SqlType::I64),
//!     SqlValue::I16(0),
//!     SqlValue::U8(0),
//!     SqlValue::text_owned("NONE".into()),
//!     SqlValue::Bool(false),
//!     SqlValue::text_owned("OFF".into()),
//! ])?;
//!
//! let mut reader = PartitionsReader::new(cursor, true);
//! for partition in reader.to_list()? {
//!     println!("{} {:?}", partition.object_id, partition.rows);
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod cursor;
pub mod error;
pub mod reader;

// Re-exports for convenient access
pub use crate::catalog::{CatalogEntry, ObjectType, ViewCatalog};
pub use crate::config::{CatalogConfig, Config, ReaderConfig};
pub use crate::core::{ColumnDef, FromSqlValue, SqlType, SqlValue, ViewDescriptor};
pub use crate::cursor::{MemoryCursor, ResultSetSnapshot, RowCursor};
pub use crate::error::{CatalogError, Result};
pub use crate::reader::{CatalogRecord, DataReader, ViewReader};

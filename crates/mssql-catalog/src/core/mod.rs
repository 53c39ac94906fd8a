//! Core types shared by cursors, readers and the catalog.
//!
//! - [`value`]: SQL value representation with type-tagged NULLs
//! - [`convert`]: strict conversion from values to Rust field types
//! - [`descriptor`]: static query and column layout of a catalog view

pub mod convert;
pub mod descriptor;
pub mod value;

pub use convert::FromSqlValue;
pub use descriptor::{ColumnDef, ViewDescriptor};
pub use value::{SqlType, SqlValue};

//! SQL value types for catalog result rows.
//!
//! Every field a cursor hands out is a [`SqlValue`]. NULLs carry the
//! [`SqlType`] of their column so a typed getter can report what it expected
//! and what it found without consulting the cursor again.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use uuid::Uuid;

/// Logical SQL Server type of a column or value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    Bool,
    U8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Text,
    Bytes,
    Uuid,
    Decimal,
    DateTime,
    DateTimeOffset,
    Date,
    Time,
}

impl SqlType {
    /// All logical types, in declaration order.
    pub const ALL: [SqlType; 15] = [
        SqlType::Bool,
        SqlType::U8,
        SqlType::I16,
        SqlType::I32,
        SqlType::I64,
        SqlType::F32,
        SqlType::F64,
        SqlType::Text,
        SqlType::Bytes,
        SqlType::Uuid,
        SqlType::Decimal,
        SqlType::DateTime,
        SqlType::DateTimeOffset,
        SqlType::Date,
        SqlType::Time,
    ];

    /// SQL Server type name used in listings and snapshot headers.
    #[must_use]
    pub fn sql_name(self) -> &'static str {
        match self {
            SqlType::Bool => "bit",
            SqlType::U8 => "tinyint",
            SqlType::I16 => "smallint",
            SqlType::I32 => "int",
            SqlType::I64 => "bigint",
            SqlType::F32 => "real",
            SqlType::F64 => "float",
            SqlType::Text => "nvarchar",
            SqlType::Bytes => "varbinary",
            SqlType::Uuid => "uniqueidentifier",
            SqlType::Decimal => "decimal",
            SqlType::DateTime => "datetime2",
            SqlType::DateTimeOffset => "datetimeoffset",
            SqlType::Date => "date",
            SqlType::Time => "time",
        }
    }

    /// Parse a SQL Server type name. Accepts common aliases
    /// (`varchar`, `sysname`, `numeric`, `datetime`, ...).
    #[must_use]
    pub fn from_sql_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let base = lower.split('(').next().unwrap_or("").trim();
        let ty = match base {
            "bit" => SqlType::Bool,
            "tinyint" => SqlType::U8,
            "smallint" => SqlType::I16,
            "int" => SqlType::I32,
            "bigint" => SqlType::I64,
            "real" => SqlType::F32,
            "float" => SqlType::F64,
            "nvarchar" | "varchar" | "nchar" | "char" | "sysname" | "ntext" | "text" | "xml" => {
                SqlType::Text
            }
            "varbinary" | "binary" | "image" | "timestamp" | "rowversion" => SqlType::Bytes,
            "uniqueidentifier" => SqlType::Uuid,
            "decimal" | "numeric" | "money" | "smallmoney" => SqlType::Decimal,
            "datetime2" | "datetime" | "smalldatetime" => SqlType::DateTime,
            "datetimeoffset" => SqlType::DateTimeOffset,
            "date" => SqlType::Date,
            "time" => SqlType::Time,
            _ => return None,
        };
        Some(ty)
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}

impl Serialize for SqlType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.sql_name())
    }
}

/// A single field value in a result row.
///
/// Uses `Cow` for string and byte data so a cursor can lend values from its
/// own buffers. Use `.into_owned()` to detach a value from the cursor.
///
/// # Example
///
/// ```rust
/// use std::borrow::Cow;
/// use mssql_catalog::core::SqlValue;
///
/// let borrowed: SqlValue<'_> = SqlValue::Text(Cow::Borrowed("sys"));
/// let owned: SqlValue<'static> = borrowed.into_owned();
/// assert!(!owned.is_null());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue<'a> {
    /// NULL, tagged with the column's type.
    Null(SqlType),

    /// bit
    Bool(bool),

    /// tinyint
    U8(u8),

    /// smallint
    I16(i16),

    /// int
    I32(i32),

    /// bigint
    I64(i64),

    /// real
    F32(f32),

    /// float
    F64(f64),

    /// Character data (nvarchar, sysname, ...).
    Text(Cow<'a, str>),

    /// Binary data (varbinary, rowversion, ...).
    Bytes(Cow<'a, [u8]>),

    /// uniqueidentifier
    Uuid(Uuid),

    /// decimal / numeric
    Decimal(Decimal),

    /// datetime / datetime2 / smalldatetime
    DateTime(NaiveDateTime),

    /// datetimeoffset
    DateTimeOffset(DateTime<FixedOffset>),

    /// date
    Date(NaiveDate),

    /// time
    Time(NaiveTime),
}

impl<'a> SqlValue<'a> {
    /// Convert to a fully owned value with `'static` lifetime.
    #[must_use]
    pub fn into_owned(self) -> SqlValue<'static> {
        match self {
            SqlValue::Null(t) => SqlValue::Null(t),
            SqlValue::Bool(v) => SqlValue::Bool(v),
            SqlValue::U8(v) => SqlValue::U8(v),
            SqlValue::I16(v) => SqlValue::I16(v),
            SqlValue::I32(v) => SqlValue::I32(v),
            SqlValue::I64(v) => SqlValue::I64(v),
            SqlValue::F32(v) => SqlValue::F32(v),
            SqlValue::F64(v) => SqlValue::F64(v),
            SqlValue::Text(v) => SqlValue::Text(Cow::Owned(v.into_owned())),
            SqlValue::Bytes(v) => SqlValue::Bytes(Cow::Owned(v.into_owned())),
            SqlValue::Uuid(v) => SqlValue::Uuid(v),
            SqlValue::Decimal(v) => SqlValue::Decimal(v),
            SqlValue::DateTime(v) => SqlValue::DateTime(v),
            SqlValue::DateTimeOffset(v) => SqlValue::DateTimeOffset(v),
            SqlValue::Date(v) => SqlValue::Date(v),
            SqlValue::Time(v) => SqlValue::Time(v),
        }
    }

    /// Check if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null(_))
    }

    /// Logical type of this value. NULLs report their column type.
    #[must_use]
    pub fn sql_type(&self) -> SqlType {
        match self {
            SqlValue::Null(t) => *t,
            SqlValue::Bool(_) => SqlType::Bool,
            SqlValue::U8(_) => SqlType::U8,
            SqlValue::I16(_) => SqlType::I16,
            SqlValue::I32(_) => SqlType::I32,
            SqlValue::I64(_) => SqlType::I64,
            SqlValue::F32(_) => SqlType::F32,
            SqlValue::F64(_) => SqlType::F64,
            SqlValue::Text(_) => SqlType::Text,
            SqlValue::Bytes(_) => SqlType::Bytes,
            SqlValue::Uuid(_) => SqlType::Uuid,
            SqlValue::Decimal(_) => SqlType::Decimal,
            SqlValue::DateTime(_) => SqlType::DateTime,
            SqlValue::DateTimeOffset(_) => SqlType::DateTimeOffset,
            SqlValue::Date(_) => SqlType::Date,
            SqlValue::Time(_) => SqlType::Time,
        }
    }
}

// Convenience constructors for common cases
impl<'a> SqlValue<'a> {
    /// Create a text value from a borrowed string slice.
    #[must_use]
    pub fn text_borrowed(s: &'a str) -> Self {
        SqlValue::Text(Cow::Borrowed(s))
    }

    /// Create a text value from an owned String.
    #[must_use]
    pub fn text_owned(s: String) -> SqlValue<'static> {
        SqlValue::Text(Cow::Owned(s))
    }

    /// Create a bytes value from an owned Vec<u8>.
    #[must_use]
    pub fn bytes_owned(b: Vec<u8>) -> SqlValue<'static> {
        SqlValue::Bytes(Cow::Owned(b))
    }
}

/// Values render the way they appear in JSON exports: hex for binary,
/// ISO-8601 for temporals, strings for decimals.
impl Serialize for SqlValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SqlValue::Null(_) => serializer.serialize_none(),
            SqlValue::Bool(v) => serializer.serialize_bool(*v),
            SqlValue::U8(v) => serializer.serialize_u8(*v),
            SqlValue::I16(v) => serializer.serialize_i16(*v),
            SqlValue::I32(v) => serializer.serialize_i32(*v),
            SqlValue::I64(v) => serializer.serialize_i64(*v),
            SqlValue::F32(v) => serializer.serialize_f32(*v),
            SqlValue::F64(v) => serializer.serialize_f64(*v),
            SqlValue::Text(v) => serializer.serialize_str(v),
            SqlValue::Bytes(v) => serializer.serialize_str(&format!("0x{}", hex::encode_upper(v))),
            SqlValue::Uuid(v) => serializer.collect_str(v),
            SqlValue::Decimal(v) => serializer.collect_str(v),
            SqlValue::DateTime(v) => serializer.collect_str(&v.format("%Y-%m-%dT%H:%M:%S%.f")),
            SqlValue::DateTimeOffset(v) => serializer.serialize_str(&v.to_rfc3339()),
            SqlValue::Date(v) => serializer.collect_str(&v.format("%Y-%m-%d")),
            SqlValue::Time(v) => serializer.collect_str(&v.format("%H:%M:%S%.f")),
        }
    }
}

macro_rules! impl_from_for_sql_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for SqlValue<'static> {
                fn from(v: $ty) -> Self {
                    SqlValue::$variant(v)
                }
            }
        )*
    };
}

impl_from_for_sql_value! {
    bool => Bool,
    u8 => U8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    Uuid => Uuid,
    Decimal => Decimal,
    NaiveDateTime => DateTime,
    DateTime<FixedOffset> => DateTimeOffset,
    NaiveDate => Date,
    NaiveTime => Time,
}

impl From<String> for SqlValue<'static> {
    fn from(v: String) -> Self {
        SqlValue::Text(Cow::Owned(v))
    }
}

impl<'a> From<&'a str> for SqlValue<'a> {
    fn from(v: &'a str) -> Self {
        SqlValue::Text(Cow::Borrowed(v))
    }
}

impl From<Vec<u8>> for SqlValue<'static> {
    fn from(v: Vec<u8>) -> Self {
        SqlValue::Bytes(Cow::Owned(v))
    }
}

impl<'a> From<&'a [u8]> for SqlValue<'a> {
    fn from(v: &'a [u8]) -> Self {
        SqlValue::Bytes(Cow::Borrowed(v))
    }
}

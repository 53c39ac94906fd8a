//! Conversion from [`SqlValue`] to Rust field types.
//!
//! Matching is strict: a getter for `i32` only accepts an `int` value. Catalog
//! views have fixed column types, so a widening conversion would hide a
//! record definition that drifted from the server.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{SqlType, SqlValue};

/// A Rust type that a non-NULL [`SqlValue`] can be read into.
pub trait FromSqlValue: Sized {
    /// The only SQL type this Rust type accepts.
    const SQL_TYPE: SqlType;

    /// Extract a value. Returns `None` for NULL or for any other variant.
    fn from_sql_value(value: &SqlValue<'_>) -> Option<Self>;
}

macro_rules! impl_from_sql_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromSqlValue for $ty {
                const SQL_TYPE: SqlType = SqlType::$variant;

                fn from_sql_value(value: &SqlValue<'_>) -> Option<Self> {
                    match value {
                        SqlValue::$variant(v) => Some(*v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_sql_value! {
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

impl FromSqlValue for String {
    const SQL_TYPE: SqlType = SqlType::Text;

    fn from_sql_value(value: &SqlValue<'_>) -> Option<Self> {
        match value {
            SqlValue::Text(v) => Some(v.to_string()),
            _ => None,
        }
    }
}

impl FromSqlValue for Vec<u8> {
    const SQL_TYPE: SqlType = SqlType::Bytes;

    fn from_sql_value(value: &SqlValue<'_>) -> Option<Self> {
        match value {
            SqlValue::Bytes(v) => Some(v.to_vec()),
            _ => None,
        }
    }
}

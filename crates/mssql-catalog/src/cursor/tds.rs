//! Adapter for result sets fetched with tiberius.
//!
//! The executor runs a view's SQL and either drains the stream itself
//! (`QueryStream::into_first_result`) or hands the stream over. Either way
//! the rows end up in a [`MemoryCursor`] of owned [`SqlValue`]s, so the
//! reader stays synchronous.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use tiberius::{Column, ColumnData, FromSql, QueryStream, Row};
use tracing::debug;

use super::MemoryCursor;
use crate::core::{SqlType, SqlValue};
use crate::error::Result;

/// Build a cursor from rows already fetched. Column names are taken from
/// the first row; an empty result set has no columns.
pub fn from_rows(rows: Vec<Row>) -> Result<MemoryCursor> {
    let columns: Vec<String> = rows
        .first()
        .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
        .unwrap_or_default();
    collect(columns, rows)
}

/// Build a cursor from rows and the result set's column metadata, which
/// keeps the column names for empty results.
pub fn from_result(columns: &[Column], rows: Vec<Row>) -> Result<MemoryCursor> {
    let columns = columns.iter().map(|c| c.name().to_string()).collect();
    collect(columns, rows)
}

/// Drain the first result set of a query stream.
pub async fn from_stream(mut stream: QueryStream<'_>) -> Result<MemoryCursor> {
    let columns: Vec<String> = stream
        .columns()
        .await?
        .map(|cols| cols.iter().map(|c| c.name().to_string()).collect())
        .unwrap_or_default();
    let rows = stream.into_first_result().await?;
    collect(columns, rows)
}

fn collect(columns: Vec<String>, rows: Vec<Row>) -> Result<MemoryCursor> {
    let mut cursor = MemoryCursor::new(columns);
    for row in rows {
        let values = row
            .into_iter()
            .map(convert_column_data)
            .collect::<Result<Vec<_>>>()?;
        cursor.push_row(values)?;
    }
    debug!(
        "Converted {} rows with {} columns from tiberius",
        cursor.row_count(),
        cursor.columns().len()
    );
    Ok(cursor)
}

/// Convert one tiberius field into a [`SqlValue`].
///
/// Money and numeric both arrive as `Numeric` and map to `Decimal`. XML is
/// read as text. All three legacy and modern datetime encodings map to
/// `DateTime`.
pub fn convert_column_data(data: ColumnData<'static>) -> Result<SqlValue<'static>> {
    let value = match data {
        ColumnData::Bit(v) => v.map_or(SqlValue::Null(SqlType::Bool), SqlValue::Bool),
        ColumnData::U8(v) => v.map_or(SqlValue::Null(SqlType::U8), SqlValue::U8),
        ColumnData::I16(v) => v.map_or(SqlValue::Null(SqlType::I16), SqlValue::I16),
        ColumnData::I32(v) => v.map_or(SqlValue::Null(SqlType::I32), SqlValue::I32),
        ColumnData::I64(v) => v.map_or(SqlValue::Null(SqlType::I64), SqlValue::I64),
        ColumnData::F32(v) => v.map_or(SqlValue::Null(SqlType::F32), SqlValue::F32),
        ColumnData::F64(v) => v.map_or(SqlValue::Null(SqlType::F64), SqlValue::F64),
        ColumnData::String(v) => v.map_or(SqlValue::Null(SqlType::Text), |s| {
            SqlValue::Text(Cow::Owned(s.into_owned()))
        }),
        ColumnData::Guid(v) => v.map_or(SqlValue::Null(SqlType::Uuid), SqlValue::Uuid),
        ColumnData::Binary(v) => v.map_or(SqlValue::Null(SqlType::Bytes), |b| {
            SqlValue::Bytes(Cow::Owned(b.into_owned()))
        }),
        ColumnData::Xml(v) => v.map_or(SqlValue::Null(SqlType::Text), |x| {
            SqlValue::Text(Cow::Owned(x.into_owned().into_string()))
        }),
        ColumnData::Numeric(_) => Decimal::from_sql(&data)?
            .map_or(SqlValue::Null(SqlType::Decimal), SqlValue::Decimal),
        ColumnData::DateTime(_) | ColumnData::SmallDateTime(_) | ColumnData::DateTime2(_) => {
            NaiveDateTime::from_sql(&data)?
                .map_or(SqlValue::Null(SqlType::DateTime), SqlValue::DateTime)
        }
        ColumnData::Date(_) => {
            NaiveDate::from_sql(&data)?.map_or(SqlValue::Null(SqlType::Date), SqlValue::Date)
        }
        ColumnData::Time(_) => {
            NaiveTime::from_sql(&data)?.map_or(SqlValue::Null(SqlType::Time), SqlValue::Time)
        }
        ColumnData::DateTimeOffset(_) => DateTime::<FixedOffset>::from_sql(&data)?
            .map_or(SqlValue::Null(SqlType::DateTimeOffset), SqlValue::DateTimeOffset),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiberius::numeric::Numeric;
    use uuid::Uuid;

    #[test]
    fn test_convert_scalars() {
        assert_eq!(convert_column_data(ColumnData::U8(Some(3))).unwrap(), SqlValue::U8(3));
        assert_eq!(
            convert_column_data(ColumnData::Bit(Some(true))).unwrap(),
            SqlValue::Bool(true)
        );
        assert_eq!(
            convert_column_data(ColumnData::String(Some(Cow::Borrowed("dbo")))).unwrap(),
            SqlValue::text_owned("dbo".into())
        );

        let id = Uuid::nil();
        assert_eq!(
            convert_column_data(ColumnData::Guid(Some(id))).unwrap(),
            SqlValue::Uuid(id)
        );
    }

    #[test]
    fn test_convert_nulls_keep_type() {
        assert_eq!(
            convert_column_data(ColumnData::I32(None)).unwrap(),
            SqlValue::Null(SqlType::I32)
        );
        assert_eq!(
            convert_column_data(ColumnData::Binary(None)).unwrap(),
            SqlValue::Null(SqlType::Bytes)
        );
        assert_eq!(
            convert_column_data(ColumnData::Numeric(None)).unwrap(),
            SqlValue::Null(SqlType::Decimal)
        );
    }

    #[test]
    fn test_convert_numeric() {
        let n = Numeric::new_with_scale(12345, 2);
        assert_eq!(
            convert_column_data(ColumnData::Numeric(Some(n))).unwrap(),
            SqlValue::Decimal(Decimal::new(12345, 2))
        );
    }
}

//! Typed access to the rows of a cursor.
//!
//! [`DataReader`] wraps a [`RowCursor`] and adds the row-state machine,
//! typed getters and cursor ownership. [`ViewReader`] binds a `DataReader`
//! to the column layout of one catalog view.

mod typed;

pub use typed::{CatalogRecord, ViewReader};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use tracing::{error, warn};
use uuid::Uuid;

use crate::core::{FromSqlValue, SqlType, SqlValue};
use crate::cursor::RowCursor;
use crate::error::{CatalogError, Result};

/// Where the reader stands in its result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    /// `read()` has not been called yet.
    BeforeFirst,
    /// Positioned on a row; columns are readable.
    OnRow,
    /// `read()` returned `false`. It will keep returning `false`.
    Exhausted,
}

macro_rules! typed_getters {
    ($($get:ident, $get_nullable:ident => $ty:ty;)*) => {
        $(
            #[doc = concat!("Read a non-NULL `", stringify!($ty), "` at `ordinal`.")]
            pub fn $get(&self, ordinal: usize) -> Result<$ty> {
                self.get::<$ty>(ordinal)
            }

            #[doc = concat!("Read a nullable `", stringify!($ty), "` at `ordinal`.")]
            pub fn $get_nullable(&self, ordinal: usize) -> Result<Option<$ty>> {
                self.get_nullable::<$ty>(ordinal)
            }
        )*
    };
}

/// Forward-only reader over a cursor with typed column getters.
///
/// Ownership of the cursor is decided at construction. When `owns_cursor` is
/// true, disposing the reader (explicitly or on drop) closes the cursor;
/// otherwise the cursor is left open for the caller.
///
/// # Example
///
/// ```rust
/// use mssql_catalog::core::SqlValue;
/// use mssql_catalog::cursor::MemoryCursor;
/// use mssql_catalog::reader::DataReader;
///
/// let cursor = MemoryCursor::new(vec!["object_id".into()])
///     .with_row(vec![SqlValue::I32(5)])?;
/// let mut reader = DataReader::new(cursor, true);
/// while reader.read()? {
///     assert_eq!(reader.get_i32(0)?, 5);
/// }
/// # Ok::<(), mssql_catalog::CatalogError>(())
/// ```
pub struct DataReader<C: RowCursor> {
    cursor: Option<C>,
    owns_cursor: bool,
    state: RowState,
    closed: bool,
}

impl<C: RowCursor> DataReader<C> {
    /// Wrap an open cursor positioned before its first row.
    pub fn new(cursor: C, owns_cursor: bool) -> Self {
        Self {
            cursor: Some(cursor),
            owns_cursor,
            state: RowState::BeforeFirst,
            closed: false,
        }
    }

    pub fn owns_cursor(&self) -> bool {
        self.owns_cursor
    }

    pub fn state(&self) -> RowState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Advance to the next row. Returns `false` at the end of the result set.
    pub fn read(&mut self) -> Result<bool> {
        if self.closed {
            return Err(CatalogError::ReaderClosed);
        }
        if self.state == RowState::Exhausted {
            return Ok(false);
        }

        let cursor = self.cursor.as_mut().ok_or(CatalogError::ReaderClosed)?;
        if cursor.advance()? {
            self.state = RowState::OnRow;
            Ok(true)
        } else {
            self.state = RowState::Exhausted;
            Ok(false)
        }
    }

    pub fn field_count(&self) -> Result<usize> {
        Ok(self.open_cursor()?.field_count())
    }

    /// Name of the column at `ordinal`, if the cursor reports names.
    pub fn column_name(&self, ordinal: usize) -> Result<Option<&str>> {
        let cursor = self.open_cursor()?;
        if ordinal >= cursor.field_count() {
            return Err(CatalogError::OrdinalOutOfRange {
                ordinal,
                field_count: cursor.field_count(),
            });
        }
        Ok(cursor.column_name(ordinal))
    }

    /// Ordinal of a column by name, ignoring case.
    pub fn ordinal_of(&self, name: &str) -> Result<usize> {
        let cursor = self.open_cursor()?;
        (0..cursor.field_count())
            .find(|&i| {
                cursor
                    .column_name(i)
                    .is_some_and(|n| n.eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| CatalogError::UnknownColumn(name.to_string()))
    }

    /// Whether the field at `ordinal` of the current row is NULL.
    pub fn is_null(&self, ordinal: usize) -> Result<bool> {
        Ok(self.raw(ordinal)?.is_null())
    }

    /// Read a non-NULL value of type `T`.
    pub fn get<T: FromSqlValue>(&self, ordinal: usize) -> Result<T> {
        let value = self.raw(ordinal)?;
        match T::from_sql_value(value) {
            Some(v) => Ok(v),
            None if value.is_null() => Err(self.failure(CatalogError::UnexpectedNull {
                ordinal,
                column: self.column_label(ordinal),
            })),
            None => Err(self.failure(CatalogError::TypeMismatch {
                ordinal,
                column: self.column_label(ordinal),
                expected: T::SQL_TYPE,
                found: value.sql_type(),
            })),
        }
    }

    /// Read a value of type `T`, mapping NULL to `None`.
    pub fn get_nullable<T: FromSqlValue>(&self, ordinal: usize) -> Result<Option<T>> {
        if self.raw(ordinal)?.is_null() {
            return Ok(None);
        }
        self.get(ordinal).map(Some)
    }

    /// Untyped access to a field. NULL comes back as `SqlValue::Null`.
    pub fn get_value(&self, ordinal: usize) -> Result<SqlValue<'static>> {
        Ok(self.raw(ordinal)?.clone())
    }

    /// Untyped access to a field, mapping NULL to `None`.
    pub fn get_nullable_value(&self, ordinal: usize) -> Result<Option<SqlValue<'static>>> {
        let value = self.raw(ordinal)?;
        Ok((!value.is_null()).then(|| value.clone()))
    }

    typed_getters! {
        get_bool, get_nullable_bool => bool;
        get_u8, get_nullable_u8 => u8;
        get_i16, get_nullable_i16 => i16;
        get_i32, get_nullable_i32 => i32;
        get_i64, get_nullable_i64 => i64;
        get_f32, get_nullable_f32 => f32;
        get_f64, get_nullable_f64 => f64;
        get_decimal, get_nullable_decimal => Decimal;
        get_string, get_nullable_string => String;
        get_guid, get_nullable_guid => Uuid;
        get_binary, get_nullable_binary => Vec<u8>;
        get_datetime, get_nullable_datetime => NaiveDateTime;
        get_date, get_nullable_date => NaiveDate;
        get_time, get_nullable_time => NaiveTime;
        get_datetime_offset, get_nullable_datetime_offset => DateTime<FixedOffset>;
    }

    /// Release the reader. Closes the cursor only if the reader owns it.
    ///
    /// Calling this more than once is a no-op.
    pub fn dispose(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.state = RowState::Exhausted;

        if self.owns_cursor {
            if let Some(mut cursor) = self.cursor.take() {
                if !cursor.is_closed() {
                    cursor.close()?;
                }
            }
        }
        Ok(())
    }

    /// Give the cursor back without closing it.
    ///
    /// Returns `None` if the reader owned the cursor and already disposed it.
    pub fn into_inner(mut self) -> Option<C> {
        self.closed = true;
        self.cursor.take()
    }

    pub(crate) fn cursor(&self) -> Result<&C> {
        self.open_cursor()
    }

    fn open_cursor(&self) -> Result<&C> {
        if self.closed {
            return Err(CatalogError::ReaderClosed);
        }
        self.cursor.as_ref().ok_or(CatalogError::ReaderClosed)
    }

    fn raw(&self, ordinal: usize) -> Result<&SqlValue<'static>> {
        let cursor = self.open_cursor()?;
        if self.state != RowState::OnRow {
            return Err(self.failure(CatalogError::NoCurrentRow));
        }
        let field_count = cursor.field_count();
        if ordinal >= field_count {
            return Err(self.failure(CatalogError::OrdinalOutOfRange {
                ordinal,
                field_count,
            }));
        }
        cursor.value(ordinal)
    }

    fn column_label(&self, ordinal: usize) -> String {
        self.cursor
            .as_ref()
            .and_then(|c| c.column_name(ordinal))
            .map_or_else(|| format!("#{}", ordinal), str::to_string)
    }

    fn failure(&self, err: CatalogError) -> CatalogError {
        error!("Row access failed: {}", err);
        err
    }
}

impl<C: RowCursor> Drop for DataReader<C> {
    fn drop(&mut self) {
        if let Err(e) = self.dispose() {
            warn!("Failed to close cursor while dropping reader: {}", e);
        }
    }
}

/// A record field type that knows how to read itself from a reader.
///
/// Implemented for every [`FromSqlValue`] type and its `Option`. Catalog
/// records use it so that nullability comes from the field type alone.
pub trait ColumnValue: Sized {
    const SQL_TYPE: SqlType;
    const NULLABLE: bool;

    fn read_column<C: RowCursor>(reader: &DataReader<C>, ordinal: usize) -> Result<Self>;
}

macro_rules! impl_column_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ColumnValue for $ty {
                const SQL_TYPE: SqlType = <$ty as FromSqlValue>::SQL_TYPE;
                const NULLABLE: bool = false;

                fn read_column<C: RowCursor>(reader: &DataReader<C>, ordinal: usize) -> Result<Self> {
                    reader.get::<$ty>(ordinal)
                }
            }

            impl ColumnValue for Option<$ty> {
                const SQL_TYPE: SqlType = <$ty as FromSqlValue>::SQL_TYPE;
                const NULLABLE: bool = true;

                fn read_column<C: RowCursor>(reader: &DataReader<C>, ordinal: usize) -> Result<Self> {
                    reader.get_nullable::<$ty>(ordinal)
                }
            }
        )*
    };
}

impl_column_value! {
    bool,
    u8,
    i16,
    i32,
    i64,
    f32,
    f64,
    Decimal,
    String,
    Uuid,
    Vec<u8>,
    NaiveDateTime,
    NaiveDate,
    NaiveTime,
    DateTime<FixedOffset>,
}

//! In-memory result set.

use super::RowCursor;
use crate::core::SqlValue;
use crate::error::{CatalogError, Result};

/// A fully materialized result set.
///
/// Used for rows fetched up front by the SQL Server adapter, for JSON
/// snapshots and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryCursor {
    columns: Vec<String>,
    rows: Vec<Vec<SqlValue<'static>>>,
    position: Option<usize>,
    exhausted: bool,
    closed: bool,
}

impl MemoryCursor {
    /// Create an empty result set with the given column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            ..Default::default()
        }
    }

    /// Create a result set from column names and rows.
    ///
    /// Fails if any row's width differs from the column count.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<SqlValue<'static>>>) -> Result<Self> {
        let mut cursor = Self::new(columns);
        for row in rows {
            cursor.push_row(row)?;
        }
        Ok(cursor)
    }

    /// Builder-style [`push_row`](Self::push_row).
    pub fn with_row(mut self, row: Vec<SqlValue<'static>>) -> Result<Self> {
        self.push_row(row)?;
        Ok(self)
    }

    /// Append a row to the end of the result set.
    pub fn push_row(&mut self, row: Vec<SqlValue<'static>>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(CatalogError::invalid_result_set(format!(
                "row {} has {} fields, expected {}",
                self.rows.len(),
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Total number of rows, read or not.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl RowCursor for MemoryCursor {
    fn advance(&mut self) -> Result<bool> {
        if self.closed {
            return Err(CatalogError::ReaderClosed);
        }
        if self.exhausted {
            return Ok(false);
        }

        let next = self.position.map_or(0, |p| p + 1);
        if next < self.rows.len() {
            self.position = Some(next);
            Ok(true)
        } else {
            self.position = None;
            self.exhausted = true;
            Ok(false)
        }
    }

    fn field_count(&self) -> usize {
        self.columns.len()
    }

    fn column_name(&self, ordinal: usize) -> Option<&str> {
        self.columns.get(ordinal).map(String::as_str)
    }

    fn value(&self, ordinal: usize) -> Result<&SqlValue<'static>> {
        if self.closed {
            return Err(CatalogError::ReaderClosed);
        }
        let row = self
            .position
            .and_then(|p| self.rows.get(p))
            .ok_or(CatalogError::NoCurrentRow)?;
        row.get(ordinal).ok_or(CatalogError::OrdinalOutOfRange {
            ordinal,
            field_count: self.columns.len(),
        })
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.position = None;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SqlType;

    fn cursor() -> MemoryCursor {
        MemoryCursor::from_rows(
            vec!["id".into(), "name".into()],
            vec![
                vec![SqlValue::I32(1), SqlValue::text_owned("a".into())],
                vec![SqlValue::I32(2), SqlValue::Null(SqlType::Text)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_advance_through_rows() {
        let mut c = cursor();
        assert!(matches!(c.value(0), Err(CatalogError::NoCurrentRow)));

        assert!(c.advance().unwrap());
        assert_eq!(c.value(0).unwrap(), &SqlValue::I32(1));
        assert!(c.advance().unwrap());
        assert!(c.value(1).unwrap().is_null());

        assert!(!c.advance().unwrap());
        assert!(!c.advance().unwrap());
        assert!(matches!(c.value(0), Err(CatalogError::NoCurrentRow)));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = MemoryCursor::new(vec!["id".into()])
            .with_row(vec![SqlValue::I32(1), SqlValue::I32(2)])
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidResultSet(_)));
    }

    #[test]
    fn test_out_of_range_and_close() {
        let mut c = cursor();
        c.advance().unwrap();
        assert!(matches!(
            c.value(5),
            Err(CatalogError::OrdinalOutOfRange { ordinal: 5, field_count: 2 })
        ));

        c.close().unwrap();
        assert!(c.is_closed());
        assert!(matches!(c.advance(), Err(CatalogError::ReaderClosed)));
    }
}

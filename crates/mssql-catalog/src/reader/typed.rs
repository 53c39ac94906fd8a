//! Readers bound to one catalog view's layout.

use std::marker::PhantomData;

use tracing::debug;

use super::DataReader;
use crate::core::ViewDescriptor;
use crate::cursor::RowCursor;
use crate::error::Result;

/// An immutable row record of a catalog view.
///
/// Implemented by the `catalog_view!` macro; each field is read at the
/// ordinal of the matching column in the view's SQL.
pub trait CatalogRecord: Sized {
    /// Query descriptor of the view this record belongs to.
    fn view() -> &'static ViewDescriptor;

    /// Read the reader's current row.
    fn from_reader<C: RowCursor>(reader: &DataReader<C>) -> Result<Self>;
}

/// Typed reader over the result set of one catalog view's SQL.
///
/// Per-column accessors are generated next to each record type, e.g.
/// `ViewReader<Partition, C>::rows()`.
pub struct ViewReader<R: CatalogRecord, C: RowCursor> {
    inner: DataReader<C>,
    _record: PhantomData<fn() -> R>,
}

impl<R: CatalogRecord, C: RowCursor> ViewReader<R, C> {
    /// Wrap a cursor produced by executing `R::view().sql`.
    ///
    /// No layout validation is done; see [`checked`](Self::checked).
    pub fn new(cursor: C, owns_cursor: bool) -> Self {
        Self::from_data_reader(DataReader::new(cursor, owns_cursor))
    }

    /// Like [`new`](Self::new), but first checks the cursor's column count and
    /// names against the view.
    pub fn checked(cursor: C, owns_cursor: bool) -> Result<Self> {
        let reader = Self::new(cursor, owns_cursor);
        reader.validate_layout()?;
        Ok(reader)
    }

    pub fn from_data_reader(inner: DataReader<C>) -> Self {
        Self {
            inner,
            _record: PhantomData,
        }
    }

    pub fn validate_layout(&self) -> Result<()> {
        R::view().validate_layout(self.inner.cursor()?)
    }

    pub fn view() -> &'static ViewDescriptor {
        R::view()
    }

    /// Literal SQL text for the view.
    pub fn sql() -> &'static str {
        R::view().sql
    }

    /// Advance to the next row.
    pub fn read(&mut self) -> Result<bool> {
        self.inner.read()
    }

    /// Materialize the current row.
    pub fn to_data_object(&self) -> Result<R> {
        R::from_reader(&self.inner)
    }

    /// Read every remaining row, in cursor order.
    pub fn to_list(&mut self) -> Result<Vec<R>> {
        let mut records = Vec::new();
        while self.inner.read()? {
            records.push(R::from_reader(&self.inner)?);
        }
        debug!(
            "Materialized {} rows from {}",
            records.len(),
            R::view().qualified_name()
        );
        Ok(records)
    }

    /// Read at most one row.
    pub fn first(&mut self) -> Result<Option<R>> {
        if self.inner.read()? {
            self.to_data_object().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn data_reader(&self) -> &DataReader<C> {
        &self.inner
    }

    pub fn data_reader_mut(&mut self) -> &mut DataReader<C> {
        &mut self.inner
    }

    pub fn dispose(&mut self) -> Result<()> {
        self.inner.dispose()
    }

    pub fn into_inner(self) -> DataReader<C> {
        self.inner
    }
}

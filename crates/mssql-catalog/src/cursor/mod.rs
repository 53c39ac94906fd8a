//! Forward-only row cursors.
//!
//! A [`RowCursor`] is the result set an external executor produced for a
//! catalog view's SQL, positioned before its first row. Readers only ever
//! advance it and look at fields of the current row.

mod memory;
pub mod snapshot;
pub mod tds;

pub use memory::MemoryCursor;
pub use snapshot::ResultSetSnapshot;

use crate::core::SqlValue;
use crate::error::Result;

/// A forward-only cursor over one result set.
pub trait RowCursor {
    /// Move to the next row. Returns `false` once the result set is exhausted.
    fn advance(&mut self) -> Result<bool>;

    /// Number of fields in each row.
    fn field_count(&self) -> usize;

    /// Name of the column at `ordinal`, if the cursor knows it.
    fn column_name(&self, ordinal: usize) -> Option<&str>;

    /// Field of the current row.
    fn value(&self, ordinal: usize) -> Result<&SqlValue<'static>>;

    /// Release the cursor. Further calls to `advance` or `value` fail.
    fn close(&mut self) -> Result<()>;

    fn is_closed(&self) -> bool;
}

impl<C: RowCursor + ?Sized> RowCursor for &mut C {
    fn advance(&mut self) -> Result<bool> {
        (**self).advance()
    }

    fn field_count(&self) -> usize {
        (**self).field_count()
    }

    fn column_name(&self, ordinal: usize) -> Option<&str> {
        (**self).column_name(ordinal)
    }

    fn value(&self, ordinal: usize) -> Result<&SqlValue<'static>> {
        (**self).value(ordinal)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

impl<C: RowCursor + ?Sized> RowCursor for Box<C> {
    fn advance(&mut self) -> Result<bool> {
        (**self).advance()
    }

    fn field_count(&self) -> usize {
        (**self).field_count()
    }

    fn column_name(&self, ordinal: usize) -> Option<&str> {
        (**self).column_name(ordinal)
    }

    fn value(&self, ordinal: usize) -> Result<&SqlValue<'static>> {
        (**self).value(ordinal)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

//! Static description of a catalog view: where it lives, the SQL that reads
//! it and the ordered column layout that SQL produces.

use serde::Serialize;

use super::SqlType;
use crate::cursor::RowCursor;
use crate::error::{CatalogError, Result};

/// One output column of a catalog view query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub nullable: bool,
}

/// Query descriptor for a catalog view.
///
/// `columns[i]` is the column produced at ordinal `i` of `sql`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewDescriptor {
    pub schema: &'static str,
    pub name: &'static str,
    pub alias: &'static str,
    pub sql: &'static str,
    pub columns: &'static [ColumnDef],
}

impl ViewDescriptor {
    /// `schema.name`, e.g. `sys.objects`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }

    /// `[schema].[name]`, e.g. `[sys].[objects]`.
    pub fn bracketed_name(&self) -> String {
        format!("[{}].[{}]", self.schema, self.name)
    }

    /// Whether `name` refers to this view.
    ///
    /// Accepts `sys.objects`, `[sys].[objects]` and the bare `objects`,
    /// ignoring case.
    pub fn matches_name(&self, name: &str) -> bool {
        let unbracketed: String = name.trim().chars().filter(|c| *c != '[' && *c != ']').collect();
        match unbracketed.split_once('.') {
            Some((schema, view)) => {
                schema.eq_ignore_ascii_case(self.schema) && view.eq_ignore_ascii_case(self.name)
            }
            None => unbracketed.eq_ignore_ascii_case(self.name),
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, ordinal: usize) -> Option<&'static ColumnDef> {
        self.columns.get(ordinal)
    }

    /// Ordinal of a column by name, ignoring case.
    pub fn ordinal_of(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(column))
            .ok_or_else(|| {
                CatalogError::UnknownColumn(format!("{}.{}", self.qualified_name(), column))
            })
    }

    /// The view's SQL with an equality filter on each named column.
    ///
    /// Parameters are positional (`@P1`, `@P2`, ...) in the order the columns
    /// are given, matching how tiberius binds query parameters.
    pub fn filtered_sql(&self, columns: &[&str]) -> Result<String> {
        let mut sql = String::from(self.sql);
        for (i, column) in columns.iter().enumerate() {
            let def = &self.columns[self.ordinal_of(column)?];
            let keyword = if i == 0 { "\nWHERE " } else { "\n  AND " };
            sql.push_str(&format!("{}{}.[{}] = @P{}", keyword, self.alias, def.name, i + 1));
        }
        Ok(sql)
    }

    /// Check that a cursor has this view's column count and, where the cursor
    /// reports them, this view's column names in order.
    pub fn validate_layout(&self, cursor: &dyn RowCursor) -> Result<()> {
        if cursor.field_count() != self.columns.len() {
            return Err(CatalogError::layout(
                self.qualified_name(),
                format!(
                    "expected {} columns, cursor has {}",
                    self.columns.len(),
                    cursor.field_count()
                ),
            ));
        }

        for (ordinal, def) in self.columns.iter().enumerate() {
            if let Some(actual) = cursor.column_name(ordinal) {
                if !actual.eq_ignore_ascii_case(def.name) {
                    return Err(CatalogError::layout(
                        self.qualified_name(),
                        format!(
                            "column {} is '{}', expected '{}'",
                            ordinal, actual, def.name
                        ),
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::MemoryCursor;

    static COLUMNS: [ColumnDef; 3] = [
        ColumnDef { name: "partition_id", sql_type: SqlType::I64, nullable: false },
        ColumnDef { name: "object_id", sql_type: SqlType::I32, nullable: false },
        ColumnDef { name: "rows", sql_type: SqlType::I64, nullable: true },
    ];

    static VIEW: ViewDescriptor = ViewDescriptor {
        schema: "sys",
        name: "partitions",
        alias: "p",
        sql: "SELECT p.[partition_id]\n      ,p.[object_id]\n      ,p.[rows]\nFROM [sys].[partitions] p",
        columns: &COLUMNS,
    };

    #[test]
    fn test_names() {
        assert_eq!(VIEW.qualified_name(), "sys.partitions");
        assert_eq!(VIEW.bracketed_name(), "[sys].[partitions]");
        assert!(VIEW.matches_name("SYS.Partitions"));
        assert!(VIEW.matches_name("[sys].[partitions]"));
        assert!(VIEW.matches_name("partitions"));
        assert!(!VIEW.matches_name("dbo.partitions"));
        assert!(!VIEW.matches_name("partition"));
    }

    #[test]
    fn test_ordinal_of() {
        assert_eq!(VIEW.ordinal_of("object_id").unwrap(), 1);
        assert_eq!(VIEW.ordinal_of("ROWS").unwrap(), 2);
        assert!(matches!(
            VIEW.ordinal_of("nope"),
            Err(CatalogError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_filtered_sql() {
        let sql = VIEW.filtered_sql(&["object_id", "partition_id"]).unwrap();
        assert!(sql.starts_with(VIEW.sql));
        assert!(sql.ends_with(
            "FROM [sys].[partitions] p\nWHERE p.[object_id] = @P1\n  AND p.[partition_id] = @P2"
        ));

        assert_eq!(VIEW.filtered_sql(&[]).unwrap(), VIEW.sql);
        assert!(VIEW.filtered_sql(&["index_id"]).is_err());
    }

    #[test]
    fn test_validate_layout() {
        let good = MemoryCursor::new(vec!["partition_id".into(), "object_id".into(), "rows".into()]);
        assert!(VIEW.validate_layout(&good).is_ok());

        let short = MemoryCursor::new(vec!["partition_id".into(), "object_id".into()]);
        assert!(matches!(
            VIEW.validate_layout(&short),
            Err(CatalogError::LayoutMismatch { .. })
        ));

        let renamed = MemoryCursor::new(vec!["partition_id".into(), "index_id".into(), "rows".into()]);
        let err = VIEW.validate_layout(&renamed).unwrap_err();
        assert!(err.to_string().contains("'index_id'"));
    }
}

//! JSON snapshots of catalog result sets.
//!
//! A snapshot is what external tooling captured after running a view's SQL:
//!
//! ```json
//! { "columns": ["object_id", "name"], "rows": [[5, "sysrscols"], [7, null]] }
//! ```
//!
//! JSON has no types beyond number, string and bool, so values are coerced
//! using the column types of the view the snapshot is mapped through. An
//! optional `"types"` header (`["int", "nvarchar", ...]`) types the columns
//! the view does not declare; without it their types are inferred.

use std::borrow::Cow;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::MemoryCursor;
use crate::core::{SqlType, SqlValue, ViewDescriptor};
use crate::error::{CatalogError, Result};

/// A captured result set: column names plus rows of JSON values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSetSnapshot {
    pub columns: Vec<String>,
    /// SQL Server type names, one per column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl ResultSetSnapshot {
    /// Load a snapshot from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a snapshot from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Coerce the snapshot into a cursor using `view`'s column types.
    ///
    /// Columns are matched to the view by name; columns the view does not
    /// declare take their type from the `types` header, or have it inferred
    /// from the JSON values.
    pub fn into_cursor(self, view: &ViewDescriptor) -> Result<MemoryCursor> {
        let declared = self.declared_types()?;
        let types: Vec<Option<SqlType>> = self
            .columns
            .iter()
            .zip(declared)
            .map(|(name, declared)| {
                view.ordinal_of(name)
                    .ok()
                    .map(|i| view.columns[i].sql_type)
                    .or(declared)
            })
            .collect();
        self.coerce(&types)
    }

    /// Coerce the snapshot into a cursor using only the `types` header,
    /// inferring the type of every column it does not name.
    pub fn into_untyped_cursor(self) -> Result<MemoryCursor> {
        let types = self.declared_types()?;
        self.coerce(&types)
    }

    /// Parse the `types` header; `None` for every column when it is absent.
    fn declared_types(&self) -> Result<Vec<Option<SqlType>>> {
        let Some(names) = &self.types else {
            return Ok(vec![None; self.columns.len()]);
        };
        if names.len() != self.columns.len() {
            return Err(CatalogError::invalid_result_set(format!(
                "{} types declared for {} columns",
                names.len(),
                self.columns.len()
            )));
        }

        names
            .iter()
            .zip(&self.columns)
            .map(|(name, column)| {
                SqlType::from_sql_name(name).map(Some).ok_or_else(|| {
                    let known: Vec<&str> = SqlType::ALL.iter().map(|t| t.sql_name()).collect();
                    CatalogError::invalid_result_set(format!(
                        "column '{}': unknown type '{}' (expected one of {})",
                        column,
                        name,
                        known.join(", ")
                    ))
                })
            })
            .collect()
    }

    fn coerce(self, types: &[Option<SqlType>]) -> Result<MemoryCursor> {
        let mut cursor = MemoryCursor::new(self.columns.clone());
        for (row_index, row) in self.rows.into_iter().enumerate() {
            if row.len() != types.len() {
                return Err(CatalogError::invalid_result_set(format!(
                    "row {} has {} values, expected {}",
                    row_index,
                    row.len(),
                    types.len()
                )));
            }

            let values = row
                .into_iter()
                .zip(types)
                .enumerate()
                .map(|(ordinal, (value, ty))| {
                    let coerced = match ty {
                        Some(ty) => coerce_value(value, *ty),
                        None => infer_value(value),
                    };
                    coerced.map_err(|msg| {
                        CatalogError::invalid_result_set(format!(
                            "row {}, column '{}': {}",
                            row_index, self.columns[ordinal], msg
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            cursor.push_row(values)?;
        }
        Ok(cursor)
    }
}

type Coerced = std::result::Result<SqlValue<'static>, String>;

/// Convert a JSON value to `ty`. NULL keeps the target type.
pub fn coerce_value(value: Value, ty: SqlType) -> Coerced {
    if value.is_null() {
        return Ok(SqlValue::Null(ty));
    }

    match ty {
        SqlType::Bool => match &value {
            Value::Bool(b) => Ok(SqlValue::Bool(*b)),
            Value::Number(n) if n.as_u64() == Some(0) => Ok(SqlValue::Bool(false)),
            Value::Number(n) if n.as_u64() == Some(1) => Ok(SqlValue::Bool(true)),
            _ => Err(mismatch(&value, ty)),
        },
        SqlType::U8 => integer(&value, ty).and_then(|i| narrow(i, ty).map(SqlValue::U8)),
        SqlType::I16 => integer(&value, ty).and_then(|i| narrow(i, ty).map(SqlValue::I16)),
        SqlType::I32 => integer(&value, ty).and_then(|i| narrow(i, ty).map(SqlValue::I32)),
        SqlType::I64 => integer(&value, ty).and_then(|i| narrow(i, ty).map(SqlValue::I64)),
        SqlType::F32 => value
            .as_f64()
            .map(|f| SqlValue::F32(f as f32))
            .ok_or_else(|| mismatch(&value, ty)),
        SqlType::F64 => value
            .as_f64()
            .map(SqlValue::F64)
            .ok_or_else(|| mismatch(&value, ty)),
        SqlType::Decimal => {
            let text = match &value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return Err(mismatch(&value, ty)),
            };
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map(SqlValue::Decimal)
                .map_err(|e| format!("invalid decimal '{}': {}", text, e))
        }
        SqlType::Text => match value {
            Value::String(s) => Ok(SqlValue::Text(Cow::Owned(s))),
            other => Err(mismatch(&other, ty)),
        },
        _ => {
            let text = value.as_str().ok_or_else(|| mismatch(&value, ty))?;
            parse_text(text, ty)
        }
    }
}

fn parse_text(text: &str, ty: SqlType) -> Coerced {
    let parsed = match ty {
        SqlType::Bytes => {
            let digits = text
                .strip_prefix("0x")
                .or_else(|| text.strip_prefix("0X"))
                .unwrap_or(text);
            hex::decode(digits)
                .map(|b| SqlValue::Bytes(Cow::Owned(b)))
                .map_err(|e| e.to_string())
        }
        SqlType::Uuid => Uuid::parse_str(text)
            .map(SqlValue::Uuid)
            .map_err(|e| e.to_string()),
        SqlType::DateTime => NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
            .map(SqlValue::DateTime)
            .map_err(|e| e.to_string()),
        SqlType::DateTimeOffset => DateTime::parse_from_rfc3339(text)
            .map(SqlValue::DateTimeOffset)
            .map_err(|e| e.to_string()),
        SqlType::Date => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(SqlValue::Date)
            .map_err(|e| e.to_string()),
        SqlType::Time => NaiveTime::parse_from_str(text, "%H:%M:%S%.f")
            .map(SqlValue::Time)
            .map_err(|e| e.to_string()),
        _ => return Err(format!("cannot parse '{}' as {}", text, ty)),
    };
    parsed.map_err(|e| format!("invalid {} '{}': {}", ty, text, e))
}

/// Convert a JSON value without a declared type.
pub fn infer_value(value: Value) -> Coerced {
    match value {
        Value::Null => Ok(SqlValue::Null(SqlType::Text)),
        Value::Bool(b) => Ok(SqlValue::Bool(b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(SqlValue::I64(i)),
            None => n
                .as_f64()
                .map(SqlValue::F64)
                .ok_or_else(|| format!("unrepresentable number {}", n)),
        },
        Value::String(s) => Ok(SqlValue::Text(Cow::Owned(s))),
        other => Err(format!("nested JSON value {} is not a column value", other)),
    }
}

fn integer(value: &Value, ty: SqlType) -> std::result::Result<i64, String> {
    value.as_i64().ok_or_else(|| mismatch(value, ty))
}

fn narrow<T: TryFrom<i64>>(value: i64, ty: SqlType) -> std::result::Result<T, String> {
    T::try_from(value).map_err(|_| format!("{} is out of range for {}", value, ty))
}

fn mismatch(value: &Value, ty: SqlType) -> String {
    format!("cannot convert {} to {}", value, ty)
}

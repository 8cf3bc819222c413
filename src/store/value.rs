//! # Values and Rows
//!
//! Parameter values bound to positional placeholders, and result rows
//! keyed by column name.

use rusqlite::types::{ToSql, ToSqlOutput, ValueRef};

use super::errors::{StoreError, StoreResult};

/// A value bound to a `?` placeholder or read back from a column
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl SqlValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<ValueRef<'_>> for SqlValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => SqlValue::Null,
            ValueRef::Integer(v) => SqlValue::Integer(v),
            ValueRef::Real(v) => SqlValue::Real(v),
            ValueRef::Text(text) => SqlValue::Text(String::from_utf8_lossy(text).into_owned()),
            ValueRef::Blob(bytes) => SqlValue::Blob(bytes.to_vec()),
        }
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            SqlValue::Integer(v) => ToSqlOutput::Borrowed(ValueRef::Integer(*v)),
            SqlValue::Real(v) => ToSqlOutput::Borrowed(ValueRef::Real(*v)),
            SqlValue::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            SqlValue::Blob(v) => ToSqlOutput::Borrowed(ValueRef::Blob(v)),
        })
    }
}

/// One result row, columns in select order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<(String, SqlValue)>,
}

impl Row {
    pub fn new(columns: Vec<(String, SqlValue)>) -> Self {
        Self { columns }
    }

    /// Look up a column by name
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn get_i64(&self, column: &str) -> StoreResult<i64> {
        self.get(column)
            .and_then(SqlValue::as_i64)
            .ok_or_else(|| StoreError::Decode(format!("expected integer column '{}'", column)))
    }

    pub fn get_str(&self, column: &str) -> StoreResult<&str> {
        self.get(column)
            .and_then(SqlValue::as_str)
            .ok_or_else(|| StoreError::Decode(format!("expected text column '{}'", column)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_lookup() {
        let row = Row::new(vec![
            ("id".to_string(), SqlValue::Integer(7)),
            ("book_name".to_string(), SqlValue::Text("Dune".to_string())),
        ]);

        assert_eq!(row.get_i64("id").unwrap(), 7);
        assert_eq!(row.get_str("book_name").unwrap(), "Dune");
        assert!(row.get("author").is_none());
    }

    #[test]
    fn test_row_type_mismatch() {
        let row = Row::new(vec![("id".to_string(), SqlValue::Text("7".to_string()))]);
        assert!(matches!(row.get_i64("id"), Err(StoreError::Decode(_))));
    }
}

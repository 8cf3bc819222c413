//! # Book Model
//!
//! The single record type served by the API, decoded from store rows.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::store::{Row, StoreError, StoreResult};

/// Storage format of `published_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage format of `created_at`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A stored book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub book_name: String,
    pub description: String,
    pub author: String,
    pub published_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl TryFrom<&Row> for Book {
    type Error = StoreError;

    fn try_from(row: &Row) -> StoreResult<Self> {
        let published_date = row.get_str("published_date")?;
        let created_at = row.get_str("created_at")?;

        Ok(Self {
            id: row.get_i64("id")?,
            book_name: row.get_str("book_name")?.to_string(),
            description: row.get_str("description")?.to_string(),
            author: row.get_str("author")?.to_string(),
            published_date: NaiveDate::parse_from_str(published_date, DATE_FORMAT).map_err(
                |e| StoreError::Decode(format!("published_date {:?}: {}", published_date, e)),
            )?,
            created_at: NaiveDateTime::parse_from_str(created_at, TIMESTAMP_FORMAT).map_err(
                |e| StoreError::Decode(format!("created_at {:?}: {}", created_at, e)),
            )?,
        })
    }
}

/// Decode every row, failing on the first malformed one
pub fn books_from_rows(rows: &[Row]) -> StoreResult<Vec<Book>> {
    rows.iter().map(Book::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqlValue;

    fn row(published_date: &str, created_at: &str) -> Row {
        Row::new(vec![
            ("id".to_string(), SqlValue::Integer(3)),
            ("book_name".to_string(), SqlValue::Text("Dune".to_string())),
            ("description".to_string(), SqlValue::Text(String::new())),
            ("author".to_string(), SqlValue::Text("Frank Herbert".to_string())),
            ("published_date".to_string(), SqlValue::Text(published_date.to_string())),
            ("created_at".to_string(), SqlValue::Text(created_at.to_string())),
        ])
    }

    #[test]
    fn test_book_from_row() {
        let book = Book::try_from(&row("1965-08-01", "2024-01-15 10:20:30.456")).unwrap();
        assert_eq!(book.id, 3);
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.published_date, NaiveDate::from_ymd_opt(1965, 8, 1).unwrap());
    }

    #[test]
    fn test_book_serializes_dates_as_strings() {
        let book = Book::try_from(&row("1965-08-01", "2024-01-15 10:20:30")).unwrap();
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["published_date"], "1965-08-01");
        assert_eq!(json["created_at"], "2024-01-15T10:20:30");
    }

    #[test]
    fn test_bad_stored_date_is_decode_error() {
        let err = Book::try_from(&row("someday", "2024-01-15 10:20:30")).unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }
}

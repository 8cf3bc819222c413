//! # Request Validation
//!
//! Raw request bodies deserialize into the `*Request` structs, which keep
//! every field optional so that missing input is reported by `validate`
//! with a specific message rather than by the JSON decoder.
//!
//! Checks run in a fixed order: required fields, `book_name` length,
//! `author` length, `published_date`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Maximum length, in characters, of `book_name` and `author`
pub const MAX_TEXT_LEN: usize = 150;

/// Client-correctable input errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("book_name, author and published_date are required")]
    RequiredFieldsMissing,

    #[error("book_name must be at most 150 characters")]
    BookNameTooLong,

    #[error("author must be at most 150 characters")]
    AuthorTooLong,

    #[error("published_date must be a valid date")]
    InvalidDate,

    #[error("description is required")]
    DescriptionRequired,

    /// Body is not JSON or has fields of the wrong type
    #[error("Invalid request body: {0}")]
    MalformedBody(String),
}

/// Body of `POST /api/books`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBookRequest {
    pub book_name: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub published_date: Option<String>,
}

/// A create request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub book_name: String,
    pub description: String,
    pub author: String,
    pub published_date: NaiveDate,
}

impl CreateBookRequest {
    pub fn validate(self) -> Result<NewBook, ValidationError> {
        let (book_name, author, published_date) = match (
            non_empty(self.book_name),
            non_empty(self.author),
            non_empty(self.published_date),
        ) {
            (Some(name), Some(author), Some(date)) => (name, author, date),
            _ => return Err(ValidationError::RequiredFieldsMissing),
        };

        if book_name.chars().count() > MAX_TEXT_LEN {
            return Err(ValidationError::BookNameTooLong);
        }
        if author.chars().count() > MAX_TEXT_LEN {
            return Err(ValidationError::AuthorTooLong);
        }
        let published_date =
            parse_published_date(&published_date).ok_or(ValidationError::InvalidDate)?;

        Ok(NewBook {
            book_name,
            description: self.description.unwrap_or_default(),
            author,
            published_date,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Body of `PUT /api/books/:id`.
///
/// `description` is `None` when the key is absent and `Some(None)` for an
/// explicit `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookRequest {
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// The new description of an update that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionUpdate {
    pub description: String,
}

impl UpdateBookRequest {
    /// Only a missing key is rejected; `""` and `null` both clear the description.
    pub fn validate(self) -> Result<DescriptionUpdate, ValidationError> {
        match self.description {
            None => Err(ValidationError::DescriptionRequired),
            Some(description) => Ok(DescriptionUpdate {
                description: description.unwrap_or_default(),
            }),
        }
    }
}

/// Parse a calendar date, accepting a plain date or a timestamp whose
/// date part is kept.
pub fn parse_published_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|datetime| datetime.date_naive())
}

//! # Query Parameter Parser
//!
//! Turns the raw query string of list and search requests into typed
//! parameters. Parsing never fails: pagination numbers that cannot be read
//! fall back to their defaults, and empty filters count as absent.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::errors::BookError;

/// Page number used when `page` is absent or unreadable
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when `limit` is absent or unreadable
pub const DEFAULT_LIMIT: i64 = 4;

/// Parameters of `GET /api/books`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
    /// Substring matched against `book_name` or `description`
    pub search: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
        }
    }
}

impl PageRequest {
    pub fn parse(params: &HashMap<String, String>) -> Self {
        Self {
            page: coerce_count(params.get("page"), DEFAULT_PAGE),
            limit: coerce_count(params.get("limit"), DEFAULT_LIMIT),
            search: non_empty(params.get("search")),
        }
    }

    /// Rows skipped before this page
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// Parameters of `GET /api/books/search`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub book_name: Option<String>,
    pub description: Option<String>,
}

impl SearchFilter {
    pub fn parse(params: &HashMap<String, String>) -> Self {
        Self {
            book_name: non_empty(params.get("book_name")),
            description: non_empty(params.get("description")),
        }
    }
}

/// Pagination block returned with a page of books
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_books: i64,
    pub books_per_page: i64,
}

impl Pagination {
    pub fn new(request: &PageRequest, total_books: i64) -> Self {
        Self {
            current_page: request.page,
            total_pages: div_ceil(total_books, request.limit),
            total_books,
            books_per_page: request.limit,
        }
    }
}

fn div_ceil(total: i64, per_page: i64) -> i64 {
    if per_page <= 0 {
        return 0;
    }
    total / per_page + i64::from(total % per_page != 0)
}

/// Resolve a path id. Anything that is not an integer cannot name a row.
pub fn parse_id(raw: &str) -> Result<i64, BookError> {
    raw.trim().parse().map_err(|_| BookError::NotFound)
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

/// Read the leading integer of `raw`; zero, negative and unreadable
/// values yield `default`.
fn coerce_count(raw: Option<&String>, default: i64) -> i64 {
    raw.and_then(|v| leading_integer(v))
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

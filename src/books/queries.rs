//! # Book Statements
//!
//! Every SQL statement the book operations run. List and count share one
//! filter fragment so both see the same rows.

use crate::store::{QueryBuilder, Statement};

use super::model::DATE_FORMAT;
use super::parser::{PageRequest, SearchFilter};
use super::validation::NewBook;

const NEWEST_FIRST: &str = " ORDER BY created_at DESC, id DESC";

/// Insert with parameters `book_name, description, author, published_date`
pub fn insert(book: &NewBook) -> Statement {
    QueryBuilder::new("INSERT INTO books (book_name, description, author, published_date)")
        .push_binds(
            " VALUES (?, ?, ?, ?)",
            [
                book.book_name.clone(),
                book.description.clone(),
                book.author.clone(),
                book.published_date.format(DATE_FORMAT).to_string(),
            ],
        )
        .build()
}

pub fn select_by_id(id: i64) -> Statement {
    QueryBuilder::new("SELECT * FROM books")
        .push_bind(" WHERE id = ?", id)
        .build()
}

pub fn update_description(id: i64, description: &str) -> Statement {
    QueryBuilder::new("UPDATE books")
        .push_bind(" SET description = ?", description)
        .push_bind(" WHERE id = ?", id)
        .build()
}

pub fn delete_by_id(id: i64) -> Statement {
    QueryBuilder::new("DELETE FROM books")
        .push_bind(" WHERE id = ?", id)
        .build()
}

/// One page of books, newest first
pub fn list_page(request: &PageRequest) -> Statement {
    list_filter(QueryBuilder::new("SELECT * FROM books"), request)
        .push(NEWEST_FIRST)
        .push_bind(" LIMIT ?", request.limit)
        .push_bind(" OFFSET ?", request.offset())
        .build()
}

/// Number of books `list_page` pages through
pub fn count_matching(request: &PageRequest) -> Statement {
    list_filter(QueryBuilder::new("SELECT COUNT(*) AS total FROM books"), request).build()
}

fn list_filter(builder: QueryBuilder, request: &PageRequest) -> QueryBuilder {
    match &request.search {
        Some(term) => {
            let pattern = like_pattern(term);
            builder.push_binds(
                " WHERE book_name LIKE ? OR description LIKE ?",
                [pattern.clone(), pattern],
            )
        }
        None => builder,
    }
}

/// All books matching every supplied filter, newest first
pub fn search(filter: &SearchFilter) -> Statement {
    let mut builder = QueryBuilder::new("SELECT * FROM books WHERE 1=1");
    if let Some(book_name) = &filter.book_name {
        builder = builder.push_bind(" AND book_name LIKE ?", like_pattern(book_name));
    }
    if let Some(description) = &filter.description {
        builder = builder.push_bind(" AND description LIKE ?", like_pattern(description));
    }
    builder.push(NEWEST_FIRST).build()
}

fn like_pattern(term: &str) -> String {
    format!("%{}%", term)
}

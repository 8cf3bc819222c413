//! # Book Operations
//!
//! Each operation validates its input, runs the statements it needs and
//! decodes the rows. Existence checks followed by a write are separate
//! statements; a concurrent delete between them is not guarded against.

use std::sync::Arc;

use tracing::debug;

use crate::store::{Store, StoreError};

use super::errors::{BookError, BookResult};
use super::model::{books_from_rows, Book};
use super::parser::{PageRequest, Pagination, SearchFilter};
use super::queries;
use super::validation::{CreateBookRequest, UpdateBookRequest};

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub pagination: Pagination,
}

/// Book operations over a shared store
#[derive(Clone)]
pub struct BookService {
    store: Arc<Store>,
}

impl BookService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Insert a book and return it as stored
    pub async fn create(&self, request: CreateBookRequest) -> BookResult<Book> {
        let book = request.validate()?;

        let execution = self
            .store
            .execute(queries::insert(&book))
            .await
            .map_err(|err| match err {
                StoreError::Conflict(detail) => {
                    debug!(%detail, "duplicate book rejected");
                    BookError::Duplicate
                }
                other => BookError::Store(other),
            })?;

        self.find(execution.last_insert_id)
            .await?
            .ok_or(BookError::NotFound)
    }

    /// Newest books first, `limit` per page
    pub async fn list(&self, request: PageRequest) -> BookResult<BookPage> {
        let rows = self.store.query(queries::list_page(&request)).await?;
        let books = books_from_rows(&rows)?;

        let count = self.store.query(queries::count_matching(&request)).await?;
        let total_books = match count.first() {
            Some(row) => row.get_i64("total")?,
            None => 0,
        };

        Ok(BookPage {
            books,
            pagination: Pagination::new(&request, total_books),
        })
    }

    pub async fn get(&self, id: i64) -> BookResult<Book> {
        self.find(id).await?.ok_or(BookError::NotFound)
    }

    /// Replace the description of an existing book
    pub async fn update(&self, id: i64, request: UpdateBookRequest) -> BookResult<Book> {
        let update = request.validate()?;

        if self.find(id).await?.is_none() {
            return Err(BookError::NotFound);
        }
        self.store
            .execute(queries::update_description(id, &update.description))
            .await?;

        self.find(id).await?.ok_or(BookError::NotFound)
    }

    /// Delete a book, returning it as it was before deletion
    pub async fn delete(&self, id: i64) -> BookResult<Book> {
        let book = self.find(id).await?.ok_or(BookError::NotFound)?;
        self.store.execute(queries::delete_by_id(id)).await?;
        Ok(book)
    }

    /// Books matching every supplied filter; no filters matches all books
    pub async fn search(&self, filter: SearchFilter) -> BookResult<Vec<Book>> {
        let rows = self.store.query(queries::search(&filter)).await?;
        Ok(books_from_rows(&rows)?)
    }

    async fn find(&self, id: i64) -> BookResult<Option<Book>> {
        let rows = self.store.query(queries::select_by_id(id)).await?;
        match rows.first() {
            Some(row) => Ok(Some(Book::try_from(row)?)),
            None => Ok(None),
        }
    }
}

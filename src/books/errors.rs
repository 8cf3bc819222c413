//! Book operation errors.

use thiserror::Error;

use crate::store::StoreError;

use super::validation::ValidationError;

/// Result type for book operations
pub type BookResult<T> = Result<T, BookError>;

#[derive(Debug, Error)]
pub enum BookError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Book not found")]
    NotFound,

    /// `(book_name, author)` is already taken
    #[error("A book with this book_name and author already exists")]
    Duplicate,

    #[error(transparent)]
    Store(#[from] StoreError),
}

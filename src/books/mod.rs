//! # Books Module
//!
//! Create, list, get, update, delete and search over the `books` table.
//!
//! Input flows through three steps:
//! - `validation` / `parser` turn raw request data into typed input
//! - `queries` builds the parameterized statements
//! - `service` runs them against the store and decodes rows into `Book`

pub mod errors;
pub mod model;
pub mod parser;
pub mod queries;
pub mod service;
pub mod validation;

pub use errors::{BookError, BookResult};
pub use model::Book;
pub use parser::{PageRequest, Pagination, SearchFilter};
pub use service::{BookPage, BookService};
pub use validation::{CreateBookRequest, NewBook, UpdateBookRequest, ValidationError};

//! book-api - a book management HTTP API backed by SQLite
//!
//! Layers, leaves first:
//! - `store`: pooled SQLite query executor and statement builder
//! - `books`: validation, statements and operations for book records
//! - `rest_api`: response envelope and error-to-status mapping
//! - `http_server`: axum routes and middleware
//! - `cli`: configuration, logging and process lifecycle

pub mod books;
pub mod cli;
pub mod http_server;
pub mod rest_api;
pub mod store;

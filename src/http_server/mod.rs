//! # HTTP Server Module
//!
//! Axum server exposing the book API.
//!
//! # Endpoints
//!
//! - `/` - Service metadata
//! - `/health` - Health check
//! - `/api/books/*` - Book CRUD and search

pub mod book_routes;
pub mod config;
pub mod index_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;

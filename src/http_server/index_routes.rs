//! Index HTTP Routes
//!
//! Service metadata at `/` and a store-backed health check at `/health`.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::rest_api::{RestError, RestResult};
use crate::store::Store;

/// Service metadata response
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

const ENDPOINTS: [(&str, &str); 6] = [
    ("POST /api/books", "Create new book"),
    ("GET /api/books", "Get all books with pagination"),
    ("GET /api/books/:id", "Get single book"),
    ("PUT /api/books/:id", "Update book description"),
    ("DELETE /api/books/:id", "Delete book"),
    ("GET /api/books/search", "Search books"),
];

/// Create index routes
pub fn index_routes(store: Arc<Store>) -> Router {
    Router::new()
        .route("/", get(service_info_handler))
        .route("/health", get(health_handler))
        .with_state(store)
}

pub fn service_info() -> ServiceInfo {
    ServiceInfo {
        message: "Book Management API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: ENDPOINTS.into_iter().collect(),
    }
}

async fn service_info_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(service_info()))
}

/// Health check handler; fails when the store cannot answer a query
async fn health_handler(State(store): State<Arc<Store>>) -> RestResult<Json<HealthResponse>> {
    store
        .ping()
        .await
        .map_err(|e| RestError::Internal(format!("health check failed: {}", e)))?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

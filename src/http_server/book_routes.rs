//! Book HTTP Routes
//!
//! `/api/books` endpoints. Each handler extracts raw input, calls the
//! matching `BookService` operation and wraps the result in the envelope.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, MethodRouter},
    Json, Router,
};

use crate::books::parser::parse_id;
use crate::books::{
    Book, BookError, BookService, CreateBookRequest, PageRequest, SearchFilter,
    UpdateBookRequest,
};
use crate::rest_api::{Envelope, RestError, RestResult};

type Reply<T> = RestResult<(StatusCode, Json<Envelope<T>>)>;

type BookMethodRouter = MethodRouter<Arc<BookService>>;

/// Create book routes under `/api/books`
///
/// Every path also answers with a trailing slash. `/search` is a static
/// segment and always takes precedence over `/:id`.
pub fn book_routes(service: Arc<BookService>) -> Router {
    let routes: [(&str, fn() -> BookMethodRouter); 3] = [
        ("/api/books", collection_routes),
        ("/api/books/search", search_routes),
        ("/api/books/:id", item_routes),
    ];

    routes
        .into_iter()
        .fold(Router::<Arc<BookService>>::new(), |router, (path, methods)| {
            router
                .route(path, methods())
                .route(&format!("{}/", path), methods())
        })
        .with_state(service)
}

fn collection_routes() -> BookMethodRouter {
    get(list_books_handler)
        .post(create_book_handler)
        .fallback(method_not_allowed_handler)
}

fn search_routes() -> BookMethodRouter {
    get(search_books_handler).fallback(method_not_allowed_handler)
}

fn item_routes() -> BookMethodRouter {
    get(get_book_handler)
        .put(update_book_handler)
        .delete(delete_book_handler)
        .fallback(method_not_allowed_handler)
}

/// A body sent without a JSON content type reads as `{}`
fn json_body<T: Default>(body: Result<Json<T>, JsonRejection>) -> RestResult<T> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(rejection.into()),
    }
}

/// An id segment that cannot be decoded names no book
fn book_id(path: Result<Path<String>, PathRejection>) -> RestResult<i64> {
    let Path(raw) = path.map_err(|_| RestError::from(BookError::NotFound))?;
    Ok(parse_id(&raw)?)
}

async fn create_book_handler(
    State(service): State<Arc<BookService>>,
    body: Result<Json<CreateBookRequest>, JsonRejection>,
) -> Reply<Book> {
    let request = json_body(body)?;
    let book = service.create(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(book).with_message("Book created successfully")),
    ))
}

async fn list_books_handler(
    State(service): State<Arc<BookService>>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply<Vec<Book>> {
    let page = service.list(PageRequest::parse(&params)).await?;

    Ok((
        StatusCode::OK,
        Json(Envelope::data(page.books).with_pagination(page.pagination)),
    ))
}

async fn search_books_handler(
    State(service): State<Arc<BookService>>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply<Vec<Book>> {
    let books = service.search(SearchFilter::parse(&params)).await?;
    let total = books.len();

    Ok((StatusCode::OK, Json(Envelope::data(books).with_total(total))))
}

async fn get_book_handler(
    State(service): State<Arc<BookService>>,
    path: Result<Path<String>, PathRejection>,
) -> Reply<Book> {
    let book = service.get(book_id(path)?).await?;

    Ok((StatusCode::OK, Json(Envelope::data(book))))
}

async fn update_book_handler(
    State(service): State<Arc<BookService>>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<UpdateBookRequest>, JsonRejection>,
) -> Reply<Book> {
    let id = book_id(path)?;
    let request = json_body(body)?;
    let book = service.update(id, request).await?;

    Ok((
        StatusCode::OK,
        Json(Envelope::data(book).with_message("Book description updated successfully")),
    ))
}

async fn delete_book_handler(
    State(service): State<Arc<BookService>>,
    path: Result<Path<String>, PathRejection>,
) -> Reply<Book> {
    let book = service.delete(book_id(path)?).await?;

    Ok((
        StatusCode::OK,
        Json(Envelope::data(book).with_message("Book deleted successfully")),
    ))
}

async fn method_not_allowed_handler() -> RestError {
    RestError::EndpointNotFound
}

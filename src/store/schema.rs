//! Books table definition, applied idempotently at startup.

/// `created_at` keeps millisecond precision so insertion order sorts
/// reliably; `(book_name, author)` is unique.
pub const BOOKS_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    book_name VARCHAR(150) NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    author VARCHAR(150) NOT NULL,
    published_date DATE NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
    UNIQUE (book_name, author)
);
CREATE INDEX IF NOT EXISTS idx_books_created_at ON books (created_at);
";

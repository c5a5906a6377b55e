use crate::db::*;
use crate::error::{AppError, Result};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, Row, ToSql, params};
use std::path::Path;
use std::sync::Arc;

const LISTING_COLUMNS: &str = "b.id, b.isbn, b.title, b.publication_year, b.author_id, a.name";

/// Database wrapper for thread-safe access.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| AppError::Internal(format!("Failed to open database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.initialize_schema()?;
        Ok(db)
    }

    /// Open in-memory database (for testing).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::Internal(format!("Failed to open database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize database schema.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            -- Authors table
            CREATE TABLE IF NOT EXISTS authors (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                birth_date TEXT,
                date_of_death TEXT
            );

            -- Books table
            CREATE TABLE IF NOT EXISTS books (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                isbn TEXT NOT NULL,
                title TEXT NOT NULL,
                publication_year INTEGER,
                author_id INTEGER NOT NULL,
                FOREIGN KEY (author_id) REFERENCES authors(id)
            );

            CREATE INDEX IF NOT EXISTS idx_books_author ON books(author_id);
            "#,
        )
        .map_err(|e| AppError::Internal(format!("Failed to initialize schema: {}", e)))?;

        Ok(())
    }

    // ========== AUTHOR OPERATIONS ==========

    /// Insert a new author and return it with its assigned ID.
    pub fn add_author(&self, author: &NewAuthor) -> Result<Author> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO authors (name, birth_date, date_of_death) VALUES (?1, ?2, ?3)",
            params![author.name, author.birth_date, author.date_of_death],
        )
        .map_err(|e| AppError::Internal(format!("Failed to create author: {}", e)))?;

        let id = conn.last_insert_rowid();
        tracing::info!(author_id = id, name = %author.name, "Author added");

        Ok(Author {
            id,
            name: author.name.clone(),
            birth_date: author.birth_date,
            date_of_death: author.date_of_death,
        })
    }

    /// Get author by ID.
    pub fn get_author(&self, id: i64) -> Result<Option<Author>> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT id, name, birth_date, date_of_death FROM authors WHERE id = ?1",
            params![id],
            Self::row_to_author,
        )
        .optional()
        .map_err(|e| AppError::Internal(format!("Failed to get author: {}", e)))
    }

    /// List all authors, ordered by name.
    pub fn list_authors(&self) -> Result<Vec<Author>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT id, name, birth_date, date_of_death
                 FROM authors ORDER BY name, id",
            )
            .map_err(|e| AppError::Internal(format!("Failed to prepare query: {}", e)))?;

        let authors = stmt
            .query_map([], Self::row_to_author)
            .map_err(|e| AppError::Internal(format!("Failed to list authors: {}", e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| AppError::Internal(format!("Failed to collect authors: {}", e)))?;

        Ok(authors)
    }

    fn row_to_author(row: &Row<'_>) -> rusqlite::Result<Author> {
        Ok(Author {
            id: row.get(0)?,
            name: row.get(1)?,
            birth_date: row.get(2)?,
            date_of_death: row.get(3)?,
        })
    }

    // ========== BOOK OPERATIONS ==========

    /// Insert a new book for an existing author.
    pub fn add_book(&self, book: &NewBook) -> Result<Book> {
        let mut conn = self.conn.lock();
        let tx = conn
            .transaction()
            .map_err(|e| AppError::Internal(format!("Failed to begin transaction: {}", e)))?;

        let author_exists = tx
            .query_row(
                "SELECT 1 FROM authors WHERE id = ?1",
                params![book.author_id],
                |_| Ok(()),
            )
            .optional()
            .map_err(|e| AppError::Internal(format!("Failed to look up author: {}", e)))?
            .is_some();

        if !author_exists {
            return Err(AppError::Integrity(format!(
                "Author {} does not exist",
                book.author_id
            )));
        }

        tx.execute(
            "INSERT INTO books (isbn, title, publication_year, author_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![book.isbn, book.title, book.publication_year, book.author_id],
        )
        .map_err(|e| AppError::Internal(format!("Failed to create book: {}", e)))?;

        let id = tx.last_insert_rowid();
        tx.commit()
            .map_err(|e| AppError::Internal(format!("Failed to commit book: {}", e)))?;

        tracing::info!(book_id = id, author_id = book.author_id, title = %book.title, "Book added");

        Ok(Book {
            id,
            isbn: book.isbn.clone(),
            title: book.title.clone(),
            publication_year: book.publication_year,
            author_id: book.author_id,
        })
    }

    /// Get book by ID.
    pub fn get_book(&self, id: i64) -> Result<Option<Book>> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT id, isbn, title, publication_year, author_id FROM books WHERE id = ?1",
            params![id],
            Self::row_to_book,
        )
        .optional()
        .map_err(|e| AppError::Internal(format!("Failed to get book: {}", e)))
    }

    /// List books joined with their author's name.
    ///
    /// A non-empty `search` filters on title substring, ignoring ASCII case,
    /// and takes precedence over `sort_by`. Without either, books come back in insertion order.
    pub fn list_books(
        &self,
        sort_by: Option<SortBy>,
        search: Option<&str>,
    ) -> Result<Vec<BookListing>> {
        let search = search.filter(|s| !s.is_empty());

        let clause = match (search, sort_by) {
            (Some(_), _) => "WHERE instr(lower(b.title), lower(?1)) > 0 ORDER BY b.id",
            (None, Some(SortBy::Title)) => "ORDER BY b.title, b.id",
            (None, Some(SortBy::Author)) => "ORDER BY a.name, b.id",
            (None, None) => "ORDER BY b.id",
        };
        let sql = format!(
            "SELECT {LISTING_COLUMNS} FROM books b JOIN authors a ON a.id = b.author_id {clause}"
        );
        let args: Vec<&dyn ToSql> = match &search {
            Some(term) => vec![term as &dyn ToSql],
            None => Vec::new(),
        };

        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| AppError::Internal(format!("Failed to prepare query: {}", e)))?;

        let books = stmt
            .query_map(args.as_slice(), |row| {
                Ok(BookListing {
                    book: Self::row_to_book(row)?,
                    author_name: row.get(5)?,
                })
            })
            .map_err(|e| AppError::Internal(format!("Failed to list books: {}", e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| AppError::Internal(format!("Failed to collect books: {}", e)))?;

        Ok(books)
    }

    /// Delete a book, removing its author too when no other books remain.
    pub fn delete_book(&self, id: i64) -> Result<DeletedBook> {
        let mut conn = self.conn.lock();
        let tx = conn
            .transaction()
            .map_err(|e| AppError::Internal(format!("Failed to begin transaction: {}", e)))?;

        let book = tx
            .query_row(
                "SELECT id, isbn, title, publication_year, author_id FROM books WHERE id = ?1",
                params![id],
                Self::row_to_book,
            )
            .optional()
            .map_err(|e| AppError::Internal(format!("Failed to get book: {}", e)))?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        tx.execute("DELETE FROM books WHERE id = ?1", params![id])
            .map_err(|e| AppError::Internal(format!("Failed to delete book: {}", e)))?;

        let remaining: i64 = tx
            .query_row(
                "SELECT COUNT(*) FROM books WHERE author_id = ?1",
                params![book.author_id],
                |row| row.get(0),
            )
            .map_err(|e| AppError::Internal(format!("Failed to count books: {}", e)))?;

        let author_removed = remaining == 0;
        if author_removed {
            tx.execute("DELETE FROM authors WHERE id = ?1", params![book.author_id])
                .map_err(|e| AppError::Internal(format!("Failed to delete author: {}", e)))?;
        }

        tx.commit()
            .map_err(|e| AppError::Internal(format!("Failed to commit delete: {}", e)))?;

        tracing::info!(
            book_id = id,
            author_id = book.author_id,
            author_removed,
            "Book deleted"
        );

        Ok(DeletedBook {
            book,
            author_removed,
        })
    }

    fn row_to_book(row: &Row<'_>) -> rusqlite::Result<Book> {
        Ok(Book {
            id: row.get(0)?,
            isbn: row.get(1)?,
            title: row.get(2)?,
            publication_year: row.get(3)?,
            author_id: row.get(4)?,
        })
    }
}

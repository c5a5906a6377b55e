//! book-alchemy: a small library catalog for books and authors.
//!
//! Books and authors live in SQLite and are managed through server-rendered
//! pages or the command line.
//!
//! # Features
//!
//! - List books, sorted by title or author name
//! - Title substring search
//! - Add authors and books with validated form input
//! - Delete books, removing an author together with their last book

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Configuration and CLI.
pub mod config;
/// Catalog store.
pub mod db;
/// Error types.
pub mod error;
/// Form input validation.
pub mod forms;
/// HTTP server.
pub mod server;


pub use config::{Cli, Command, Config};
pub use db::Database;
pub use error::{AppError, Result};
pub use server::AppState;

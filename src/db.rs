mod schema;

pub use schema::Database;

use chrono::NaiveDate;

/// Author record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// Unique author ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Date of death, if applicable.
    pub date_of_death: Option<NaiveDate>,
}

/// Book record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Unique book ID.
    pub id: i64,
    /// ISBN, stored as given.
    pub isbn: String,
    /// Book title.
    pub title: String,
    /// Year of publication.
    pub publication_year: Option<i64>,
    /// Owning author.
    pub author_id: i64,
}

/// Book joined with its author's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookListing {
    /// The book row.
    pub book: Book,
    /// Name of the book's author.
    pub author_name: String,
}

/// Validated input for a new author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    /// Display name.
    pub name: String,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Date of death.
    pub date_of_death: Option<NaiveDate>,
}

/// Validated input for a new book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    /// Book title.
    pub title: String,
    /// ISBN.
    pub isbn: String,
    /// Year of publication.
    pub publication_year: Option<i64>,
    /// Author the book belongs to.
    pub author_id: i64,
}

/// Outcome of deleting a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedBook {
    /// The removed book.
    pub book: Book,
    /// Whether the author was removed because this was their last book.
    pub author_removed: bool,
}

/// Listing order for books.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    /// Title ascending.
    Title,
    /// Author name ascending.
    Author,
}

impl SortBy {
    /// Parse a `sort_by` query value. Unknown values mean storage order.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "title" => Some(SortBy::Title),
            "author" => Some(SortBy::Author),
            _ => None,
        }
    }

    /// Query-string value for this order.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Title => "title",
            SortBy::Author => "author",
        }
    }
}

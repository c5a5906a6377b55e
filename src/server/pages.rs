//! Server-rendered HTML pages.

use crate::db::{Author, BookListing, SortBy};
use crate::forms::{AuthorForm, BookForm};
use quick_xml::escape::escape;
use std::fmt::Write;

/// Message banner shown above a page's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Operation succeeded.
    Success(String),
    /// Submission was rejected.
    Error(String),
}

impl Notice {
    fn render(&self) -> String {
        let (class, text) = match self {
            Notice::Success(text) => ("success", text),
            Notice::Error(text) => ("error", text),
        };
        format!(r#"<p class="notice {}">{}</p>"#, class, escape(text.as_str()))
    }
}

/// Listing page state, echoed back into links and the search box.
#[derive(Debug, Clone, Default)]
pub struct HomeView<'a> {
    /// Active sort order.
    pub sort_by: Option<SortBy>,
    /// Active search term.
    pub search: Option<&'a str>,
    /// Banner to show.
    pub notice: Option<Notice>,
}

fn layout(site_title: &str, heading: &str, notice: Option<&Notice>, body: &str) -> String {
    let site_title = escape(site_title);
    let notice = notice.map(Notice::render).unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{heading} - {site_title}</title>
    <style>
        body {{ font-family: system-ui, sans-serif; max-width: 800px; margin: 2rem auto; padding: 0 1rem; }}
        h1 {{ color: #333; }}
        a {{ color: #0066cc; }}
        nav a {{ margin-right: 1rem; }}
        table {{ border-collapse: collapse; width: 100%; }}
        th, td {{ text-align: left; padding: 0.4rem; border-bottom: 1px solid #ddd; }}
        label {{ display: block; margin-top: 0.6rem; }}
        .notice {{ padding: 0.6rem 1rem; border-radius: 8px; }}
        .success {{ background: #e6f4ea; }}
        .error {{ background: #fce8e6; }}
    </style>
</head>
<body>
    <h1>{site_title}</h1>
    <nav><a href="/">Books</a><a href="/add_author">Add author</a><a href="/add_book">Add book</a></nav>
    <h2>{heading}</h2>
    {notice}
    {body}
</body>
</html>"#
    )
}

/// Book listing with search, sort links and delete buttons.
pub fn home(site_title: &str, books: &[BookListing], view: &HomeView<'_>) -> String {
    let mut body = String::new();

    let search_value = escape(view.search.unwrap_or_default());
    let _ = write!(
        body,
        r#"<form method="get" action="/">
        <input type="text" name="search" value="{search_value}" placeholder="Search titles">
        <button type="submit">Search</button>
    </form>
    <p>Sort by: <a href="/?sort_by={title}">Title</a> | <a href="/?sort_by={author}">Author</a></p>"#,
        title = SortBy::Title.as_str(),
        author = SortBy::Author.as_str(),
    );

    if books.is_empty() {
        body.push_str("<p>No books found.</p>");
        return layout(site_title, "Books", view.notice.as_ref(), &body);
    }

    body.push_str(
        "<table><thead><tr><th>Title</th><th>Author</th><th>Year</th><th>ISBN</th><th></th></tr></thead><tbody>",
    );
    for entry in books {
        let book = &entry.book;
        let year = book
            .publication_year
            .map(|y| y.to_string())
            .unwrap_or_default();
        let _ = write!(
            body,
            r#"<tr><td>{title}</td><td>{author}</td><td>{year}</td><td>{isbn}</td><td><form method="post" action="/book/{id}/delete"><button type="submit">Delete</button></form></td></tr>"#,
            title = escape(book.title.as_str()),
            author = escape(entry.author_name.as_str()),
            isbn = escape(book.isbn.as_str()),
            id = book.id,
        );
    }
    body.push_str("</tbody></table>");

    layout(site_title, "Books", view.notice.as_ref(), &body)
}

/// Add-author form, pre-filled with `form` after a rejected submission.
pub fn add_author(site_title: &str, form: &AuthorForm, notice: Option<&Notice>) -> String {
    let body = format!(
        r#"<form method="post" action="/add_author">
        <label>Name <input type="text" name="name" value="{name}" required></label>
        <label>Birth date <input type="date" name="birth_date" value="{birth}" required></label>
        <label>Date of death <input type="date" name="date_of_death" value="{death}"></label>
        <p><button type="submit">Add author</button></p>
    </form>"#,
        name = escape(form.name.as_str()),
        birth = escape(form.birth_date.as_str()),
        death = escape(form.date_of_death.as_deref().unwrap_or_default()),
    );

    layout(site_title, "Add author", notice, &body)
}

/// Add-book form with the author selection list.
pub fn add_book(
    site_title: &str,
    authors: &[Author],
    form: &BookForm,
    notice: Option<&Notice>,
) -> String {
    let mut options = String::new();
    for author in authors {
        let selected = if form.author_id.trim() == author.id.to_string() {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            options,
            r#"<option value="{}"{}>{}</option>"#,
            author.id,
            selected,
            escape(author.name.as_str())
        );
    }

    let body = format!(
        r#"<form method="post" action="/add_book">
        <label>Title <input type="text" name="title" value="{title}" required></label>
        <label>ISBN <input type="text" name="isbn" value="{isbn}" required></label>
        <label>Publication year <input type="number" name="publication_year" value="{year}" required></label>
        <label>Author <select name="author_id" required>{options}</select></label>
        <p><button type="submit">Add book</button></p>
    </form>"#,
        title = escape(form.title.as_str()),
        isbn = escape(form.isbn.as_str()),
        year = escape(form.publication_year.as_str()),
    );

    layout(site_title, "Add book", notice, &body)
}

/// Page for an unknown resource.
pub fn not_found(site_title: &str, message: &str) -> String {
    let body = format!(r#"<p>{}</p><p><a href="/">Back to books</a></p>"#, escape(message));
    layout(site_title, "Not found", None, &body)
}

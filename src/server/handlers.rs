//! HTTP request handlers.

use crate::db::SortBy;
use crate::error::{AppError, Result};
use crate::forms::{AuthorForm, BookForm};
use crate::server::AppState;
use crate::server::pages::{self, HomeView, Notice};
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

/// Query parameters for the book listing.
#[derive(Debug, Default, Deserialize)]
pub struct HomeParams {
    sort_by: Option<String>,
    search: Option<String>,
    success_message: Option<String>,
}

/// Book listing page.
pub async fn home(
    State(state): State<AppState>,
    Query(params): Query<HomeParams>,
) -> Result<Html<String>> {
    let sort_by = params.sort_by.as_deref().and_then(SortBy::parse);
    let search = params.search.as_deref().filter(|s| !s.is_empty());

    let books = state.db.list_books(sort_by, search)?;

    let view = HomeView {
        sort_by,
        search,
        notice: params
            .success_message
            .filter(|m| !m.is_empty())
            .map(Notice::Success),
    };

    Ok(Html(pages::home(state.title(), &books, &view)))
}

/// Empty add-author form.
pub async fn add_author_form(State(state): State<AppState>) -> Html<String> {
    Html(pages::add_author(
        state.title(),
        &AuthorForm::default(),
        None,
    ))
}

/// Add-author submission.
pub async fn add_author(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> Result<Response> {
    let created = form.validate().and_then(|author| state.db.add_author(&author));

    match created {
        Ok(_) => {
            let notice = Notice::Success("Author added successfully!".to_string());
            Ok(Html(pages::add_author(
                state.title(),
                &AuthorForm::default(),
                Some(&notice),
            ))
            .into_response())
        }
        Err(e @ AppError::InvalidFormat(_)) => {
            tracing::debug!(error = %e, "Rejected author submission");
            let notice = Notice::Error(e.to_string());
            Ok((
                e.status_code(),
                Html(pages::add_author(state.title(), &form, Some(&notice))),
            )
                .into_response())
        }
        Err(e) => Err(e),
    }
}

/// Empty add-book form with the author list.
pub async fn add_book_form(State(state): State<AppState>) -> Result<Html<String>> {
    let authors = state.db.list_authors()?;
    Ok(Html(pages::add_book(
        state.title(),
        &authors,
        &BookForm::default(),
        None,
    )))
}

/// Add-book submission.
pub async fn add_book(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> Result<Response> {
    let created = form.validate().and_then(|book| state.db.add_book(&book));
    let authors = state.db.list_authors()?;

    match created {
        Ok(_) => {
            let notice = Notice::Success("Book added successfully!".to_string());
            Ok(Html(pages::add_book(
                state.title(),
                &authors,
                &BookForm::default(),
                Some(&notice),
            ))
            .into_response())
        }
        Err(e @ (AppError::InvalidFormat(_) | AppError::Integrity(_))) => {
            tracing::debug!(error = %e, "Rejected book submission");
            let notice = Notice::Error(e.to_string());
            Ok((
                e.status_code(),
                Html(pages::add_book(state.title(), &authors, &form, Some(&notice))),
            )
                .into_response())
        }
        Err(e) => Err(e),
    }
}

/// Delete a book, then return to the listing.
pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
) -> Result<Response> {
    match state.db.delete_book(book_id) {
        Ok(_) => {
            let target = format!(
                "/?success_message={}",
                urlencoding::encode("Book deleted successfully!")
            );
            Ok(Redirect::to(&target).into_response())
        }
        Err(e @ AppError::NotFound(_)) => Ok((
            StatusCode::NOT_FOUND,
            Html(pages::not_found(state.title(), &e.to_string())),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

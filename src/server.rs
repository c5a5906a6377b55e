//! HTTP server and routes.

mod handlers;
pub mod pages;
mod state;

pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route(
            "/add_author",
            get(handlers::add_author_form).post(handlers::add_author),
        )
        .route(
            "/add_book",
            get(handlers::add_book_form).post(handlers::add_book),
        )
        .route("/book/{book_id}/delete", post(handlers::delete_book))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! HTTP server and routes.

mod cover;
mod handlers;
mod pages;
mod state;

pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let book_routes = Router::new()
        .route("/{id}", get(handlers::book_detail))
        .route("/{id}/read", get(handlers::book_reader));

    let api_routes = Router::new()
        .route("/books", get(handlers::api_books))
        .route("/books/{id}", get(handlers::api_book))
        .route("/categories", get(handlers::api_categories))
        .route("/stats", get(handlers::api_stats));

    Router::new()
        .route("/", get(handlers::index))
        .route("/library", get(handlers::library))
        .route("/about", get(handlers::about))
        .route("/about/contact", post(handlers::contact))
        .route("/covers/{file}", get(handlers::cover))
        .route("/health", get(handlers::health))
        .nest("/book", book_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

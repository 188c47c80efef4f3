//! HTTP request handlers.

use crate::error::{AppError, Result};
use crate::library::book::Book;
use crate::library::query::{Query as CatalogQuery, QueryParams};
use crate::server::cover;
use crate::server::pages;
use crate::server::AppState;
use crate::view::{LibraryParams, LibraryView, ReaderParams, ReaderView};
use axum::{
    Form, Json,
    body::Body,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};

/// Build a response, returning 500 on error (which shouldn't happen).
fn build_response(status: StatusCode, content_type: &str, body: impl Into<Body>) -> Response<Body> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, "public, max-age=86400")
        .body(body.into())
        .unwrap_or_else(|_| {
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(Body::from("Internal error"))
                .unwrap_or_default()
        })
}

// ============================================================================
// WEB PAGES
// ============================================================================

/// Home page.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(pages::home(&state.config.server.title, &state.catalog).into_string())
}

/// Library listing.
pub async fn library(
    State(state): State<AppState>,
    Query(params): Query<LibraryParams>,
) -> Html<String> {
    let view = LibraryView::from_params(&params);
    let results = state.query(&view.query);

    tracing::debug!(
        search = %view.query.search,
        category = view.query.category.as_param(),
        format = view.query.format.as_param(),
        sort = %view.query.sort,
        results = results.len(),
        "Library query"
    );

    Html(pages::library(&state.config.server.title, &state.catalog, &view, &results).into_string())
}

/// Book detail page. Unknown ids go back to the library.
pub async fn book_detail(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(book) = state.catalog.get_book(&id) else {
        tracing::debug!(id = %id, "Unknown book, redirecting to library");
        return Redirect::to("/library").into_response();
    };

    Html(pages::book_detail(&state.config.server.title, &state.catalog, book).into_string())
        .into_response()
}

/// Reader page.
pub async fn book_reader(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ReaderParams>,
) -> Response {
    let Some(book) = state.catalog.get_book(&id) else {
        return Redirect::to("/library").into_response();
    };

    let reader = ReaderView::from_params(book.pages, &params);
    Html(pages::reader(&state.config.server.title, book, &reader).into_string()).into_response()
}

/// About page.
pub async fn about(State(state): State<AppState>) -> Html<String> {
    Html(pages::about(&state.config.server.title, false).into_string())
}

/// Contact form submission.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    name: String,
    email: String,
    subject: String,
    message: String,
}

impl ContactForm {
    /// Every field is required; the email needs an `@`.
    fn validate(&self) -> Result<()> {
        let fields = [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(AppError::InvalidForm(format!("{} is required", field)));
            }
        }
        if !self.email.contains('@') {
            return Err(AppError::InvalidForm("email is not valid".to_string()));
        }
        Ok(())
    }
}

/// Accept a contact message. Nothing is delivered; the message is logged.
pub async fn contact(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Result<Html<String>> {
    form.validate()?;

    tracing::info!(
        name = %form.name,
        email = %form.email,
        subject = %form.subject,
        length = form.message.len(),
        "Contact message received"
    );

    Ok(Html(pages::about(&state.config.server.title, true).into_string()))
}

/// Generated cover art, served as `/covers/{id}.svg`.
pub async fn cover(State(state): State<AppState>, Path(file): Path<String>) -> Result<Response> {
    let book = file
        .strip_suffix(".svg")
        .and_then(|id| state.catalog.get_book(id))
        .ok_or_else(|| AppError::NotFound(file.clone()))?;

    let svg = cover::render(&book.title, &book.author).into_string();
    Ok(build_response(StatusCode::OK, "image/svg+xml", svg))
}

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ============================================================================
// JSON API
// ============================================================================

/// Normalized query echoed back with results.
#[derive(Debug, Serialize)]
pub struct QueryEcho {
    search: String,
    category: String,
    format: String,
    sort: String,
}

/// Book listing response.
#[derive(Debug, Serialize)]
pub struct BookListResponse<'a> {
    total: usize,
    query: QueryEcho,
    books: Vec<&'a Book>,
}

/// Filtered and sorted books.
pub async fn api_books(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Response {
    let query = CatalogQuery::from_params(&params);
    let books = state.query(&query);

    Json(BookListResponse {
        total: books.len(),
        query: QueryEcho {
            search: query.search.clone(),
            category: query.category.as_param().to_string(),
            format: query.format.as_param().to_string(),
            sort: query.sort.to_string(),
        },
        books,
    })
    .into_response()
}

/// A single book.
pub async fn api_book(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Book>> {
    let book = state
        .catalog
        .get_book(&id)
        .ok_or_else(|| AppError::NotFound(id.clone()))?;

    Ok(Json(book.clone()))
}

/// Category with its real book tally.
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    id: String,
    name: String,
    icon: String,
    count: u32,
    books: usize,
}

/// All categories.
pub async fn api_categories(State(state): State<AppState>) -> Json<Vec<CategorySummary>> {
    let categories = state
        .catalog
        .live_counts()
        .into_iter()
        .map(|(c, books)| CategorySummary {
            id: c.id.clone(),
            name: c.name.clone(),
            icon: c.icon.clone(),
            count: c.count,
            books,
        })
        .collect();

    Json(categories)
}

/// Catalog statistics.
pub async fn api_stats(State(state): State<AppState>) -> Json<serde_json::Value> {
    let formats: serde_json::Map<String, serde_json::Value> = state
        .catalog
        .format_counts()
        .into_iter()
        .map(|(format, n)| (format.to_string(), n.into()))
        .collect();

    Json(serde_json::json!({
        "books": state.catalog.len(),
        "categories": state.catalog.categories().len(),
        "formats": formats,
        "cached_queries": state.cached_queries(),
    }))
}

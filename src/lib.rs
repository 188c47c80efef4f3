//! pdshelf: a lightweight web library for public-domain books.
//!
//! The catalog is an immutable in-memory collection loaded at startup.
//! Every listing is produced by a pure query engine that filters by free
//! text, category and format, then applies a stable sort by title, author
//! or year.
//!
//! # Features
//!
//! - Home page with category overview
//! - Filterable, sortable library listing with shareable search links
//! - Book detail and simulated reader pages
//! - JSON API over the same query engine
//! - Optional TOML catalog fixture

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Configuration and CLI.
pub mod config;
/// Error types.
pub mod error;
/// Catalog, books and the query engine.
pub mod library;
/// HTTP server.
pub mod server;
/// Page interaction state.
pub mod view;

#[cfg(test)]
mod tests;

/// Log directives used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "pdshelf=info,tower_http=info";

pub use config::{Cli, Command, Config};
pub use error::{AppError, Result};
pub use library::Catalog;
pub use server::AppState;

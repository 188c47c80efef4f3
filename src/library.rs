//! The in-memory catalog and its query engine.

pub mod book;
pub mod cache;
pub mod collate;
pub mod fixture;
pub mod query;

use crate::config::BookFormat;
use crate::error::{AppError, Result};
use book::{Book, Category};
use query::Query;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Immutable set of books and categories, created once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: Vec<Book>,
    categories: Vec<Category>,
}

/// On-disk catalog layout.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    books: Vec<Book>,
}

impl Catalog {
    /// Build a catalog, rejecting records that break the data model.
    ///
    /// Books pointing at an unknown category are accepted: they only ever
    /// show up when no category filter is applied.
    pub fn new(books: Vec<Book>, categories: Vec<Category>) -> Result<Self> {
        let mut category_ids = HashSet::new();
        for category in &categories {
            if !category_ids.insert(category.id.as_str()) {
                return Err(AppError::InvalidCatalog(format!(
                    "duplicate category id: {}",
                    category.id
                )));
            }
        }

        let mut book_ids = HashSet::new();
        for book in &books {
            if !book_ids.insert(book.id.as_str()) {
                return Err(AppError::InvalidCatalog(format!(
                    "duplicate book id: {}",
                    book.id
                )));
            }
            if book.title.trim().is_empty() {
                return Err(AppError::InvalidCatalog(format!(
                    "book {} has an empty title",
                    book.id
                )));
            }
            if book.author.trim().is_empty() {
                return Err(AppError::InvalidCatalog(format!(
                    "book {} has an empty author",
                    book.id
                )));
            }
            if book.pages == 0 {
                return Err(AppError::InvalidCatalog(format!(
                    "book {} has no pages",
                    book.id
                )));
            }
            if !category_ids.contains(book.category.as_str()) {
                tracing::warn!(book = %book.id, category = %book.category, "Book references unknown category");
            }
        }

        Ok(Self { books, categories })
    }

    /// The built-in collection.
    pub fn builtin() -> Self {
        Self {
            books: fixture::books(),
            categories: fixture::categories(),
        }
    }

    /// Load a catalog from a TOML file with `[[categories]]` and `[[books]]`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: CatalogFile = toml::from_str(&content).map_err(|e| {
            AppError::InvalidCatalog(format!("{}: {}", path.display(), e))
        })?;

        let catalog = Self::new(file.books, file.categories)?;
        tracing::info!(
            path = %path.display(),
            books = catalog.books.len(),
            categories = catalog.categories.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// All books, in fixture order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// All categories, in fixture order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Get book by ID.
    pub fn get_book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Get category by ID.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Run a query over the whole collection.
    pub fn query(&self, query: &Query) -> Vec<&Book> {
        query::evaluate(&self.books, query)
    }

    /// Number of books actually filed under each category, in category order.
    pub fn live_counts(&self) -> Vec<(&Category, usize)> {
        let mut tally: HashMap<&str, usize> = HashMap::new();
        for book in &self.books {
            *tally.entry(book.category.as_str()).or_default() += 1;
        }

        self.categories
            .iter()
            .map(|c| (c, tally.get(c.id.as_str()).copied().unwrap_or(0)))
            .collect()
    }

    /// Number of books per format.
    pub fn format_counts(&self) -> Vec<(BookFormat, usize)> {
        BookFormat::ALL
            .iter()
            .map(|&f| (f, self.books.iter().filter(|b| b.format == f).count()))
            .collect()
    }

    /// Book count.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog has no books.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

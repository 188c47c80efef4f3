//! Application state shared across handlers.

use crate::config::Config;
use crate::error::Result;
use crate::library::Catalog;
use crate::library::book::Book;
use crate::library::cache::QueryCache;
use crate::library::query::Query;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Immutable catalog.
    pub catalog: Arc<Catalog>,
    /// Memoized query results.
    cache: Arc<QueryCache>,
}

impl AppState {
    /// Create state over an already-built catalog.
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let cache = QueryCache::new(config.cache.query_entries);
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            cache: Arc::new(cache),
        }
    }

    /// Create state, loading the catalog named by the config (or the
    /// built-in one).
    pub fn from_config(config: Config) -> Result<Self> {
        let catalog = match &config.catalog.path {
            Some(path) => Catalog::load(path)?,
            None => {
                tracing::info!("No catalog file configured, using built-in collection");
                Catalog::builtin()
            }
        };
        Ok(Self::new(config, catalog))
    }

    /// Run a query, reusing a memoized result when available.
    pub fn query(&self, query: &Query) -> Vec<&Book> {
        let books = self.catalog.books();
        self.cache
            .get_or_evaluate(books, query)
            .iter()
            .map(|&i| &books[i])
            .collect()
    }

    /// Number of memoized queries.
    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }
}

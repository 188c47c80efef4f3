//! Memoized query results over an immutable catalog.

use crate::library::book::Book;
use crate::library::query::{self, Query};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Bounded map from query to result positions.
///
/// The catalog never changes after startup, so entries never go stale.
/// When the map is full it is cleared before the next insert.
pub struct QueryCache {
    capacity: usize,
    entries: Mutex<HashMap<Query, Arc<[usize]>>>,
}

impl QueryCache {
    /// Create a cache holding at most `capacity` results (0 disables it).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the positions matching `query`, computing them on a miss.
    pub fn get_or_evaluate(&self, books: &[Book], query: &Query) -> Arc<[usize]> {
        if self.capacity == 0 {
            return query::evaluate_indices(books, query).into();
        }

        if let Some(hit) = self.entries.lock().get(query) {
            return Arc::clone(hit);
        }

        let result: Arc<[usize]> = query::evaluate_indices(books, query).into();

        let mut entries = self.entries.lock();
        if entries.len() >= self.capacity {
            tracing::debug!(entries = entries.len(), "Query cache full, clearing");
            entries.clear();
        }
        entries.insert(query.clone(), Arc::clone(&result));

        result
    }

    /// Number of memoized queries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether nothing is memoized.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

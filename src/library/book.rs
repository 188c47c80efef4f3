//! Book and category records.

use crate::config::BookFormat;
use serde::{Deserialize, Serialize};

/// A public-domain work in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier for the book.
    pub id: String,

    /// Book title.
    pub title: String,

    /// Author name.
    pub author: String,

    /// Book description or summary.
    #[serde(default)]
    pub description: String,

    /// Publication year. Negative values are BCE.
    pub year: i32,

    /// Number of pages.
    pub pages: u32,

    /// Category id. Not required to name a known category.
    pub category: String,

    /// File format.
    pub format: BookFormat,

    /// Cover image URL.
    #[serde(default)]
    pub cover_url: String,
}

impl Book {
    /// Publication year as shown to readers: `1851`, or `380 BC`.
    pub fn year_display(&self) -> String {
        format_year(self.year)
    }

    /// Whether the already-lowercased needle occurs in the title, author or
    /// description.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.author.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Format a year, rendering non-positive years with a BC suffix.
pub fn format_year(year: i32) -> String {
    if year > 0 {
        year.to_string()
    } else {
        format!("{} BC", year.unsigned_abs())
    }
}

/// A genre grouping shown on the home page and as library filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Display glyph.
    pub icon: String,

    /// Advertised number of books. Display-only, never checked against the
    /// collection.
    #[serde(default)]
    pub count: u32,
}

//! Catalog query engine: text, category and format filters plus a stable sort.

use crate::config::BookFormat;
use crate::library::book::Book;
use crate::library::collate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Parameter value meaning "no filter".
pub const ALL: &str = "all";

/// Category restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,
    /// Books whose category id equals this string exactly.
    Only(String),
}

impl CategoryFilter {
    /// Normalize a raw parameter. Unknown ids are kept as-is.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some(ALL) => CategoryFilter::All,
            Some(id) => CategoryFilter::Only(id.to_string()),
        }
    }

    /// Whether a book category passes this filter.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => id == category,
        }
    }

    /// Parameter encoding.
    pub fn as_param(&self) -> &str {
        match self {
            CategoryFilter::All => ALL,
            CategoryFilter::Only(id) => id,
        }
    }
}

/// Format restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FormatFilter {
    /// Every format.
    #[default]
    All,
    /// Books of this format.
    Only(BookFormat),
    /// An unrecognized token. No book carries it, so nothing matches.
    Other(String),
}

impl FormatFilter {
    /// Normalize a raw parameter.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some(ALL) => FormatFilter::All,
            Some(token) => match BookFormat::from_token(token) {
                Some(format) => FormatFilter::Only(format),
                None => FormatFilter::Other(token.to_string()),
            },
        }
    }

    /// Whether a book format passes this filter.
    pub fn matches(&self, format: BookFormat) -> bool {
        match self {
            FormatFilter::All => true,
            FormatFilter::Only(wanted) => *wanted == format,
            FormatFilter::Other(_) => false,
        }
    }

    /// Parameter encoding.
    pub fn as_param(&self) -> &str {
        match self {
            FormatFilter::All => ALL,
            FormatFilter::Only(format) => format.as_str(),
            FormatFilter::Other(token) => token,
        }
    }
}

/// Field a listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Collated title.
    #[default]
    Title,
    /// Collated author.
    Author,
    /// Numeric publication year.
    Year,
}

/// Ordering direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending (comparison negated).
    Desc,
}

/// Sort field and direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SortKey {
    /// Field compared.
    pub field: SortField,
    /// Direction applied to the comparison.
    pub direction: SortDirection,
}

impl SortKey {
    /// Every sort option offered by the library page, with its label.
    pub const OPTIONS: [(SortKey, &'static str); 6] = [
        (SortKey::new(SortField::Title, SortDirection::Asc), "Title (A-Z)"),
        (SortKey::new(SortField::Title, SortDirection::Desc), "Title (Z-A)"),
        (SortKey::new(SortField::Author, SortDirection::Asc), "Author (A-Z)"),
        (SortKey::new(SortField::Author, SortDirection::Desc), "Author (Z-A)"),
        (SortKey::new(SortField::Year, SortDirection::Asc), "Year (Oldest)"),
        (SortKey::new(SortField::Year, SortDirection::Desc), "Year (Newest)"),
    ];

    /// Create a sort key.
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parse a `field-direction` encoding such as `year-desc`.
    /// Anything unrecognized becomes the default (title, ascending).
    pub fn parse(raw: Option<&str>) -> Self {
        let Some((field, direction)) = raw.and_then(|r| r.split_once('-')) else {
            return Self::default();
        };

        let field = match field {
            "title" => SortField::Title,
            "author" => SortField::Author,
            "year" => SortField::Year,
            _ => return Self::default(),
        };
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Self::default(),
        };

        Self { field, direction }
    }

    /// Compare two books under this key.
    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        let ordering = match self.field {
            SortField::Title => collate::compare(&a.title, &b.title),
            SortField::Author => collate::compare(&a.author, &b.author),
            SortField::Year => a.year.cmp(&b.year),
        };

        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Display label, e.g. "Year (Newest)".
    pub fn label(&self) -> &'static str {
        Self::OPTIONS
            .iter()
            .find(|(key, _)| key == self)
            .map(|(_, label)| *label)
            .unwrap_or("Title (A-Z)")
    }

    /// Key selected by clicking `field`: flips the direction when `field` is
    /// already the sort field, otherwise starts ascending.
    pub fn toggled(&self, field: SortField) -> Self {
        let direction = match (self.field == field, self.direction) {
            (true, SortDirection::Asc) => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        Self::new(field, direction)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self.field {
            SortField::Title => "title",
            SortField::Author => "author",
            SortField::Year => "year",
        };
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}-{}", field, direction)
    }
}

/// Raw query parameters, as they arrive from a URL or the CLI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryParams {
    /// Free text.
    pub search: Option<String>,
    /// Category id or "all".
    pub category: Option<String>,
    /// "all", "pdf" or "epub".
    pub format: Option<String>,
    /// Sort encoding such as "title-asc".
    pub sort: Option<String>,
}

/// A complete catalog query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Query {
    /// Case-insensitive substring; whitespace is significant.
    pub search: String,
    /// Category restriction.
    pub category: CategoryFilter,
    /// Format restriction.
    pub format: FormatFilter,
    /// Result ordering.
    pub sort: SortKey,
}

impl Query {
    /// Build a query from raw parameters. Never fails.
    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            search: params.search.clone().unwrap_or_default(),
            category: CategoryFilter::parse(params.category.as_deref()),
            format: FormatFilter::parse(params.format.as_deref()),
            sort: SortKey::parse(params.sort.as_deref()),
        }
    }

    /// Whether every filter is at its default. The sort is not considered.
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty()
            && self.category == CategoryFilter::All
            && self.format == FormatFilter::All
    }

    /// Same ordering, all filters reset.
    pub fn cleared(&self) -> Self {
        Self {
            sort: self.sort,
            ..Self::default()
        }
    }

    /// Shareable location parameters. Only `search` and `category` are
    /// persisted; format and sort stay local to the page.
    pub fn location_query(&self) -> String {
        format!(
            "search={}&category={}",
            urlencoding::encode(&self.search),
            urlencoding::encode(self.category.as_param())
        )
    }
}

/// Filter and sort `books` by `query`, returning references into `books`.
pub fn evaluate<'a>(books: &'a [Book], query: &Query) -> Vec<&'a Book> {
    evaluate_indices(books, query)
        .into_iter()
        .map(|i| &books[i])
        .collect()
}

/// Same as [`evaluate`], returning positions into `books`.
pub fn evaluate_indices(books: &[Book], query: &Query) -> Vec<usize> {
    let needle = query.search.to_lowercase();

    let mut matches: Vec<usize> = books
        .iter()
        .enumerate()
        .filter(|(_, b)| needle.is_empty() || b.matches_text(&needle))
        .filter(|(_, b)| query.category.matches(&b.category))
        .filter(|(_, b)| query.format.matches(b.format))
        .map(|(i, _)| i)
        .collect();

    // sort_by is stable: equal keys keep their input order in both directions.
    matches.sort_by(|&a, &b| query.sort.compare(&books[a], &books[b]));
    matches
}

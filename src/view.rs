//! Interaction state for the library and reader pages.
//!
//! Each transition returns a new value; nothing here touches the catalog.

use crate::library::query::{CategoryFilter, FormatFilter, Query, QueryParams, SortKey};
use serde::Deserialize;

/// How the library lays out its cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Cover grid.
    #[default]
    Grid,
    /// One row per book.
    List,
}

impl ViewMode {
    /// Parse a `view` parameter; anything but "list" is a grid.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("list") => ViewMode::List,
            _ => ViewMode::Grid,
        }
    }

    /// Parameter encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

/// Library page parameters, as received on `/library`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibraryParams {
    /// Query parameters.
    #[serde(flatten)]
    pub query: QueryParams,
    /// "grid" or "list".
    pub view: Option<String>,
}

/// Current state of the library page: the query plus layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryView {
    /// Query driving the listing.
    pub query: Query,
    /// Card layout.
    pub mode: ViewMode,
}

impl LibraryView {
    /// Restore state from URL parameters.
    pub fn from_params(params: &LibraryParams) -> Self {
        Self {
            query: Query::from_params(&params.query),
            mode: ViewMode::parse(params.view.as_deref()),
        }
    }

    /// New search text.
    pub fn with_search(&self, search: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.query.search = search.into();
        next
    }

    /// New category filter.
    pub fn with_category(&self, category: CategoryFilter) -> Self {
        let mut next = self.clone();
        next.query.category = category;
        next
    }

    /// New format filter.
    pub fn with_format(&self, format: FormatFilter) -> Self {
        let mut next = self.clone();
        next.query.format = format;
        next
    }

    /// New sort key.
    pub fn with_sort(&self, sort: SortKey) -> Self {
        let mut next = self.clone();
        next.query.sort = sort;
        next
    }

    /// New layout.
    pub fn with_mode(&self, mode: ViewMode) -> Self {
        Self {
            query: self.query.clone(),
            mode,
        }
    }

    /// Reset search, category and format. Sort and layout are kept.
    pub fn cleared(&self) -> Self {
        Self {
            query: self.query.cleared(),
            mode: self.mode,
        }
    }

    /// Full page link encoding every field of this state.
    pub fn href(&self) -> String {
        let mut href = format!("/library?{}", self.query.location_query());
        if self.query.format != FormatFilter::All {
            href.push_str("&format=");
            href.push_str(&urlencoding::encode(self.query.format.as_param()));
        }
        if self.query.sort != SortKey::default() {
            href.push_str("&sort=");
            href.push_str(&self.query.sort.to_string());
        }
        if self.mode != ViewMode::Grid {
            href.push_str("&view=");
            href.push_str(self.mode.as_str());
        }
        href
    }

    /// Shareable link: search and category only.
    pub fn share_href(&self) -> String {
        format!("/library?{}", self.query.location_query())
    }
}

/// Smallest zoom level, in percent.
pub const ZOOM_MIN: u32 = 50;
/// Largest zoom level, in percent.
pub const ZOOM_MAX: u32 = 200;
/// Zoom change per step, in percent.
pub const ZOOM_STEP: u32 = 25;
/// Initial zoom level, in percent.
pub const ZOOM_DEFAULT: u32 = 100;

/// Raw reader page parameters. Malformed values fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReaderParams {
    /// 1-based page number.
    pub page: Option<String>,
    /// Zoom in percent.
    pub zoom: Option<String>,
}

/// Parse an integer parameter and clamp it into `min..=max`.
/// Missing or unparsable values give `default`.
fn clamped_param(raw: Option<&str>, default: u32, min: u32, max: u32) -> u32 {
    let value = raw
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(i64::from(default))
        .clamp(i64::from(min), i64::from(max));
    u32::try_from(value).unwrap_or(default)
}

/// Position and zoom inside the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderView {
    /// Current page, always within `1..=total_pages`.
    pub page: u32,
    /// Zoom in percent, always within `ZOOM_MIN..=ZOOM_MAX`.
    pub zoom: u32,
    /// Number of pages in the book.
    pub total_pages: u32,
}

impl ReaderView {
    /// Open a book at its first page.
    pub fn new(total_pages: u32) -> Self {
        Self {
            page: 1,
            zoom: ZOOM_DEFAULT,
            total_pages: total_pages.max(1),
        }
    }

    /// Restore state from URL parameters, clamping out-of-range values.
    pub fn from_params(total_pages: u32, params: &ReaderParams) -> Self {
        let base = Self::new(total_pages);
        Self {
            page: clamped_param(params.page.as_deref(), 1, 1, base.total_pages),
            zoom: clamped_param(params.zoom.as_deref(), ZOOM_DEFAULT, ZOOM_MIN, ZOOM_MAX),
            ..base
        }
    }

    /// Previous page, stopping at the first.
    pub fn prev_page(&self) -> Self {
        Self {
            page: self.page.saturating_sub(1).max(1),
            ..*self
        }
    }

    /// Next page, stopping at the last.
    pub fn next_page(&self) -> Self {
        Self {
            page: self.page.saturating_add(1).min(self.total_pages),
            ..*self
        }
    }

    /// Zoom in one step.
    pub fn zoom_in(&self) -> Self {
        Self {
            zoom: self.zoom.saturating_add(ZOOM_STEP).min(ZOOM_MAX),
            ..*self
        }
    }

    /// Zoom out one step.
    pub fn zoom_out(&self) -> Self {
        Self {
            zoom: self.zoom.saturating_sub(ZOOM_STEP).max(ZOOM_MIN),
            ..*self
        }
    }

    /// Whether this is the first page.
    pub fn at_first_page(&self) -> bool {
        self.page == 1
    }

    /// Whether this is the last page.
    pub fn at_last_page(&self) -> bool {
        self.page == self.total_pages
    }

    /// Reader link for a book at this state.
    pub fn href(&self, book_id: &str) -> String {
        format!(
            "/book/{}/read?page={}&zoom={}",
            urlencoding::encode(book_id),
            self.page,
            self.zoom
        )
    }
}

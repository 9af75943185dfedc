//! Pagination state and page-count derivation.

use serde::{Deserialize, Serialize};

/// Results per page on TMDB list endpoints.
pub const PAGE_SIZE: u32 = 20;

/// Number of pages needed for `total_results` at `PAGE_SIZE` per page.
///
/// Derived client-side; the server's own `total_pages` is ignored so that
/// every list endpoint paginates the same way.
#[must_use]
pub const fn total_pages_for(total_results: u32) -> u32 {
    total_results.div_ceil(PAGE_SIZE)
}

/// Where the gallery currently is.
///
/// Owned by the caller and passed into each query. Only successful
/// queries write to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredPagination")]
#[allow(clippy::module_name_repetitions)]
pub struct PaginationState {
    /// Current page, starting at 1.
    current_page: u32,
    /// Total pages of the last successful query.
    total_pages: u32,
    /// Search term of the last successful search, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_query: Option<String>,
}

/// Unchecked shape of a saved `PaginationState`.
#[derive(Deserialize)]
struct StoredPagination {
    current_page: u32,
    total_pages: u32,
    #[serde(default)]
    last_query: Option<String>,
}

impl TryFrom<StoredPagination> for PaginationState {
    type Error = String;

    fn try_from(stored: StoredPagination) -> Result<Self, Self::Error> {
        if stored.current_page == 0 {
            return Err(String::from("current_page must be at least 1"));
        }
        if stored.total_pages > 0 && stored.current_page > stored.total_pages {
            return Err(format!(
                "current_page {} exceeds total_pages {}",
                stored.current_page, stored.total_pages
            ));
        }
        Ok(Self {
            current_page: stored.current_page,
            total_pages: stored.total_pages,
            last_query: stored.last_query,
        })
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
            last_query: None,
        }
    }
}

impl PaginationState {
    /// Current page (at least 1).
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Total pages of the last successful query.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Last successful search term.
    #[must_use]
    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    /// Whether `page` is a page the last query can serve.
    #[must_use]
    pub const fn has_page(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }

    /// Records the page and page count of a successful query.
    pub(crate) fn commit_page(&mut self, current_page: u32, total_pages: u32) {
        self.current_page = current_page.max(1);
        self.total_pages = total_pages;
    }

    /// Records the search term of a successful search.
    pub(crate) fn remember_query(&mut self, query: &str) {
        self.last_query = Some(String::from(query));
    }

    /// Drops the remembered search term, e.g. after falling back to trending.
    pub(crate) fn forget_query(&mut self) {
        self.last_query = None;
    }
}

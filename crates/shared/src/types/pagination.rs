//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Page used when the request omits or garbles `page`.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when the request omits or garbles `limit`.
pub const DEFAULT_LIMIT: u64 = 10;

/// Largest page, limit, or offset a query may carry. SQL binds these as `BIGINT`.
pub const MAX_PAGE_VALUE: u64 = i64::MAX.unsigned_abs();

/// Request parameters for paginated queries.
///
/// Both fields are always in `1..=MAX_PAGE_VALUE`; construct through
/// [`PageRequest::new`] or [`PageRequest::from_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Creates a page request, replacing zero values with the defaults and
    /// capping both values at [`MAX_PAGE_VALUE`].
    #[must_use]
    pub const fn new(page: u64, limit: u64) -> Self {
        Self {
            page: clamp(page, DEFAULT_PAGE),
            limit: clamp(limit, DEFAULT_LIMIT),
        }
    }

    /// Builds a page request from raw query-string values.
    ///
    /// Absent, non-numeric, zero, or negative values fall back to the defaults.
    #[must_use]
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(parse_positive(page), parse_positive(limit))
    }

    /// Returns the page number (1-indexed).
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Calculates the offset for database queries, capped at [`MAX_PAGE_VALUE`].
    #[must_use]
    pub const fn offset(&self) -> u64 {
        let offset = self.page.saturating_sub(1).saturating_mul(self.limit);
        if offset > MAX_PAGE_VALUE {
            MAX_PAGE_VALUE
        } else {
            offset
        }
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }
}

const fn clamp(value: u64, default: u64) -> u64 {
    match value {
        0 => default,
        v if v > MAX_PAGE_VALUE => MAX_PAGE_VALUE,
        v => v,
    }
}

fn parse_positive(raw: Option<&str>) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub items: Vec<T>,
    /// Pagination metadata.
    pub pagination: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Total number of items across all pages.
    pub total: u64,
    /// Current page number.
    pub page: u64,
    /// Total number of pages; zero when there are no items.
    pub total_pages: u64,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_prev: bool,
}

impl PageMeta {
    /// Computes metadata for `total` items viewed through `request`.
    #[must_use]
    pub const fn new(request: PageRequest, total: u64) -> Self {
        let total_pages = total.div_ceil(request.limit);
        Self {
            total,
            page: request.page,
            total_pages,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        }
    }
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            pagination: PageMeta::new(request, total),
        }
    }

    /// Maps the items while keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;

//! Minimal pagination primitives for list operations.
//!
//! List operations return one page of rows plus the total row count. Page
//! numbers are 1-based; page size is clamped to keep adapter queries
//! bounded.

use serde::Serialize;

/// Largest accepted page size.
pub const MAX_PER_PAGE: u32 = 100;

/// Default page size when the caller does not supply one.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Caller-requested page, normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Build a page request, clamping out-of-range values instead of
    /// rejecting them (pagination is cosmetic, not policy).
    #[must_use]
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(DEFAULT_PER_PAGE)
                .clamp(1, MAX_PER_PAGE),
        }
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Rows per page.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Row offset for the adapter query.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.per_page as i64
    }

    /// Row limit for the adapter query.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the total matching row count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    /// Rows on this page.
    pub items: Vec<T>,
    /// Total rows matching the filter across all pages.
    pub total: i64,
    /// 1-based page number.
    pub page: u32,
    /// Rows per page.
    pub per_page: u32,
}

impl<T> PageEnvelope<T> {
    /// Assemble an envelope from adapter output and the request that
    /// produced it.
    #[must_use]
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page(),
            per_page: request.per_page(),
        }
    }
}

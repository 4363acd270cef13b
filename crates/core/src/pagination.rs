//! Page-window arithmetic for the admin listing.

use serde::Serialize;

use crate::error::CoreError;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on the page size to keep result sets bounded.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A validated `(page, page_size)` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl PageRequest {
    /// `page` is 1-based and must be at least 1. `page_size` is clamped to
    /// `[1, MAX_PAGE_SIZE]`.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Result<Self, CoreError> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(CoreError::invalid("page", "must be at least 1"));
        }
        Ok(Self {
            page,
            page_size: clamp_page_size(page_size),
        })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Number of rows to skip, saturating for absurdly large pages.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn meta(&self, total: i64) -> PageMeta {
        PageMeta::compute(self.page, self.page_size, total)
    }
}

/// Clamp a user-provided page size into `[1, MAX_PAGE_SIZE]`.
pub fn clamp_page_size(page_size: Option<i64>) -> i64 {
    page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageMeta {
    pub fn compute(page: i64, page_size: i64, total: i64) -> Self {
        let total = total.max(0);
        let total_pages = (total + page_size - 1) / page_size;
        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

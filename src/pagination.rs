//! Page-number pagination shared by every listing endpoint.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// Largest row offset a page may start at; SQL offsets are signed 64-bit.
const MAX_OFFSET: usize = i64::MAX as usize;

/// Page size limits loaded from the server configuration.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct PaginationConfig {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

/// A 1-indexed page number with a page size already clamped to the
/// configured cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    /// Page 0 or a missing page means page 1. A missing or zero page size
    /// uses the default; sizes above the cap are clamped rather than rejected.
    /// Page numbers whose offset would not fit a SQL offset are lowered to the
    /// largest one that does; such a page is still past any real result set.
    pub fn resolve(page: Option<usize>, page_size: Option<usize>, config: &PaginationConfig) -> Self {
        let max_page_size = config.max_page_size.max(1);
        let page_size = match page_size {
            Some(size) if size > 0 => size,
            _ => config.default_page_size,
        }
        .clamp(1, max_page_size);

        let max_page = (MAX_OFFSET / page_size).max(1);

        Self {
            page: page.unwrap_or(1).clamp(1, max_page),
            page_size,
        }
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> usize {
        self.page_size
    }
}

/// One window of an ordered result set.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Page<T> {
    pub results: Vec<T>,
    /// Number of records matching the query across all pages.
    pub count: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    /// Wraps a window that the caller already fetched with
    /// [`PageRequest::offset`] and [`PageRequest::limit`].
    pub fn new(results: Vec<T>, count: usize, request: PageRequest) -> Self {
        Self {
            results,
            count,
            page: request.page,
            page_size: request.page_size,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.count.div_ceil(self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Paginates an in-memory ordered view, keeping its order.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let count = items.len();
    let results = items
        .into_iter()
        .skip(request.offset())
        .take(request.limit())
        .collect();
    Page::new(results, count, request)
}

//! Page normalisation shared by every listing endpoint.

pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// Hard ceiling protecting the backing store from oversized pages.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Normalised page window (1-based page).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u64,
    pub page_size: u64,
}

impl PageInfo {
    /// Clamps raw request values: page < 1 ⇒ 1, size < 1 ⇒ 10, size > 100 ⇒ 100.
    pub fn normalize(page: i64, page_size: i64) -> Self {
        let page = if page < 1 { 1 } else { page as u64 };
        let page_size = if page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            (page_size as u64).min(MAX_PAGE_SIZE)
        };
        Self { page, page_size }
    }

    pub fn offset(&self) -> u64 {
        window_offset(self.page, self.page_size)
    }
}

/// Zero-based row offset of a 1-based page, capped at `i64::MAX` because
/// drivers bind OFFSET as a signed integer.
pub fn window_offset(page: u64, page_size: u64) -> u64 {
    page.saturating_sub(1)
        .saturating_mul(page_size)
        .min(i64::MAX as u64)
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Tuple form used by services: `(page, page_size)`.
pub fn get_page_info(page: i64, page_size: i64) -> (u64, u64) {
    let info = PageInfo::normalize(page, page_size);
    (info.page, info.page_size)
}

/// One page of results together with the unpaginated total.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, info: PageInfo) -> Self {
        Self {
            items,
            total,
            page: info.page,
            page_size: info.page_size,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

//! Pagination utilities for the dashboard table

/// Default rows per table page
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound on rows per table page
pub const MAX_PAGE_SIZE: i64 = 1_000;

/// Pagination metadata calculated from total results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: i64,
    /// Rows per page
    pub page_size: i64,
    /// Total number of pages
    pub total_pages: i64,
    /// Index of the first row on the page
    pub offset: i64,
}

impl Pagination {
    /// Slice of `rows` belonging to this page
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = (self.offset as usize).min(rows.len());
        let end = start.saturating_add(self.page_size as usize).min(rows.len());
        &rows[start..end]
    }
}

/// Calculate pagination metadata from total results and requested page
///
/// Ensures page is within valid bounds [1, total_pages]; a non-positive
/// page size falls back to `DEFAULT_PAGE_SIZE`, a larger one than
/// `MAX_PAGE_SIZE` is capped.
///
/// # Examples
/// ```
/// use movies_dash::pagination::calculate_pagination;
///
/// // 45 total results = 3 pages (20 + 20 + 5)
/// let p = calculate_pagination(45, 2, 20);
/// assert_eq!(p.page, 2);
/// assert_eq!(p.total_pages, 3);
/// assert_eq!(p.offset, 20);
///
/// // Requesting out-of-bounds page gets clamped
/// let p = calculate_pagination(45, 99, 20);
/// assert_eq!(p.page, 3);
/// assert_eq!(p.offset, 40);
/// ```
pub fn calculate_pagination(total_results: i64, requested_page: i64, page_size: i64) -> Pagination {
    let page_size = if page_size > 0 {
        page_size.min(MAX_PAGE_SIZE)
    } else {
        DEFAULT_PAGE_SIZE
    };
    let total_results = total_results.max(0);
    let total_pages = total_results / page_size + i64::from(total_results % page_size != 0);
    let page = requested_page.max(1).min(total_pages.max(1));
    let offset = (page - 1) * page_size;

    Pagination {
        page,
        page_size,
        total_pages,
        offset,
    }
}

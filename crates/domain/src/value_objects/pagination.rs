use serde::Serialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 1000;
/// Keeps `page * page_size` inside `i64` for every allowed page size.
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;
const MAX_PAGE_LINKS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: i64,
    page_size: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Missing or non-positive values fall back to the defaults; page and page size are capped.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page = page
            .filter(|p| *p >= 1)
            .map(|p| p.min(MAX_PAGE))
            .unwrap_or(DEFAULT_PAGE);
        let page_size = page_size
            .filter(|s| *s >= 1)
            .map(|s| s.min(MAX_PAGE_SIZE))
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self { page, page_size }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn with_total(&self, total: i64) -> PageInfo {
        let total = total.max(0);
        let total_pages = if total == 0 {
            0
        } else {
            (total - 1) / self.page_size + 1
        };

        let start = if total == 0 { 0 } else { (self.offset() + 1).min(total) };
        let end = (self.offset() + self.page_size).min(total);

        let has_prev = self.page > 1;
        let has_next = self.page < total_pages;

        PageInfo {
            page: self.page,
            page_size: self.page_size,
            total,
            total_pages,
            start,
            end,
            prev_page: has_prev.then_some(self.page - 1),
            next_page: has_next.then_some(self.page + 1),
            has_prev,
            has_next,
            pages: page_links(self.page, total_pages),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
    pub start: i64,
    pub end: i64,
    pub prev_page: Option<i64>,
    pub next_page: Option<i64>,
    pub has_prev: bool,
    pub has_next: bool,
    /// Page numbers to render; `None` marks a gap.
    pub pages: Vec<Option<i64>>,
}

fn page_links(current: i64, total_pages: i64) -> Vec<Option<i64>> {
    if total_pages <= MAX_PAGE_LINKS {
        return (1..=total_pages).map(Some).collect();
    }

    let current = current.clamp(1, total_pages);
    let window_start = (current - 1).max(2);
    let window_end = (current + 1).min(total_pages - 1);

    let mut pages = vec![Some(1)];
    if window_start > 2 {
        pages.push(None);
    }
    pages.extend((window_start..=window_end).map(Some));
    if window_end < total_pages - 1 {
        pages.push(None);
    }
    pages.push(Some(total_pages));
    pages
}

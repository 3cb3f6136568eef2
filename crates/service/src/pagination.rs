//! Pagination utilities for service layer
//!
//! Page-number pagination with a `{count, next, previous, results}` envelope.

use serde::Serialize;

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub page_size: u32,
}

impl Pagination {
    /// Clamp to sane defaults
    pub fn normalize(self) -> (u32, u32) {
        let page = if self.page == 0 { 1 } else { self.page };
        let page_size = self.page_size.clamp(1, 100);
        (page, page_size)
    }

    /// Slice an already-filtered result set into one page. `count` reports
    /// the full filtered total; next/previous are relative URLs carrying
    /// page and page_size.
    pub fn paginate<T: Serialize>(self, base_path: &str, items: Vec<T>) -> Page<T> {
        let (page, page_size) = self.normalize();
        let count = items.len();
        let start = ((page - 1) as usize).saturating_mul(page_size as usize);
        let results: Vec<T> = items.into_iter().skip(start).take(page_size as usize).collect();

        let has_next = start.saturating_add(page_size as usize) < count;
        let next = has_next.then(|| format!("{base_path}?page={}&page_size={page_size}", page + 1));
        let previous = (page > 1).then(|| format!("{base_path}?page={}&page_size={page_size}", page - 1));

        Page { count, next, previous, results }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, page_size: 6 }
    }
}

/// One page of results
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn normalize_clamps_zero() {
        let (page, size) = Pagination { page: 0, page_size: 0 }.normalize();
        assert_eq!(page, 1);
        assert_eq!(size, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (page, size) = Pagination { page: 5, page_size: 1000 }.normalize();
        assert_eq!(page, 5);
        assert_eq!(size, 100);
    }

    #[test]
    fn default_page_size_is_six() {
        let d = Pagination::default();
        assert_eq!(d.page, 1);
        assert_eq!(d.page_size, 6);
    }

    #[test]
    fn paginate_reports_total_count_and_links() {
        let items: Vec<u32> = (0..10).collect();
        let page = Pagination { page: 1, page_size: 6 }.paginate("/offers", items);
        assert_eq!(page.count, 10);
        assert_eq!(page.results, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(page.next.as_deref(), Some("/offers?page=2&page_size=6"));
        assert!(page.previous.is_none());
    }

    #[test]
    fn paginate_last_page_has_no_next() {
        let items: Vec<u32> = (0..10).collect();
        let page = Pagination { page: 2, page_size: 6 }.paginate("/offers", items);
        assert_eq!(page.results, vec![6, 7, 8, 9]);
        assert!(page.next.is_none());
        assert_eq!(page.previous.as_deref(), Some("/offers?page=1&page_size=6"));
    }

    #[test]
    fn paginate_out_of_range_is_empty() {
        let items: Vec<u32> = (0..3).collect();
        let page = Pagination { page: 9, page_size: 6 }.paginate("/offers", items);
        assert_eq!(page.count, 3);
        assert!(page.results.is_empty());
    }
}

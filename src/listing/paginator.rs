//! Pagination arithmetic and page-link metadata.

use serde::Serialize;

use super::ListQueryError;

/// Requested page. The page number is clamped to at least 1; there is no
/// upper clamp, a page past the end simply yields no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    page_number: i64,
    page_size: i64,
}

impl PageRequest {
    pub fn new(page_number: i64, page_size: i64) -> Result<Self, ListQueryError> {
        if page_size <= 0 {
            return Err(ListQueryError::Configuration(format!(
                "page size must be positive, got {page_size}"
            )));
        }
        Ok(Self {
            page_number: page_number.max(1),
            page_size,
        })
    }

    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page_number - 1).saturating_mul(self.page_size)
    }
}

/// Pagination metadata for one page, without the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub page_size: i64,
    pub offset: i64,
}

impl PageMeta {
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn visible_window(&self, radius: i64) -> Vec<i64> {
        Paginator::visible_page_window(self.current_page, self.total_pages, radius)
    }
}

pub struct Paginator;

impl Paginator {
    /// Number of page links shown on each side of the current page.
    pub const DEFAULT_WINDOW_RADIUS: i64 = 2;

    /// `total_items` comes from a COUNT query; a negative value is a caller bug.
    pub fn paginate(total_items: i64, request: &PageRequest) -> Result<PageMeta, ListQueryError> {
        if total_items < 0 {
            return Err(ListQueryError::Configuration(format!(
                "total item count must not be negative, got {total_items}"
            )));
        }
        let page_size = request.page_size();
        // page_size > 0 is guaranteed by PageRequest::new
        let total_pages = total_items / page_size + i64::from(total_items % page_size != 0);

        Ok(PageMeta {
            total_items,
            total_pages,
            current_page: request.page_number(),
            page_size,
            offset: request.offset(),
        })
    }

    /// Page numbers to link around `current_page`, clamped to `1..=total_pages`.
    pub fn visible_page_window(current_page: i64, total_pages: i64, radius: i64) -> Vec<i64> {
        let radius = radius.max(0);
        let first = current_page.saturating_sub(radius).max(1);
        let last = current_page.saturating_add(radius).min(total_pages);
        (first..=last).collect()
    }
}

/// One page of rows plus the numbers needed to render its links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub page_size: i64,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, meta: &PageMeta) -> Self {
        Self {
            items,
            total_items: meta.total_items,
            total_pages: meta.total_pages,
            current_page: meta.current_page,
            page_size: meta.page_size,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn visible_window(&self) -> Vec<i64> {
        Paginator::visible_page_window(
            self.current_page,
            self.total_pages,
            Paginator::DEFAULT_WINDOW_RADIUS,
        )
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total_items: self.total_items,
            total_pages: self.total_pages,
            current_page: self.current_page,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(total: i64, page: i64, size: i64) -> PageMeta {
        Paginator::paginate(total, &PageRequest::new(page, size).unwrap()).unwrap()
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(meta(25, 1, 10).total_pages, 3);
        assert_eq!(meta(20, 1, 10).total_pages, 2);
        assert_eq!(meta(1, 1, 10).total_pages, 1);
        assert_eq!(meta(0, 1, 10).total_pages, 0);
        assert_eq!(meta(7, 1, 1).total_pages, 7);
    }

    #[test]
    fn offset_calculation() {
        assert_eq!(meta(100, 1, 10).offset, 0);
        assert_eq!(meta(100, 3, 10).offset, 20);
        assert_eq!(PageRequest::new(3, 10).unwrap().offset(), 20);
    }

    #[test]
    fn page_number_clamps_to_one() {
        let req = PageRequest::new(0, 10).unwrap();
        assert_eq!(req.page_number(), 1);
        assert_eq!(req.offset(), 0);
        assert_eq!(PageRequest::new(-4, 10).unwrap().page_number(), 1);
    }

    #[test]
    fn page_past_the_end_is_kept() {
        let m = meta(5, 9, 10);
        assert_eq!(m.current_page, 9);
        assert_eq!(m.offset, 80);
        assert!(!m.has_next());
        assert!(m.has_previous());
    }

    #[test]
    fn non_positive_page_size_rejected() {
        assert!(PageRequest::new(1, 0).unwrap_err().is_configuration());
        assert!(PageRequest::new(1, -10).unwrap_err().is_configuration());
    }

    #[test]
    fn negative_total_rejected() {
        let req = PageRequest::new(1, 10).unwrap();
        assert!(Paginator::paginate(-1, &req).unwrap_err().is_configuration());
    }

    #[test]
    fn window_clamps_at_both_ends() {
        assert_eq!(Paginator::visible_page_window(1, 5, 2), vec![1, 2, 3]);
        assert_eq!(Paginator::visible_page_window(5, 5, 2), vec![3, 4, 5]);
        assert_eq!(Paginator::visible_page_window(3, 10, 2), vec![1, 2, 3, 4, 5]);
        assert_eq!(Paginator::visible_page_window(2, 2, 2), vec![1, 2]);
    }

    #[test]
    fn window_empty_without_pages() {
        assert!(Paginator::visible_page_window(1, 0, 2).is_empty());
        assert!(meta(0, 1, 10).visible_window(2).is_empty());
    }

    #[test]
    fn prev_next_flags() {
        let m = meta(23, 3, 10);
        assert_eq!(m.total_pages, 3);
        assert_eq!(m.offset, 20);
        assert!(!m.has_next());
        assert!(m.has_previous());

        let first = meta(23, 1, 10);
        assert!(first.has_next());
        assert!(!first.has_previous());
    }

    #[test]
    fn page_result_from_meta() {
        let m = meta(25, 2, 10);
        let result = PageResult::new(vec!["a", "b"], &m);
        assert_eq!(result.total_items, 25);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.current_page, 2);
        assert_eq!(result.visible_window(), vec![1, 2, 3]);
        assert!(result.has_next() && result.has_previous());

        let lengths = result.map(str::len);
        assert_eq!(lengths.items, vec![1, 1]);
    }
}

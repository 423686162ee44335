//! Pagination query parameters and the paged response envelope shared by all
//! list endpoints.

use serde::{Deserialize, Serialize};

use crate::listing::{ListQueryError, PageRequest, PageResult};

/// Pagination query parameters.
///
/// `page` is parsed leniently: missing or non-numeric values mean page 1.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<String>,
}

impl Pagination {
    pub fn current_page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1)
            .max(1)
    }

    pub fn request(&self, per_page: i64) -> Result<PageRequest, ListQueryError> {
        PageRequest::new(self.current_page(), per_page)
    }
}

/// Page links for the "Previous / 1 2 3 / Next" control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    pub window: Vec<i64>,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page: Option<i64>,
    pub next_page: Option<i64>,
}

/// Paged result envelope returned by list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PagedResult<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub links: PageLinks,
}

impl<T: Serialize> From<PageResult<T>> for PagedResult<T> {
    fn from(result: PageResult<T>) -> Self {
        let has_previous = result.has_previous();
        let has_next = result.has_next();
        let links = PageLinks {
            window: result.visible_window(),
            has_previous,
            has_next,
            previous_page: has_previous.then(|| result.current_page - 1),
            next_page: has_next.then(|| result.current_page + 1),
        };
        Self {
            items: result.items,
            total: result.total_items,
            page: result.current_page,
            per_page: result.page_size,
            total_pages: result.total_pages,
            links,
        }
    }
}

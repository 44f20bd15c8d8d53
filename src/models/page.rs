use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

/// Pagination query parameters (`?page=0&size=10`).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    /// Effective page size, clamped to 1..=100.
    pub fn limit(&self) -> i64 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        self.page.max(0) * self.limit()
    }

    pub fn page(&self) -> i64 {
        self.page.max(0)
    }
}

/// Pagination envelope returned by every listing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, params: &PageParams, total: i64) -> Self {
        Self {
            items,
            page: params.page(),
            size: params.limit(),
            total,
        }
    }

    /// An empty page for the given parameters.
    pub fn empty(params: &PageParams) -> Self {
        Self::new(Vec::new(), params, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_size_clamped() {
        let params = PageParams { page: 0, size: 5000 };
        assert_eq!(params.limit(), 100);

        let params = PageParams { page: 0, size: 0 };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_negative_page_treated_as_first() {
        let params = PageParams { page: -3, size: 10 };
        assert_eq!(params.page(), 0);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_offset_math() {
        let params = PageParams { page: 3, size: 25 };
        assert_eq!(params.offset(), 75);
    }

    #[test]
    fn test_empty_page() {
        let params = PageParams { page: 2, size: 10 };
        let page: Page<u32> = Page::empty(&params);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 2);
        assert_eq!(page.total, 0);
    }
}

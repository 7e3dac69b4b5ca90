//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct and helpers to normalize inputs.

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Catalog pages hold nine cars.
    pub const CATALOG_PAGE_SIZE: u32 = 9;

    pub fn catalog(page: Option<u32>) -> Self {
        Self { page: page.unwrap_or(1), per_page: Self::CATALOG_PAGE_SIZE }
    }

    /// Clamp to sane defaults and convert to `u64` (0-based page index, page size)
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as u64, per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

/// `ceil(total / per_page)`; an empty table has zero pages.
pub fn total_pages(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

#[cfg(test)]
mod tests {
    use super::{total_pages, Pagination};

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (idx, per) = Pagination { page: 5, per_page: 1000 }.normalize();
        assert_eq!(idx, 4);
        assert_eq!(per, 100);
    }

    #[test]
    fn catalog_defaults_to_first_page_of_nine() {
        let (idx, per) = Pagination::catalog(None).normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, 9);
        let (idx, _) = Pagination::catalog(Some(3)).normalize();
        assert_eq!(idx, 2);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 9), 0);
        assert_eq!(total_pages(9, 9), 1);
        assert_eq!(total_pages(10, 9), 2);
        assert_eq!(total_pages(5, 0), 0);
    }
}

//! Shared query parameter types for API handlers.

use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Page-based pagination parameters (`?page=&per_page=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PaginationParams {
    /// 1-based page number, never below 1.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn per_page(&self) -> i64 {
        self.per_page
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }
}

/// `?limit=` for "most recent" style endpoints.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

/// Month/year selector shared by holidays, payroll and attendance summaries.
#[derive(Debug, Deserialize)]
pub struct PeriodParams {
    pub month: Option<i32>,
    pub year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamps() {
        let params = PaginationParams::default();
        assert_eq!((params.page(), params.per_page(), params.offset()), (1, 20, 0));

        let params = PaginationParams {
            page: Some(3),
            per_page: Some(500),
        };
        assert_eq!(params.per_page(), 100);
        assert_eq!(params.offset(), 200);

        let params = PaginationParams {
            page: Some(0),
            per_page: Some(0),
        };
        assert_eq!((params.page(), params.per_page()), (1, 1));
    }
}

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::repository::products::{PageRequest, SortKey};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    /// Returns `(page, per_page, offset)` with page >= 1 and per_page in 1..=100.
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1).saturating_mul(per_page);
        (page, per_page, offset)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductSortBy {
    CreatedAt,
    Price,
    Name,
}

impl From<ProductSortBy> for SortKey {
    fn from(value: ProductSortBy) -> Self {
        match value {
            ProductSortBy::CreatedAt => SortKey::CreatedAt,
            ProductSortBy::Price => SortKey::Price,
            ProductSortBy::Name => SortKey::Name,
        }
    }
}

// Not flattened: serde_urlencoded cannot parse numbers through `#[serde(flatten)]`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Page number, default 1.
    pub page: Option<i64>,
    /// Items per page, default 20, at most 100.
    pub per_page: Option<i64>,
    pub sort_by: Option<ProductSortBy>,
    pub sort_order: Option<SortOrder>,
}

impl ProductQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }

    /// Oldest first unless asked otherwise.
    pub fn page_request(&self) -> PageRequest {
        let (_, limit, offset) = self.pagination().normalize();
        PageRequest {
            limit: limit as u64,
            offset: offset as u64,
            sort: self.sort_by.unwrap_or(ProductSortBy::CreatedAt).into(),
            ascending: matches!(self.sort_order.unwrap_or(SortOrder::Asc), SortOrder::Asc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clamps_page_and_size() {
        let p = Pagination {
            page: Some(0),
            per_page: Some(1000),
        };
        assert_eq!(p.normalize(), (1, 100, 0));

        let p = Pagination {
            page: Some(3),
            per_page: Some(10),
        };
        assert_eq!(p.normalize(), (3, 10, 20));
    }

    #[test]
    fn normalize_saturates_offset_for_huge_page() {
        let p = Pagination {
            page: Some(i64::MAX),
            per_page: Some(100),
        };
        assert_eq!(p.normalize(), (i64::MAX, 100, i64::MAX));

        let query = ProductQuery {
            page: Some(i64::MAX),
            ..ProductQuery::default()
        };
        assert_eq!(query.page_request().offset, i64::MAX as u64);
    }

    #[test]
    fn page_request_defaults_to_oldest_first() {
        let request = ProductQuery::default().page_request();
        assert_eq!(request.limit, 20);
        assert_eq!(request.offset, 0);
        assert_eq!(request.sort, SortKey::CreatedAt);
        assert!(request.ascending);
    }

    #[test]
    fn page_request_honours_sort_options() {
        let query = ProductQuery {
            page: Some(2),
            per_page: Some(5),
            sort_by: Some(ProductSortBy::Price),
            sort_order: Some(SortOrder::Desc),
        };
        let request = query.page_request();
        assert_eq!(request.offset, 5);
        assert_eq!(request.sort, SortKey::Price);
        assert!(!request.ascending);
    }
}

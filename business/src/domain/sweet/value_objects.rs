use rust_decimal::Decimal;

use super::errors::SweetError;
use super::model::Sweet;

pub const MAX_PAGE_SIZE: i64 = 100;

/// 1-based page window over the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Result<Self, SweetError> {
        if page < 1 || !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(SweetError::InvalidPagination);
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Number of pages needed to show `total` items.
    pub fn page_count(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        (total + self.limit - 1) / self.limit
    }
}

#[derive(Debug, Clone)]
pub struct SweetPage {
    pub sweets: Vec<Sweet>,
    pub total: i64,
    pub pages: i64,
}

/// Catalog search: free text ANDed with an inclusive price range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweetSearch {
    pub query: Option<String>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
}

impl SweetSearch {
    pub fn new(
        query: Option<String>,
        price_min: Option<Decimal>,
        price_max: Option<Decimal>,
    ) -> Result<Self, SweetError> {
        if price_min.is_some_and(|p| p < Decimal::ZERO)
            || price_max.is_some_and(|p| p < Decimal::ZERO)
        {
            return Err(SweetError::InvalidPriceRange);
        }
        if let (Some(min), Some(max)) = (price_min, price_max)
            && min > max
        {
            return Err(SweetError::InvalidPriceRange);
        }

        let query = query
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        Ok(Self {
            query,
            price_min,
            price_max,
        })
    }

    pub fn matches_price(&self, price: Decimal) -> bool {
        self.price_min.is_none_or(|min| price >= min) && self.price_max.is_none_or(|max| price <= max)
    }
}

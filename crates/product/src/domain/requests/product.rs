use crate::domain::requests::sort::{SortField, SortSpec};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_PAGE_SIZE: i32 = 10;
pub const MAX_PAGE_SIZE: i32 = 25;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Display name is required"))]
    pub display_name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price: i64,

    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: i32,

    pub category_id: i32,

    pub user_id: i32,
}

/// Partial update payload.
///
/// Text fields that are absent or blank after trimming, and numeric fields
/// equal to zero, leave the stored value untouched. `user_id` and
/// `category_id` are always checked for existence, even when zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price: i64,

    #[serde(default)]
    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: i32,

    #[serde(default)]
    pub category_id: i32,

    #[serde(default)]
    pub user_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindAllProducts {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    DEFAULT_PAGE_SIZE
}

impl Default for FindAllProducts {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl FindAllProducts {
    pub fn new(page: i32, page_size: i32) -> Self {
        Self { page, page_size }
    }

    /// Page numbers are 1-based. Out-of-range input is clamped: a page below 1
    /// reads the first page, a non-positive size falls back to the default and
    /// sizes above the maximum are capped.
    pub fn window(&self) -> PageWindow {
        let page = if self.page > 0 { self.page } else { 1 };
        let page_size = if self.page_size > 0 {
            self.page_size.min(MAX_PAGE_SIZE)
        } else {
            DEFAULT_PAGE_SIZE
        };

        PageWindow {
            offset: (i64::from(page) - 1) * i64::from(page_size),
            limit: i64::from(page_size),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: i64,
    pub limit: i64,
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min_price: i64,
    pub max_price: i64,
}

impl PriceRange {
    pub fn new(min_price: i64, max_price: i64) -> Self {
        Self {
            min_price,
            max_price,
        }
    }

    pub fn contains(&self, price: i64) -> bool {
        self.min_price <= price && price <= self.max_price
    }
}

/// Filter, ordering and window applied to the visible product set.
///
/// Without an explicit sort, rows come back by id, or by price when a price
/// range is set. Ties are always broken by ascending id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListQuery {
    pub sort: Option<SortSpec>,
    pub window: Option<PageWindow>,
    pub price_range: Option<PriceRange>,
}

impl ProductListQuery {
    pub fn ordering(&self) -> SortSpec {
        match (self.sort, self.price_range) {
            (Some(sort), _) => sort,
            (None, Some(_)) => SortSpec::ascending(SortField::Price),
            (None, None) => SortSpec::ascending(SortField::Id),
        }
    }
}

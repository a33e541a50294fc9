use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub product_id: i32,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub price: i64,
    pub stock: i32,
    pub category_id: i32,
    pub user_id: i32,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub is_active: bool,
    pub is_deleted: bool,
}

impl Product {
    /// Listing and lookup operations only ever see active, non-deleted rows.
    pub fn is_visible(&self) -> bool {
        self.is_active && !self.is_deleted
    }
}

/// Row shape for an insert; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub price: i64,
    pub stock: i32,
    pub category_id: i32,
    pub user_id: i32,
    pub created_at: Option<NaiveDateTime>,
    pub is_active: bool,
    pub is_deleted: bool,
}

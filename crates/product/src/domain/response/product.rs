use crate::domain::requests::product::UpdateProductRequest;
use crate::model::Product as ProductModel;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i32,
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

// model to response
impl From<ProductModel> for ProductResponse {
    fn from(value: ProductModel) -> Self {
        ProductResponse {
            id: value.product_id,
            name: value.name,
            display_name: value.display_name,
            description: value.description,
            price: value.price,
            stock: value.stock,
            category_id: value.category_id,
            user_id: value.user_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
            is_active: value.is_active,
            is_deleted: value.is_deleted,
        }
    }
}

/// Echo of an accepted update payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdateResponse {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub price: i64,
    pub stock: i32,
    pub category_id: i32,
    pub user_id: i32,
}

// request to echoed response
impl From<UpdateProductRequest> for ProductUpdateResponse {
    fn from(value: UpdateProductRequest) -> Self {
        ProductUpdateResponse {
            name: value.name,
            display_name: value.display_name,
            description: value.description,
            price: value.price,
            stock: value.stock,
            category_id: value.category_id,
            user_id: value.user_id,
        }
    }
}

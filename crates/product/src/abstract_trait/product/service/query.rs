use crate::domain::{
    requests::{
        product::{FindAllProducts, PriceRange},
        sort::SortSpec,
    },
    response::{api::ApiResponse, product::ProductResponse},
};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn get(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn get_sorted(
        &self,
        sort: &SortSpec,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn get_pages_sorted(
        &self,
        req: &FindAllProducts,
        sort: &SortSpec,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn get_filtered(
        &self,
        range: &PriceRange,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn get_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError>;
}

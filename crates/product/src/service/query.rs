use crate::{
    abstract_trait::product::service::ProductQueryServiceTrait,
    domain::{
        requests::{
            product::{FindAllProducts, PriceRange, ProductListQuery},
            sort::SortSpec,
        },
        response::{api::ApiResponse, product::ProductResponse},
    },
    service::product::{ProductService, product_not_found},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use shared::{errors::ServiceError, utils::Method};
use tracing::info;

impl ProductService {
    // Reads never commit; the unit of work is dropped and rolled back.
    async fn run_list(
        &self,
        query: &ProductListQuery,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let mut uow = self.store.begin().await?;

        let products = uow.find_visible(query).await?;
        let total = uow.count_visible().await?;

        info!("✅ Retrieved {} of {} visible products", products.len(), total);

        let list = products
            .iter()
            .map(|product| self.mapper.to_response(product))
            .collect();

        Ok(ApiResponse::list(list, total))
    }

    async fn run_get_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let mut uow = self.store.begin().await?;

        match uow.find_visible_by_id(id).await? {
            Some(product) => Ok(ApiResponse::entity(self.mapper.to_response(&product))),
            None => Ok(ApiResponse::not_found(product_not_found(id))),
        }
    }

    async fn traced_list(
        &self,
        operation: &str,
        mut attributes: Vec<KeyValue>,
        query: ProductListQuery,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        attributes.push(KeyValue::new("component", "product"));
        attributes.push(KeyValue::new("operation", operation.to_string()));

        let tracing_ctx = self.start_tracing(&format!("product_{operation}"), attributes);

        let result = self.run_list(&query).await;
        self.complete_tracing(&tracing_ctx, Method::Get, &result, "Products retrieved")
            .await;

        result
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductService {
    async fn get(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!(
            "🔍 Finding products | Page: {}, Size: {}",
            req.page, req.page_size
        );

        let query = ProductListQuery {
            window: Some(req.window()),
            ..Default::default()
        };

        self.traced_list(
            "get",
            vec![
                KeyValue::new("page", i64::from(req.page)),
                KeyValue::new("page_size", i64::from(req.page_size)),
            ],
            query,
        )
        .await
    }

    async fn get_sorted(
        &self,
        sort: &SortSpec,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🔍 Finding products sorted by '{}'", sort);

        let query = ProductListQuery {
            sort: Some(*sort),
            ..Default::default()
        };

        self.traced_list(
            "get_sorted",
            vec![KeyValue::new("sort", sort.to_string())],
            query,
        )
        .await
    }

    async fn get_pages_sorted(
        &self,
        req: &FindAllProducts,
        sort: &SortSpec,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!(
            "🔍 Finding products sorted by '{}' | Page: {}, Size: {}",
            sort, req.page, req.page_size
        );

        let query = ProductListQuery {
            sort: Some(*sort),
            window: Some(req.window()),
            ..Default::default()
        };

        self.traced_list(
            "get_pages_sorted",
            vec![
                KeyValue::new("sort", sort.to_string()),
                KeyValue::new("page", i64::from(req.page)),
                KeyValue::new("page_size", i64::from(req.page_size)),
            ],
            query,
        )
        .await
    }

    async fn get_filtered(
        &self,
        range: &PriceRange,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!(
            "🔍 Finding products priced {}..={}",
            range.min_price, range.max_price
        );

        let query = ProductListQuery {
            price_range: Some(*range),
            ..Default::default()
        };

        self.traced_list(
            "get_filtered",
            vec![
                KeyValue::new("min_price", range.min_price),
                KeyValue::new("max_price", range.max_price),
            ],
            query,
        )
        .await
    }

    async fn get_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🆔 Finding product by ID: {}", id);

        let tracing_ctx = self.start_tracing(
            "product_get_by_id",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "get_by_id"),
                KeyValue::new("product.id", i64::from(id)),
            ],
        );

        let result = self.run_get_by_id(id).await;
        self.complete_tracing(&tracing_ctx, Method::Get, &result, "Product retrieved")
            .await;

        result
    }
}

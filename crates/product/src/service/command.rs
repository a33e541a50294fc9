use crate::{
    abstract_trait::product::service::ProductCommandServiceTrait,
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::{
            api::ApiResponse,
            product::{ProductResponse, ProductUpdateResponse},
        },
    },
    model::Product as ProductModel,
    service::product::{
        ProductService, category_not_found, now, product_not_found, user_not_found,
    },
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use opentelemetry::KeyValue;
use shared::{errors::ServiceError, utils::Method};
use tracing::info;
use validator::Validate;

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Applies the non-default fields of `req` to `product` and stamps
/// `updated_at`. Blank text and zero numbers keep the stored value. The
/// owning user is only checked for existence, never reassigned.
fn merge_update(
    mut product: ProductModel,
    req: &UpdateProductRequest,
    updated_at: NaiveDateTime,
) -> ProductModel {
    if let Some(name) = non_blank(&req.name) {
        product.name = name.to_string();
    }
    if let Some(display_name) = non_blank(&req.display_name) {
        product.display_name = display_name.to_string();
    }
    if let Some(description) = non_blank(&req.description) {
        product.description = Some(description.to_string());
    }
    if req.price != 0 {
        product.price = req.price;
    }
    if req.stock != 0 {
        product.stock = req.stock;
    }
    if req.category_id != 0 {
        product.category_id = req.category_id;
    }

    product.updated_at = Some(updated_at);
    product
}

impl ProductService {
    async fn run_insert(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        req.validate()?;

        let mut uow = self.store.begin().await?;

        if !uow.user_exists(req.user_id).await? {
            return Ok(ApiResponse::not_found(user_not_found(req.user_id)));
        }
        if !uow.category_exists(req.category_id).await? {
            return Ok(ApiResponse::not_found(category_not_found(req.category_id)));
        }

        let mut new_product = self.mapper.to_new_product(req);
        new_product.created_at = Some(now());
        new_product.is_active = true;
        new_product.is_deleted = false;

        let created = uow.insert(&new_product).await?;
        uow.commit().await?;

        info!("✅ Product created with ID: {}", created.product_id);

        Ok(ApiResponse::entity(self.mapper.to_response(&created)))
    }

    async fn run_update(
        &self,
        req: &UpdateProductRequest,
        id: i32,
    ) -> Result<ApiResponse<ProductUpdateResponse>, ServiceError> {
        req.validate()?;

        let mut uow = self.store.begin().await?;

        let Some(product) = uow.find_by_id(id).await? else {
            return Ok(ApiResponse::not_found(product_not_found(id)));
        };
        if !uow.user_exists(req.user_id).await? {
            return Ok(ApiResponse::not_found(user_not_found(req.user_id)));
        }
        if !uow.category_exists(req.category_id).await? {
            return Ok(ApiResponse::not_found(category_not_found(req.category_id)));
        }

        let merged = merge_update(product, req, now());
        uow.save(&merged).await?;
        uow.commit().await?;

        info!("✅ Product updated: {}", id);

        Ok(ApiResponse::entity(self.mapper.to_update_response(req)))
    }

    async fn run_delete(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let mut uow = self.store.begin().await?;

        let mut product = match uow.find_by_id(id).await? {
            Some(product) if !product.is_deleted => product,
            _ => return Ok(ApiResponse::not_found(product_not_found(id))),
        };

        product.is_deleted = true;
        product.is_active = false;

        uow.save(&product).await?;
        uow.commit().await?;

        info!("🗑️ Product soft-deleted: {}", id);

        Ok(ApiResponse::entity(self.mapper.to_response(&product)))
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductService {
    async fn insert(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🏗️ Creating new product: {}", req.name);

        let tracing_ctx = self.start_tracing(
            "product_insert",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "insert"),
                KeyValue::new("product.name", req.name.clone()),
                KeyValue::new("product.category_id", i64::from(req.category_id)),
                KeyValue::new("product.user_id", i64::from(req.user_id)),
            ],
        );

        let result = self.run_insert(req).await;
        self.complete_tracing(&tracing_ctx, Method::Post, &result, "Product created")
            .await;

        result
    }

    async fn update(
        &self,
        req: &UpdateProductRequest,
        id: i32,
    ) -> Result<ApiResponse<ProductUpdateResponse>, ServiceError> {
        info!("🔄 Updating product: {}", id);

        let tracing_ctx = self.start_tracing(
            "product_update",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "update"),
                KeyValue::new("product.id", i64::from(id)),
            ],
        );

        let result = self.run_update(req, id).await;
        self.complete_tracing(&tracing_ctx, Method::Put, &result, "Product updated")
            .await;

        result
    }

    async fn delete(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🗑️ Deleting product: {}", id);

        let tracing_ctx = self.start_tracing(
            "product_delete",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("product.id", i64::from(id)),
            ],
        );

        let result = self.run_delete(id).await;
        self.complete_tracing(&tracing_ctx, Method::Delete, &result, "Product deleted")
            .await;

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::product::repository::MockProductStoreTrait, mapper::ProductMapper,
    };
    use chrono::NaiveDate;
    use prometheus_client::registry::Registry;
    use shared::errors::RepositoryError;
    use std::sync::Arc;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    fn stored() -> ProductModel {
        ProductModel {
            product_id: 1,
            name: "mug".into(),
            display_name: "Coffee Mug".into(),
            description: Some("ceramic".into()),
            price: 900,
            stock: 12,
            category_id: 2,
            user_id: 3,
            created_at: Some(at(8)),
            updated_at: None,
            is_active: true,
            is_deleted: false,
        }
    }

    fn service_with(store: MockProductStoreTrait) -> ProductService {
        let mut registry = Registry::default();
        ProductService::new(Arc::new(store), Arc::new(ProductMapper), &mut registry)
    }

    #[test]
    fn merge_keeps_stored_values_for_blank_and_zero_fields() {
        let req = UpdateProductRequest {
            name: Some("   ".into()),
            display_name: None,
            description: Some(String::new()),
            price: 0,
            stock: 0,
            category_id: 0,
            user_id: 0,
        };

        let merged = merge_update(stored(), &req, at(10));

        assert_eq!(merged.name, "mug");
        assert_eq!(merged.display_name, "Coffee Mug");
        assert_eq!(merged.description.as_deref(), Some("ceramic"));
        assert_eq!(merged.price, 900);
        assert_eq!(merged.stock, 12);
        assert_eq!(merged.category_id, 2);
        assert_eq!(merged.user_id, 3);
        assert_eq!(merged.updated_at, Some(at(10)));
        assert_eq!(merged.created_at, Some(at(8)));
    }

    #[test]
    fn merge_overwrites_non_default_fields_but_keeps_owner() {
        let req = UpdateProductRequest {
            name: Some("big mug".into()),
            display_name: Some("Big Mug".into()),
            description: Some("stoneware".into()),
            price: 1_200,
            stock: 4,
            category_id: 5,
            user_id: 6,
        };

        let merged = merge_update(stored(), &req, at(11));

        assert_eq!(merged.name, "big mug");
        assert_eq!(merged.display_name, "Big Mug");
        assert_eq!(merged.description.as_deref(), Some("stoneware"));
        assert_eq!(merged.price, 1_200);
        assert_eq!(merged.stock, 4);
        assert_eq!(merged.category_id, 5);
        assert_eq!(merged.user_id, 3);
        assert!(merged.is_active);
    }

    #[tokio::test]
    async fn invalid_create_never_opens_a_unit_of_work() {
        let mut store = MockProductStoreTrait::new();
        store.expect_begin().times(0);

        let service = service_with(store);
        let req = CreateProductRequest {
            name: String::new(),
            display_name: "Nameless".into(),
            description: None,
            price: 10,
            stock: 1,
            category_id: 1,
            user_id: 1,
        };

        let err = service.insert(&req).await.unwrap_err();
        match err {
            ServiceError::Validation(messages) => {
                assert!(messages.iter().any(|m| m.starts_with("name:")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn store_failures_surface_as_repository_errors() {
        let mut store = MockProductStoreTrait::new();
        store
            .expect_begin()
            .times(2)
            .returning(|| Err(RepositoryError::Custom("connection refused".into())));

        let service = service_with(store);

        assert!(matches!(
            service.delete(1).await,
            Err(ServiceError::Repo(RepositoryError::Custom(_)))
        ));
        assert!(matches!(
            service.update(&UpdateProductRequest::default(), 1).await,
            Err(ServiceError::Repo(_))
        ));
    }
}

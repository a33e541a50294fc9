use crate::{
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::product::{ProductResponse, ProductUpdateResponse},
    },
    model::{NewProduct, Product as ProductModel},
};
use std::sync::Arc;

pub type DynProductMapper = Arc<dyn ProductMapperTrait + Send + Sync>;

/// Pure conversions between request/response shapes and stored rows.
pub trait ProductMapperTrait {
    fn to_new_product(&self, req: &CreateProductRequest) -> NewProduct;
    fn to_response(&self, product: &ProductModel) -> ProductResponse;
    fn to_update_response(&self, req: &UpdateProductRequest) -> ProductUpdateResponse;
}

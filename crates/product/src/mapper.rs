use crate::{
    abstract_trait::product::mapper::ProductMapperTrait,
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::product::{ProductResponse, ProductUpdateResponse},
    },
    model::{NewProduct, Product as ProductModel},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ProductMapper;

impl ProductMapper {
    pub fn new() -> Self {
        Self
    }
}

impl ProductMapperTrait for ProductMapper {
    fn to_new_product(&self, req: &CreateProductRequest) -> NewProduct {
        NewProduct {
            name: req.name.clone(),
            display_name: req.display_name.clone(),
            description: req.description.clone(),
            price: req.price,
            stock: req.stock,
            category_id: req.category_id,
            user_id: req.user_id,
            created_at: None,
            is_active: false,
            is_deleted: false,
        }
    }

    fn to_response(&self, product: &ProductModel) -> ProductResponse {
        ProductResponse::from(product.clone())
    }

    fn to_update_response(&self, req: &UpdateProductRequest) -> ProductUpdateResponse {
        ProductUpdateResponse::from(req.clone())
    }
}

use crate::{
    domain::requests::product::ProductListQuery,
    model::{NewProduct, Product as ProductModel},
};
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::RepositoryError;

pub type BoxedUnitOfWork = Box<dyn ProductUnitOfWork + Send>;

/// One scoped, transactional handle to the store.
///
/// Writes become visible to other units of work only after `commit`.
/// Dropping a unit of work without committing discards its writes and
/// releases the underlying connection.
#[async_trait]
pub trait ProductUnitOfWork {
    async fn user_exists(&mut self, user_id: i32) -> Result<bool, RepositoryError>;

    async fn category_exists(&mut self, category_id: i32) -> Result<bool, RepositoryError>;

    async fn find_visible(
        &mut self,
        query: &ProductListQuery,
    ) -> Result<Vec<ProductModel>, RepositoryError>;

    async fn count_visible(&mut self) -> Result<i64, RepositoryError>;

    async fn find_visible_by_id(
        &mut self,
        id: i32,
    ) -> Result<Option<ProductModel>, RepositoryError>;

    /// Looks a product up regardless of its active/deleted flags.
    async fn find_by_id(&mut self, id: i32) -> Result<Option<ProductModel>, RepositoryError>;

    async fn insert(&mut self, product: &NewProduct) -> Result<ProductModel, RepositoryError>;

    async fn save(&mut self, product: &ProductModel) -> Result<(), RepositoryError>;

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError>;
}

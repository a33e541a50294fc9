use crate::abstract_trait::product::repository::BoxedUnitOfWork;
use anyhow::Result;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductStore = Arc<dyn ProductStoreTrait + Send + Sync>;

/// Source of units of work over the products, categories and users tables.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStoreTrait {
    async fn begin(&self) -> Result<BoxedUnitOfWork, RepositoryError>;
}

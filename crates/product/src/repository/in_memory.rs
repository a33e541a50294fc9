use crate::{
    abstract_trait::product::repository::{BoxedUnitOfWork, ProductStoreTrait, ProductUnitOfWork},
    domain::requests::{
        product::ProductListQuery,
        sort::{SortDirection, SortField},
    },
    model::{NewProduct, Product as ProductModel},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Default)]
struct MemoryState {
    products: BTreeMap<i32, ProductModel>,
    categories: HashSet<i32>,
    users: HashSet<i32>,
    next_id: i32,
}

/// Process-local store with the same visibility and ordering rules as the
/// Postgres one. Used for development and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_reference_data(
        categories: impl IntoIterator<Item = i32>,
        users: impl IntoIterator<Item = i32>,
    ) -> Self {
        let store = Self::new();
        {
            let mut state = store.state.write().await;
            state.categories.extend(categories);
            state.users.extend(users);
        }
        store
    }

    pub async fn add_category(&self, category_id: i32) {
        self.state.write().await.categories.insert(category_id);
    }

    pub async fn add_user(&self, user_id: i32) {
        self.state.write().await.users.insert(user_id);
    }

    /// Raw committed row, flags included.
    pub async fn snapshot(&self, id: i32) -> Option<ProductModel> {
        self.state.read().await.products.get(&id).cloned()
    }
}

#[async_trait]
impl ProductStoreTrait for InMemoryProductStore {
    async fn begin(&self) -> Result<BoxedUnitOfWork, RepositoryError> {
        Ok(Box::new(InMemoryUnitOfWork {
            state: Arc::clone(&self.state),
            pending: HashMap::new(),
        }))
    }
}

/// Buffers writes until commit; reads see committed rows overlaid with
/// this unit's own pending writes.
pub struct InMemoryUnitOfWork {
    state: Arc<RwLock<MemoryState>>,
    pending: HashMap<i32, ProductModel>,
}

impl InMemoryUnitOfWork {
    async fn current_rows(&self) -> Vec<ProductModel> {
        let state = self.state.read().await;
        let mut rows: BTreeMap<i32, ProductModel> = state.products.clone();
        for (id, product) in &self.pending {
            rows.insert(*id, product.clone());
        }
        rows.into_values().collect()
    }

    async fn lookup(&self, id: i32) -> Option<ProductModel> {
        if let Some(product) = self.pending.get(&id) {
            return Some(product.clone());
        }
        self.state.read().await.products.get(&id).cloned()
    }
}

fn compare_by(field: SortField, a: &ProductModel, b: &ProductModel) -> Ordering {
    match field {
        SortField::Id => a.product_id.cmp(&b.product_id),
        SortField::Name => a.name.cmp(&b.name),
        SortField::DisplayName => a.display_name.cmp(&b.display_name),
        SortField::Price => a.price.cmp(&b.price),
        SortField::Stock => a.stock.cmp(&b.stock),
        SortField::CategoryId => a.category_id.cmp(&b.category_id),
        SortField::UserId => a.user_id.cmp(&b.user_id),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

#[async_trait]
impl ProductUnitOfWork for InMemoryUnitOfWork {
    async fn user_exists(&mut self, user_id: i32) -> Result<bool, RepositoryError> {
        Ok(self.state.read().await.users.contains(&user_id))
    }

    async fn category_exists(&mut self, category_id: i32) -> Result<bool, RepositoryError> {
        Ok(self.state.read().await.categories.contains(&category_id))
    }

    async fn find_visible(
        &mut self,
        query: &ProductListQuery,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        let mut rows: Vec<ProductModel> = self
            .current_rows()
            .await
            .into_iter()
            .filter(ProductModel::is_visible)
            .filter(|p| query.price_range.is_none_or(|range| range.contains(p.price)))
            .collect();

        let ordering = query.ordering();
        rows.sort_by(|a, b| {
            let primary = match ordering.direction {
                SortDirection::Ascending => compare_by(ordering.field, a, b),
                SortDirection::Descending => compare_by(ordering.field, b, a),
            };
            primary.then_with(|| a.product_id.cmp(&b.product_id))
        });

        let rows = match query.window {
            Some(window) => rows
                .into_iter()
                .skip(usize::try_from(window.offset).unwrap_or(0))
                .take(usize::try_from(window.limit).unwrap_or(0))
                .collect(),
            None => rows,
        };

        Ok(rows)
    }

    async fn count_visible(&mut self) -> Result<i64, RepositoryError> {
        let count = self
            .current_rows()
            .await
            .iter()
            .filter(|p| p.is_visible())
            .count();
        Ok(count as i64)
    }

    async fn find_visible_by_id(
        &mut self,
        id: i32,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        Ok(self.lookup(id).await.filter(ProductModel::is_visible))
    }

    async fn find_by_id(&mut self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        Ok(self.lookup(id).await)
    }

    async fn insert(&mut self, product: &NewProduct) -> Result<ProductModel, RepositoryError> {
        let product_id = {
            let mut state = self.state.write().await;
            if !state.users.contains(&product.user_id) {
                return Err(RepositoryError::ForeignKey(format!(
                    "user {} does not exist",
                    product.user_id
                )));
            }
            if !state.categories.contains(&product.category_id) {
                return Err(RepositoryError::ForeignKey(format!(
                    "category {} does not exist",
                    product.category_id
                )));
            }
            // ids are not reused after a rollback
            state.next_id += 1;
            state.next_id
        };

        let created = ProductModel {
            product_id,
            name: product.name.clone(),
            display_name: product.display_name.clone(),
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
            category_id: product.category_id,
            user_id: product.user_id,
            created_at: product.created_at,
            updated_at: None,
            is_active: product.is_active,
            is_deleted: product.is_deleted,
        };

        self.pending.insert(product_id, created.clone());
        info!("🆕 Staged product {} for insert", product_id);

        Ok(created)
    }

    async fn save(&mut self, product: &ProductModel) -> Result<(), RepositoryError> {
        if self.lookup(product.product_id).await.is_none() {
            return Err(RepositoryError::NotFound);
        }
        self.pending.insert(product.product_id, product.clone());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        for (id, product) in self.pending {
            state.products.insert(id, product);
        }
        Ok(())
    }
}

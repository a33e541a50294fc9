use crate::{
    abstract_trait::product::repository::{BoxedUnitOfWork, ProductStoreTrait, ProductUnitOfWork},
    domain::requests::{product::ProductListQuery, sort::SortField},
    model::{NewProduct, Product as ProductModel},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Postgres, QueryBuilder, Transaction};
use tracing::{error, info};

const PRODUCT_COLUMNS: &str = "product_id, name, display_name, description, price, stock, \
     category_id, user_id, created_at, updated_at, is_active, is_deleted";

const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Clone)]
pub struct PgProductStore {
    db: ConnectionPool,
}

impl PgProductStore {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductStoreTrait for PgProductStore {
    async fn begin(&self) -> Result<BoxedUnitOfWork, RepositoryError> {
        let tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to begin transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(Box::new(PgProductUnitOfWork { tx }))
    }
}

/// Rolls back on drop unless committed.
pub struct PgProductUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

/// Visible rows, optionally price-bounded, in a total order, then windowed.
fn visible_products_query(query: &ProductListQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
    builder.push(PRODUCT_COLUMNS);
    builder.push(" FROM products WHERE is_active = TRUE AND is_deleted = FALSE");

    if let Some(range) = query.price_range {
        builder
            .push(" AND price >= ")
            .push_bind(range.min_price)
            .push(" AND price <= ")
            .push_bind(range.max_price);
    }

    // column and direction come from closed enums, never from caller text
    let ordering = query.ordering();
    builder
        .push(" ORDER BY ")
        .push(ordering.field.column())
        .push(" ")
        .push(ordering.direction.sql());
    if ordering.field != SortField::Id {
        builder.push(", product_id ASC");
    }

    if let Some(window) = query.window {
        builder
            .push(" LIMIT ")
            .push_bind(window.limit)
            .push(" OFFSET ")
            .push_bind(window.offset);
    }

    builder
}

fn map_write_error(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) => {
            RepositoryError::ForeignKey(db.message().to_string())
        }
        _ => RepositoryError::from(e),
    }
}

#[async_trait]
impl ProductUnitOfWork for PgProductUnitOfWork {
    async fn user_exists(&mut self, user_id: i32) -> Result<bool, RepositoryError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)")
            .bind(user_id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to check user {}: {:?}", user_id, e);
                RepositoryError::from(e)
            })
    }

    async fn category_exists(&mut self, category_id: i32) -> Result<bool, RepositoryError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE category_id = $1)",
        )
        .bind(category_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to check category {}: {:?}", category_id, e);
            RepositoryError::from(e)
        })
    }

    async fn find_visible(
        &mut self,
        query: &ProductListQuery,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🔍 Fetching visible products: {:?}", query);

        let mut builder = visible_products_query(query);

        builder
            .build_query_as::<ProductModel>()
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products: {:?}", e);
                RepositoryError::from(e)
            })
    }

    async fn count_visible(&mut self) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM products WHERE is_active = TRUE AND is_deleted = FALSE",
        )
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to count products: {:?}", e);
            RepositoryError::from(e)
        })
    }

    async fn find_visible_by_id(
        &mut self,
        id: i32,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE product_id = $1 AND is_active = TRUE AND is_deleted = FALSE"
        );

        sqlx::query_as::<_, ProductModel>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch product {}: {:?}", id, e);
                RepositoryError::from(e)
            })
    }

    async fn find_by_id(&mut self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = $1");

        sqlx::query_as::<_, ProductModel>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch product {}: {:?}", id, e);
                RepositoryError::from(e)
            })
    }

    async fn insert(&mut self, product: &NewProduct) -> Result<ProductModel, RepositoryError> {
        info!("🆕 Inserting product: {}", product.name);

        let sql = format!(
            "INSERT INTO products \
                 (name, display_name, description, price, stock, category_id, user_id, \
                  created_at, is_active, is_deleted) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {PRODUCT_COLUMNS}"
        );

        let created = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(&product.name)
            .bind(&product.display_name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.stock)
            .bind(product.category_id)
            .bind(product.user_id)
            .bind(product.created_at)
            .bind(product.is_active)
            .bind(product.is_deleted)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to insert product {}: {:?}", product.name, e);
                map_write_error(e)
            })?;

        info!("✅ Inserted product with ID: {}", created.product_id);
        Ok(created)
    }

    async fn save(&mut self, product: &ProductModel) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2,
                display_name = $3,
                description = $4,
                price = $5,
                stock = $6,
                category_id = $7,
                user_id = $8,
                created_at = $9,
                updated_at = $10,
                is_active = $11,
                is_deleted = $12
            WHERE product_id = $1
            "#,
        )
        .bind(product.product_id)
        .bind(&product.name)
        .bind(&product.display_name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(product.category_id)
        .bind(product.user_id)
        .bind(product.created_at)
        .bind(product.updated_at)
        .bind(product.is_active)
        .bind(product.is_deleted)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to save product {}: {:?}", product.product_id, e);
            map_write_error(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        self.tx.commit().await.map_err(|e| {
            error!("❌ Failed to commit transaction: {:?}", e);
            RepositoryError::from(e)
        })
    }
}

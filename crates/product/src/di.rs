use crate::{
    abstract_trait::product::{
        repository::DynProductStore,
        service::{DynProductCommandService, DynProductQueryService},
    },
    mapper::ProductMapper,
    repository::PgProductStore,
    service::ProductService,
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_query", &"ProductQueryService")
            .field("product_command", &"ProductCommandService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps { pool } = deps;

        Self::from_store(Arc::new(PgProductStore::new(pool)), registry)
    }

    /// Wires the service over any store; the in-memory one in tests.
    pub fn from_store(store: DynProductStore, registry: &mut Registry) -> Self {
        let service = Arc::new(ProductService::new(
            store,
            Arc::new(ProductMapper::new()),
            registry,
        ));

        Self {
            product_query: service.clone(),
            product_command: service,
        }
    }
}

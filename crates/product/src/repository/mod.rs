mod in_memory;
mod postgres;

pub use self::in_memory::{InMemoryProductStore, InMemoryUnitOfWork};
pub use self::postgres::{PgProductStore, PgProductUnitOfWork};

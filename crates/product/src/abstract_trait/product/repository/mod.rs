mod store;
mod unit_of_work;

#[cfg(test)]
pub use self::store::MockProductStoreTrait;
pub use self::store::{DynProductStore, ProductStoreTrait};
pub use self::unit_of_work::{BoxedUnitOfWork, ProductUnitOfWork};

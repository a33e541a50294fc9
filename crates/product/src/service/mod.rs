mod command;
mod product;
mod query;

pub use self::product::ProductService;

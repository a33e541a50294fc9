mod product;

pub use self::product::{NewProduct, Product};

pub mod product;
pub mod sort;

//! Data models for extracted products and category groupings.

mod product;

pub use product::{Category, PageData, Product};

//! Product, category and page records.
//!
//! A `Product` is built once per container child and never mutated
//! afterwards; categories and the page keep products in document order.

use serde::Serialize;

/// A single product listing with its normalized price.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Product {
    /// Link target of the first anchor in the entry (may be empty).
    pub id: String,
    /// Product name (may be empty when only a price was found).
    pub name: String,
    /// Raw listed price in yuan; 0 when unparseable.
    pub price: f64,
    /// Raw spec text describing packaging or weight (may be empty).
    pub spec: String,
    /// Normalized price: per jin for weight-priced products, the raw
    /// price for packaged ones; 0 when not computable.
    pub price_per_jin: f64,
    /// True for box/bag/count-priced products (and for products whose
    /// spec could not be identified at all).
    pub is_packaged: bool,
    /// Display unit for the normalized price, e.g. "元/斤" or "元/盒".
    pub unit: String,
}

impl Product {
    /// A product qualifies for the result only if it carries some
    /// information: a name or a positive price.
    pub fn has_information(&self) -> bool {
        !self.name.is_empty() || self.price > 0.0
    }
}

/// One category page worth of products, in document order.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub products: Vec<Product>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, products: Vec<Product>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            products,
        }
    }
}

/// Result of one aggregation run: all categories in configuration order.
#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    pub categories: Vec<Category>,
}

impl PageData {
    /// Total product count across all categories.
    pub fn product_count(&self) -> usize {
        self.categories.iter().map(|c| c.products.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_information() {
        let empty = Product::default();
        assert!(!empty.has_information());

        let named = Product {
            name: "白菜".to_string(),
            ..Default::default()
        };
        assert!(named.has_information());

        let priced = Product {
            price: 2.5,
            ..Default::default()
        };
        assert!(priced.has_information());
    }

    #[test]
    fn test_product_count() {
        let page = PageData {
            categories: vec![
                Category::new("a", "A", vec![Product::default(), Product::default()]),
                Category::new("b", "B", vec![]),
                Category::new("c", "C", vec![Product::default()]),
            ],
        };
        assert_eq!(page.product_count(), 3);
    }
}

//! Markup extraction: locate the product container, enumerate its
//! direct children as product boundaries, and build one `Product` per
//! qualifying child.

pub mod fields;

use scraper::{ElementRef, Html};
use serde::Serialize;
use thiserror::Error;

use crate::models::Product;
use crate::pricing;

/// Tag of the product container element.
pub const CONTAINER_TAG: &str = "div";

/// Class-attribute marker of the product container on the site.
pub const CONTAINER_CLASS: &str = "index_picAD";

/// Structural extraction failures. Field-level misses are not errors.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("product container not found: {marker}")]
    ContainerNotFound { marker: String },
}

/// Parse a category page and extract all products in document order.
///
/// Children of the container that yield neither a name nor a positive
/// price are layout wrappers and are dropped silently.
pub fn parse_products(html: &str) -> Result<Vec<Product>, ExtractError> {
    let doc = Html::parse_document(html);

    let container =
        find_container(&doc, CONTAINER_TAG, CONTAINER_CLASS).ok_or_else(|| {
            ExtractError::ContainerNotFound {
                marker: CONTAINER_CLASS.to_string(),
            }
        })?;

    Ok(child_entries(container)
        .map(build_product)
        .filter(Product::has_information)
        .collect())
}

/// Depth-first pre-order search for the first element matching the tag
/// whose class attribute contains the marker substring. The class
/// attribute may carry multiple space-separated tokens, hence
/// substring match rather than token equality.
pub fn find_container<'a>(
    doc: &'a Html,
    tag: &str,
    class_marker: &str,
) -> Option<ElementRef<'a>> {
    doc.root_element().descendants().find_map(|node| {
        let element = ElementRef::wrap(node)?;
        (element.value().name() == tag
            && element
                .value()
                .attr("class")
                .is_some_and(|class| class.contains(class_marker)))
        .then_some(element)
    })
}

/// Direct element children of the container, in document order. Each
/// one is a product boundary.
pub fn child_entries<'a>(container: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    container.children().filter_map(ElementRef::wrap)
}

/// Build a product record from one container child.
///
/// Composes the field extractors and normalizers: extract raw fields,
/// fall back to a name-derived spec, classify, then compute the
/// normalized price and its display unit.
pub fn build_product(entry: ElementRef) -> Product {
    let id = fields::extract_attr(entry, "a", "href");
    let name = fields::product_name(entry);
    let price = pricing::parse_price(&fields::price_text(entry));

    let mut spec = fields::spec_text(entry);
    if spec.is_empty() {
        spec = pricing::spec_from_name(&name);
    }

    let is_packaged = pricing::is_packaged(&spec);
    let (price_per_jin, unit) = if is_packaged {
        (price, pricing::packaged_unit(&spec))
    } else {
        (pricing::price_per_jin(price, &spec), "元/斤".to_string())
    };

    Product {
        id,
        name,
        price,
        spec,
        price_per_jin,
        is_packaged,
        unit,
    }
}

/// Class attributes containing a keyword (case-insensitive), with
/// their tags. Debug aid for when the container marker is missing and
/// the site's class names have shifted.
pub fn similar_classes(html: &str, keyword: &str) -> Vec<(String, String)> {
    let doc = Html::parse_document(html);
    let keyword = keyword.to_lowercase();
    doc.root_element()
        .descendants()
        .filter_map(|node| {
            let element = ElementRef::wrap(node)?;
            let class = element.value().attr("class")?;
            class
                .to_lowercase()
                .contains(&keyword)
                .then(|| (element.value().name().to_string(), class.to_string()))
        })
        .collect()
}

/// Container diagnostics for the debug surface.
#[derive(Debug, Clone, Serialize)]
pub struct DebugReport {
    pub html_length: usize,
    pub container_found: bool,
    pub child_count: usize,
}

/// Inspect a page without building products: length, container
/// presence and direct-child count.
pub fn debug_report(html: &str) -> DebugReport {
    let doc = Html::parse_document(html);
    match find_container(&doc, CONTAINER_TAG, CONTAINER_CLASS) {
        Some(container) => DebugReport {
            html_length: html.len(),
            container_found: true,
            child_count: child_entries(container).count(),
        },
        None => DebugReport {
            html_length: html.len(),
            container_found: false,
            child_count: 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <div class="header">导航</div>
        <div class="wrap index_picAD more">
            <div>
                <a href="/goods/101.html"><h3>西红柿</h3></a>
                <span class="price">￥3.50</span>
                <span class="spec">500g</span>
            </div>
            <div>
                <h3>草莓礼盒</h3>
                <div class="price">28元</div>
            </div>
            <div class="spacer"></div>
            <div>
                <span>2.00元</span>
            </div>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_products() {
        let products = parse_products(PAGE).unwrap();
        assert_eq!(products.len(), 3);

        let tomato = &products[0];
        assert_eq!(tomato.id, "/goods/101.html");
        assert_eq!(tomato.name, "西红柿");
        assert_eq!(tomato.price, 3.5);
        assert_eq!(tomato.spec, "500g");
        assert!(!tomato.is_packaged);
        assert_eq!(tomato.unit, "元/斤");
        assert!((tomato.price_per_jin - 3.5).abs() < 1e-6);

        // No spec anywhere, but the name carries a packaging token.
        let strawberry = &products[1];
        assert_eq!(strawberry.spec, "1盒");
        assert!(strawberry.is_packaged);
        assert_eq!(strawberry.unit, "元/盒");
        assert_eq!(strawberry.price_per_jin, 28.0);
    }

    #[test]
    fn test_zero_information_child_dropped() {
        let products = parse_products(PAGE).unwrap();
        // The empty spacer div is gone; the nameless-but-priced entry
        // survives.
        assert!(products.iter().all(|p| p.has_information()));
        let nameless = &products[2];
        assert_eq!(nameless.name, "2.00元");
        assert_eq!(nameless.price, 2.0);
    }

    #[test]
    fn test_container_not_found() {
        let err = parse_products("<html><body><div class='other'></div></body></html>")
            .unwrap_err();
        assert!(matches!(err, ExtractError::ContainerNotFound { .. }));
    }

    #[test]
    fn test_empty_container() {
        let products =
            parse_products(r#"<html><body><div class="index_picAD"></div></body></html>"#)
                .unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let first = parse_products(PAGE).unwrap();
        let second = parse_products(PAGE).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_class_substring_match() {
        let html = r#"<html><body><div class="top index_picADv2">
            <div><h3>菠菜</h3><span class="price">2元</span></div>
        </div></body></html>"#;
        let products = parse_products(html).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "菠菜");
    }

    #[test]
    fn test_debug_report() {
        let report = debug_report(PAGE);
        assert!(report.container_found);
        assert_eq!(report.child_count, 4);
        assert_eq!(report.html_length, PAGE.len());

        let missing = debug_report("<html></html>");
        assert!(!missing.container_found);
        assert_eq!(missing.child_count, 0);
    }
}

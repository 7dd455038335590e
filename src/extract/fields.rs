//! Ordered-fallback field extractors.
//!
//! Every extractor walks the entry subtree depth-first in document
//! order and stops at the first match. Fallback chains encode observed
//! markup variance on the site, so their order matters: a product name
//! usually sits in an h3, sometimes in an h2/h4, and degenerate
//! entries only have a bare span or the wrapping div itself.

use scraper::ElementRef;

use crate::pricing::{rules_of, UnitKind};

/// Tag fallback order for the product name.
const NAME_FALLBACKS: &[&str] = &["h3", "h2", "h4", "span", "div"];

/// (tag, class substring) fallbacks for price text.
const PRICE_FALLBACKS: &[(&str, &str)] = &[("span", "price"), ("div", "price")];

/// (tag, attribute, substring) fallbacks for spec text. The style
/// marker is a legacy convention on the site for small-font spec text.
const SPEC_FALLBACKS: &[(&str, &str, &str)] = &[
    ("span", "class", "spec"),
    ("div", "class", "spec"),
    ("span", "style", "font-size:11px;"),
];

/// Concatenated descendant text of an element, trimmed.
pub fn text_content(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// First element under `root` (root included) whose tag matches and,
/// if a filter is given, whose attribute value contains the filter
/// substring. Returns its text content; first-match-wins even when
/// that text is empty.
pub fn extract_text(root: ElementRef, tag: &str, filter: Option<(&str, &str)>) -> Option<String> {
    for node in root.descendants() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if element.value().name() != tag {
            continue;
        }
        match filter {
            None => return Some(text_content(element)),
            Some((key, value)) => {
                if element
                    .value()
                    .attr(key)
                    .is_some_and(|attr| attr.contains(value))
                {
                    return Some(text_content(element));
                }
            }
        }
    }
    None
}

/// Attribute value of the first element of `tag` carrying `attr`
/// anywhere in the subtree. Elements of the tag without the attribute
/// are skipped, not treated as a miss.
pub fn extract_attr(root: ElementRef, tag: &str, attr: &str) -> String {
    for node in root.descendants() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if element.value().name() == tag {
            if let Some(value) = element.value().attr(attr) {
                return value.trim().to_string();
            }
        }
    }
    String::new()
}

/// Product name by tag fallback; first non-empty result wins.
pub fn product_name(entry: ElementRef) -> String {
    NAME_FALLBACKS
        .iter()
        .find_map(|&tag| extract_text(entry, tag, None).filter(|text| !text.is_empty()))
        .unwrap_or_default()
}

/// Raw price text: price-classed span/div first, then a free-text scan.
pub fn price_text(entry: ElementRef) -> String {
    PRICE_FALLBACKS
        .iter()
        .find_map(|&(tag, class)| {
            extract_text(entry, tag, Some(("class", class))).filter(|text| !text.is_empty())
        })
        .unwrap_or_else(|| find_price_text(entry))
}

/// Raw spec text: classed/styled elements first, then a free-text scan
/// for weight units. Name-derived fallback is the builder's job.
pub fn spec_text(entry: ElementRef) -> String {
    SPEC_FALLBACKS
        .iter()
        .find_map(|&(tag, attr, value)| {
            extract_text(entry, tag, Some((attr, value))).filter(|text| !text.is_empty())
        })
        .unwrap_or_else(|| find_spec_text(entry))
}

/// Scan all text nodes for price-looking strings: a currency marker
/// (元, ￥ or $) plus at least one digit. A ￥-marked string beats
/// earlier plain matches; otherwise the first match in document order
/// wins.
fn find_price_text(entry: ElementRef) -> String {
    let mut candidates = Vec::new();

    for node in entry.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let trimmed = text.trim();
        let marked =
            trimmed.contains('元') || trimmed.contains('￥') || trimmed.contains('$');
        if marked && trimmed.chars().any(|c| c.is_ascii_digit()) {
            candidates.push(trimmed.to_string());
        }
    }

    if let Some(symbolic) = candidates.iter().find(|text| text.contains('￥')) {
        return symbolic.clone();
    }
    candidates.into_iter().next().unwrap_or_default()
}

/// Scan all text nodes for the first string containing a weight-unit
/// token and at least one digit.
fn find_spec_text(entry: ElementRef) -> String {
    for node in entry.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let trimmed = text.trim();
        if !trimmed.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        if rules_of(UnitKind::Weight).any(|rule| trimmed.contains(rule.token)) {
            return trimmed.to_string();
        }
    }
    String::new()
}
